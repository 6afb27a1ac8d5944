/// Feed pagination
///
/// Every listing page shows `POSTS_PER_PAGE` posts. Page numbers are 1-based;
/// anything below 1 (or missing/unparseable) means page 1, and anything past
/// the end clamps to the last page instead of erroring. An empty result set
/// still has a single, empty page.
use serde::{Deserialize, Deserializer, Serialize};

/// Posts shown per feed page.
pub const POSTS_PER_PAGE: i64 = 10;

/// Query-string page selector (`?page=N`). An unparseable value counts as
/// absent rather than a 400.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<i64>,
}

fn lenient_page<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// A resolved page of a listing: which slice to fetch and what the template
/// needs to render the pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub per_page: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Page {
    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    /// SQL LIMIT for this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Resolve a requested page number against a total item count.
pub fn paginate(total: i64, per_page: i64, requested: Option<i64>) -> Page {
    debug_assert!(per_page > 0);
    let total = total.max(0);
    let num_pages = ((total + per_page - 1) / per_page).max(1);
    let number = requested.unwrap_or(1).clamp(1, num_pages);
    Page {
        number,
        num_pages,
        total,
        per_page,
        has_previous: number > 1,
        has_next: number < num_pages,
    }
}

/// Number of items that actually appear on the resolved page.
pub fn items_on_page(page: &Page) -> i64 {
    if page.total == 0 {
        return 0;
    }
    if page.number < page.num_pages {
        page.per_page
    } else {
        page.total - (page.num_pages - 1) * page.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_holds_up_to_ten() {
        let page = paginate(13, POSTS_PER_PAGE, Some(1));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 2);
        assert_eq!(page.offset(), 0);
        assert_eq!(items_on_page(&page), 10);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn second_page_of_thirteen_holds_three() {
        let page = paginate(13, POSTS_PER_PAGE, Some(2));
        assert_eq!(page.number, 2);
        assert_eq!(page.offset(), 10);
        assert_eq!(items_on_page(&page), 3);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn fewer_items_than_a_page() {
        let page = paginate(4, POSTS_PER_PAGE, None);
        assert_eq!(page.num_pages, 1);
        assert_eq!(items_on_page(&page), 4);
    }

    #[test]
    fn out_of_range_clamps_to_last_page() {
        let page = paginate(13, POSTS_PER_PAGE, Some(99));
        assert_eq!(page.number, 2);
        assert_eq!(items_on_page(&page), 3);
    }

    #[test]
    fn zero_and_negative_clamp_to_first_page() {
        assert_eq!(paginate(13, POSTS_PER_PAGE, Some(0)).number, 1);
        assert_eq!(paginate(13, POSTS_PER_PAGE, Some(-3)).number, 1);
    }

    #[test]
    fn missing_page_defaults_to_first() {
        assert_eq!(paginate(25, POSTS_PER_PAGE, None).number, 1);
    }

    #[test]
    fn unparseable_page_param_counts_as_absent() {
        let query: PageQuery = serde_urlencoded::from_str("page=abc").unwrap();
        assert_eq!(query.page, None);

        let query: PageQuery = serde_urlencoded::from_str("page=3").unwrap();
        assert_eq!(query.page, Some(3));

        let query: PageQuery = serde_urlencoded::from_str("").unwrap();
        assert_eq!(query.page, None);
    }

    #[test]
    fn empty_set_has_one_empty_page() {
        let page = paginate(0, POSTS_PER_PAGE, Some(5));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert_eq!(items_on_page(&page), 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn exact_multiple_has_no_remainder_page() {
        let page = paginate(20, POSTS_PER_PAGE, Some(2));
        assert_eq!(page.num_pages, 2);
        assert_eq!(items_on_page(&page), 10);
        assert!(!page.has_next);
    }
}
