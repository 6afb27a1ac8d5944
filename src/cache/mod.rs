/// Rendered-page caching
///
/// Only the home feed is cached: a fully rendered HTML page keyed by page
/// number, held for a short window (20 seconds by default). Everything else
/// renders fresh on every request.
pub mod page_cache;

pub use page_cache::PageCache;
