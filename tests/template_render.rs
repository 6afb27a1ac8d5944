//! Template rendering checks: every page template renders against a
//! representative context and shows what the handlers put into it.

use chrono::Utc;
use once_cell::sync::Lazy;
use tera::{Context, Tera};
use uuid::Uuid;

use yatube::auth::AuthUser;
use yatube::models::{CommentView, Group, PostView, User};
use yatube::pagination::{paginate, POSTS_PER_PAGE};

static TEMPLATES: Lazy<Tera> =
    Lazy::new(|| Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap());

fn post(id: i64, text: &str, author: &str) -> PostView {
    PostView {
        id,
        text: text.to_string(),
        image: None,
        pub_date: Utc::now(),
        author_id: Uuid::new_v4(),
        author_username: author.to_string(),
        group_id: None,
        group_title: None,
        group_slug: None,
    }
}

fn viewer(name: &str) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        username: name.to_string(),
    }
}

#[test]
fn index_renders_posts_and_pager() {
    let posts = vec![post(1, "first post", "leo"), post(2, "second post", "anna")];
    let page = paginate(13, POSTS_PER_PAGE, Some(1));

    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert("posts", &posts);
    ctx.insert("page_obj", &page);

    let html = TEMPLATES.render("index.html.tera", &ctx).unwrap();
    assert!(html.contains("first post"));
    assert!(html.contains("second post"));
    assert!(html.contains("Page 1 of 2"));
    // anonymous navbar
    assert!(html.contains("/auth/login/"));
    assert!(!html.contains("/auth/logout/"));
}

#[test]
fn index_renders_empty_state() {
    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert("posts", &Vec::<PostView>::new());
    ctx.insert("page_obj", &paginate(0, POSTS_PER_PAGE, None));

    let html = TEMPLATES.render("index.html.tera", &ctx).unwrap();
    assert!(html.contains("No posts yet."));
}

#[test]
fn group_page_shows_group_header() {
    let group = Group {
        id: 1,
        title: "Rustaceans".to_string(),
        slug: "rust".to_string(),
        description: "Crab talk".to_string(),
    };

    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert("group", &group);
    ctx.insert("posts", &vec![post(1, "group post", "leo")]);
    ctx.insert("page_obj", &paginate(1, POSTS_PER_PAGE, None));

    let html = TEMPLATES.render("group_list.html.tera", &ctx).unwrap();
    assert!(html.contains("Rustaceans"));
    assert!(html.contains("Crab talk"));
    assert!(html.contains("group post"));
}

#[test]
fn profile_shows_follow_button_for_other_viewers() {
    let author = User {
        id: Uuid::new_v4(),
        username: "anna".to_string(),
        password_hash: "x".to_string(),
        first_name: None,
        last_name: None,
        created_at: Utc::now(),
    };

    let mut ctx = Context::new();
    ctx.insert("user", &Some(viewer("leo")));
    ctx.insert("author", &author);
    ctx.insert("posts", &vec![post(1, "annas post", "anna")]);
    ctx.insert("page_obj", &paginate(1, POSTS_PER_PAGE, None));
    ctx.insert("count", &1i64);
    ctx.insert("following", &false);
    ctx.insert("followers", &0i64);
    ctx.insert("follows", &2i64);

    let html = TEMPLATES.render("profile.html.tera", &ctx).unwrap();
    assert!(html.contains("/profile/anna/follow/"));
    assert!(!html.contains("/profile/anna/unfollow/"));

    ctx.insert("following", &true);
    let html = TEMPLATES.render("profile.html.tera", &ctx).unwrap();
    assert!(html.contains("/profile/anna/unfollow/"));
}

#[test]
fn own_profile_has_no_follow_button() {
    let author = User {
        id: Uuid::new_v4(),
        username: "leo".to_string(),
        password_hash: "x".to_string(),
        first_name: None,
        last_name: None,
        created_at: Utc::now(),
    };

    let mut ctx = Context::new();
    ctx.insert("user", &Some(viewer("leo")));
    ctx.insert("author", &author);
    ctx.insert("posts", &Vec::<PostView>::new());
    ctx.insert("page_obj", &paginate(0, POSTS_PER_PAGE, None));
    ctx.insert("count", &0i64);
    ctx.insert("following", &false);
    ctx.insert("followers", &0i64);
    ctx.insert("follows", &0i64);

    let html = TEMPLATES.render("profile.html.tera", &ctx).unwrap();
    assert!(!html.contains("/profile/leo/follow/"));
}

#[test]
fn post_detail_shows_comments_to_anonymous_viewers() {
    let p = post(7, "the post body", "anna");
    let comments = vec![CommentView {
        id: 1,
        post_id: 7,
        text: "nice one".to_string(),
        created: Utc::now(),
        author_username: "leo".to_string(),
    }];

    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert("post", &p);
    ctx.insert("comments", &comments);
    ctx.insert("count", &3i64);
    ctx.insert("following", &false);

    let html = TEMPLATES.render("post_detail.html.tera", &ctx).unwrap();
    assert!(html.contains("the post body"));
    assert!(html.contains("nice one"));
    // anonymous viewers read comments but get pointed at login to write one
    assert!(html.contains("Log in"));
    assert!(!html.contains("/posts/7/comment/"));

    ctx.insert("user", &Some(viewer("leo")));
    let html = TEMPLATES.render("post_detail.html.tera", &ctx).unwrap();
    assert!(html.contains("/posts/7/comment/"));
}

#[test]
fn post_form_renders_blank_and_with_errors() {
    let groups = vec![Group {
        id: 1,
        title: "Rustaceans".to_string(),
        slug: "rust".to_string(),
        description: String::new(),
    }];

    let mut ctx = Context::new();
    ctx.insert("user", &Some(viewer("leo")));
    ctx.insert("form", &serde_json::json!({"text": "", "group": null, "image": null}));
    ctx.insert("groups", &groups);
    ctx.insert("errors", &Vec::<String>::new());
    ctx.insert("is_edit", &false);
    ctx.insert("post_id", &None::<i64>);

    let html = TEMPLATES.render("create_post.html.tera", &ctx).unwrap();
    assert!(html.contains("action=\"/create/\""));
    assert!(html.contains("Rustaceans"));

    ctx.insert("errors", &vec!["Post text cannot be empty".to_string()]);
    ctx.insert("is_edit", &true);
    ctx.insert("post_id", &Some(9i64));
    let html = TEMPLATES.render("create_post.html.tera", &ctx).unwrap();
    assert!(html.contains("Post text cannot be empty"));
    assert!(html.contains("action=\"/posts/9/edit/\""));
}

#[test]
fn auth_pages_render_errors() {
    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert("form", &serde_json::json!({"username": "leo"}));
    ctx.insert("errors", &vec!["Invalid username or password".to_string()]);
    let html = TEMPLATES.render("login.html.tera", &ctx).unwrap();
    assert!(html.contains("Invalid username or password"));
    assert!(html.contains("value=\"leo\""));

    let mut ctx = Context::new();
    ctx.insert("user", &None::<AuthUser>);
    ctx.insert(
        "form",
        &serde_json::json!({"username": "", "first_name": null, "last_name": null}),
    );
    ctx.insert("errors", &vec!["Passwords do not match".to_string()]);
    let html = TEMPLATES.render("signup.html.tera", &ctx).unwrap();
    assert!(html.contains("Passwords do not match"));
}

#[test]
fn follow_feed_renders() {
    let mut ctx = Context::new();
    ctx.insert("user", &Some(viewer("leo")));
    ctx.insert("posts", &vec![post(1, "followed author post", "anna")]);
    ctx.insert("page_obj", &paginate(1, POSTS_PER_PAGE, None));

    let html = TEMPLATES.render("follow.html.tera", &ctx).unwrap();
    assert!(html.contains("followed author post"));
}
