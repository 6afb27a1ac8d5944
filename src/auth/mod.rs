/// Authentication: password hashing, session tokens, request extractors.
///
/// Sessions are signed tokens in an HttpOnly cookie. Handlers ask for an
/// [`extract::AuthUser`] (protected pages; missing session redirects to the
/// login form) or an [`extract::MaybeUser`] (public pages that adapt to a
/// signed-in viewer).
pub mod extract;
pub mod password;
pub mod session;

pub use extract::{AuthUser, MaybeUser, SESSION_COOKIE};
pub use session::SessionKeys;
