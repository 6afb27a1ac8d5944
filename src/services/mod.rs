/// Business logic over the repositories.
pub mod follow;
pub mod posts;

pub use follow::{FollowOutcome, FollowService};
pub use posts::PostService;
