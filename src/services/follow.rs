use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::follow_repo;
use crate::error::Result;

/// What a follow attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// A new edge was created.
    Created,
    /// The edge already existed; nothing changed.
    AlreadyFollowing,
    /// Users may not follow themselves; nothing changed.
    SelfFollow,
}

#[derive(Clone)]
pub struct FollowService {
    pool: PgPool,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent follow. Self-follows are rejected before touching the
    /// database (the schema also forbids them).
    pub async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<FollowOutcome> {
        if user_id == author_id {
            return Ok(FollowOutcome::SelfFollow);
        }

        let inserted = follow_repo::create_follow(&self.pool, user_id, author_id).await?;
        if inserted {
            info!(%user_id, %author_id, "follow edge created");
            Ok(FollowOutcome::Created)
        } else {
            Ok(FollowOutcome::AlreadyFollowing)
        }
    }

    /// Idempotent unfollow; returns true if an edge was removed. Unfollowing
    /// an author you never followed is a no-op, not an error.
    pub async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool> {
        let removed = follow_repo::delete_follow(&self.pool, user_id, author_id).await?;
        if removed {
            info!(%user_id, %author_id, "follow edge removed");
        }
        Ok(removed)
    }
}
