use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// Page cache for the rendered home feed, backed by Redis.
///
/// Within the TTL window a freshly created post is invisible on `/` — that is
/// the contract, not a bug. `invalidate_index` clears the window early.
#[derive(Clone)]
pub struct PageCache {
    redis: ConnectionManager,
    ttl: Duration,
}

impl PageCache {
    pub fn new(redis: ConnectionManager, ttl_secs: u64) -> Self {
        Self {
            redis,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    fn index_key(page: i64) -> String {
        format!("page:index:{}", page)
    }

    /// Fetch the cached home page, if present.
    pub async fn read_index(&self, page: i64) -> Result<Option<String>> {
        let key = Self::index_key(page);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(html)) => {
                debug!("index cache HIT for page {}", page);
                Ok(Some(html))
            }
            Ok(None) => {
                debug!("index cache MISS for page {}", page);
                Ok(None)
            }
            Err(e) => {
                warn!("redis read error for index cache: {}", e);
                Err(AppError::Cache(e.to_string()))
            }
        }
    }

    /// Store a rendered home page for the TTL window.
    pub async fn write_index(&self, page: i64, html: &str) -> Result<()> {
        let key = Self::index_key(page);
        let mut conn = self.redis.clone();

        conn.set_ex::<_, _, ()>(&key, html, self.ttl.as_secs())
            .await
            .map_err(|e| {
                warn!("failed to write index cache: {}", e);
                AppError::Cache(e.to_string())
            })?;

        debug!(
            "index cache WRITE for page {} with TTL {:?}",
            page, self.ttl
        );
        Ok(())
    }

    /// Drop every cached home page. Used by operators/tests to surface new
    /// posts before the window expires.
    pub async fn invalidate_index(&self) -> Result<()> {
        let mut scan_conn = self.redis.clone();
        let keys: Vec<String> = {
            let mut iter = scan_conn
                .scan_match::<_, String>("page:index:*")
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
            let mut keys = Vec::new();
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            keys
        };

        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.redis.clone();
        conn.del::<_, ()>(keys.clone())
            .await
            .map_err(|e| AppError::Cache(e.to_string()))?;

        debug!("index cache INVALIDATED ({} pages)", keys.len());
        Ok(())
    }
}
