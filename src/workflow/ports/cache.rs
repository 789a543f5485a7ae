//! View-cache invalidation port.

use async_trait::async_trait;

/// Scope of a cache invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheScope {
    /// Views of a single board.
    Board(String),
    /// Views of every board.
    AllBoards,
}

/// Contract for signalling dependent views to refresh.
///
/// Invalidation happens once per logical operation, not once per task in a
/// batch. Implementations must tolerate redundant invalidations.
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Marks cached views in `scope` stale.
    async fn invalidate(&self, scope: CacheScope);
}
