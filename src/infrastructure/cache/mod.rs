pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::KleingroepeError;
use crate::core::models::group::Group;
use async_trait::async_trait;

/// Cache for the public listing of active groups.
///
/// Every invalidation bumps a generation counter. A listing read from storage is only
/// stored if no invalidation happened since the caller read the generation, so a slow
/// reader cannot put a snapshot older than the latest write back into the cache.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_active_groups(&self) -> Result<Option<Vec<Group>>, KleingroepeError>;
    async fn generation(&self) -> Result<u64, KleingroepeError>;
    /// Returns `false` when the write was discarded because the generation moved on.
    async fn save_active_groups(
        &self,
        groups: &[Group],
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, KleingroepeError>;
    async fn invalidate_active_groups(&self) -> Result<(), KleingroepeError>;
}
