use crate::core::errors::KleingroepeError;
use crate::core::models::group::Group;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, (Vec<Group>, chrono::DateTime<chrono::Utc>)>,
    generation: u64,
}

#[derive(Clone, Default)]
pub struct InMemoryCache {
    state: Arc<RwLock<CacheState>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_active_groups(&self) -> Result<Option<Vec<Group>>, KleingroepeError> {
        let key = cache_keys::active_groups_key();
        {
            let state = self.state.read().await;
            match state.entries.get(&key) {
                Some((groups, expiry)) if *expiry > chrono::Utc::now() => return Ok(Some(groups.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        let mut state = self.state.write().await;
        state.entries.retain(|_, (_, expiry)| *expiry > chrono::Utc::now());
        Ok(None)
    }

    async fn generation(&self) -> Result<u64, KleingroepeError> {
        Ok(self.state.read().await.generation)
    }

    async fn save_active_groups(
        &self,
        groups: &[Group],
        ttl: std::time::Duration,
        generation: u64,
    ) -> Result<bool, KleingroepeError> {
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| KleingroepeError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut state = self.state.write().await;
        if state.generation != generation {
            return Ok(false);
        }
        state.entries.insert(cache_keys::active_groups_key(), (groups.to_vec(), expiry));
        Ok(true)
    }

    async fn invalidate_active_groups(&self) -> Result<(), KleingroepeError> {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.entries.remove(&cache_keys::active_groups_key());
        Ok(())
    }
}

