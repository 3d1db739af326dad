/// Fetch orchestration over the two Deep Space Network feeds
use crate::clients::{DsnUrls, Transport};
use crate::decode::{decode_configuration, decode_state};
use crate::domain::{Configuration, MergedResult, State};
use crate::errors::{DsnError, DsnResult, Phase};
use crate::repo::{Clock, ConfigurationStore, SystemClock};
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub mod merge;

/// Default lifetime of a cached configuration document
pub const DEFAULT_MAX_CONFIG_AGE_MINUTES: i64 = 30;

/// Retrieves configuration and state, caching the configuration.
///
/// The store sits behind an async mutex held for the whole
/// check-refresh-write sequence, so concurrent callers that find the
/// configuration missing or stale trigger a single refetch between them.
pub struct DsnService<T> {
    transport: T,
    urls: DsnUrls,
    store: Mutex<ConfigurationStore>,
    clock: Arc<dyn Clock>,
}

impl<T: Transport> DsnService<T> {
    pub fn new(transport: T, urls: DsnUrls) -> Self {
        Self {
            transport,
            urls,
            store: Mutex::new(ConfigurationStore::new()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch and decode the configuration document, replacing the cached copy
    pub async fn fetch_configuration(&self) -> DsnResult<Arc<Configuration>> {
        let mut store = self.store.lock().await;
        self.refresh_configuration(&mut store).await
    }

    /// Fetch and decode the live-state document
    pub async fn fetch_state(&self) -> DsnResult<State> {
        debug!("fetching state from {}", self.urls.state);
        let bytes = self
            .transport
            .fetch(&self.urls.state)
            .await
            .map_err(|e| DsnError::transport(Phase::State, e))?;
        decode_state(&bytes).map_err(|e| DsnError::decode(Phase::State, e))
    }

    /// Merge live state against a configuration no older than `max_config_age`
    pub async fn fetch_merged(&self, max_config_age: Duration) -> DsnResult<MergedResult> {
        let configuration = self.current_configuration(max_config_age).await?;
        let state = self.fetch_state().await?;
        Ok(merge::merge(&configuration, &state))
    }

    /// Cached configuration snapshot, without fetching
    pub async fn cached_configuration(&self) -> Option<Arc<Configuration>> {
        self.store.lock().await.get()
    }

    async fn current_configuration(&self, max_age: Duration) -> DsnResult<Arc<Configuration>> {
        let mut store = self.store.lock().await;

        match store.get() {
            None => {
                debug!("configuration has not yet been set, updating configuration before fetching state");
                self.refresh_configuration(&mut store).await
            }
            Some(_) if store.is_stale(self.clock.now(), max_age) => {
                debug!("configuration has expired, updating configuration before fetching state");
                self.refresh_configuration(&mut store).await
            }
            Some(configuration) => Ok(configuration),
        }
    }

    async fn refresh_configuration(
        &self,
        store: &mut ConfigurationStore,
    ) -> DsnResult<Arc<Configuration>> {
        debug!("fetching configuration from {}", self.urls.configuration);
        let bytes = self
            .transport
            .fetch(&self.urls.configuration)
            .await
            .map_err(|e| DsnError::transport(Phase::Configuration, e))?;
        let configuration = decode_configuration(&bytes)
            .map(Arc::new)
            .map_err(|e| DsnError::decode(Phase::Configuration, e))?;

        store.set(configuration.clone(), self.clock.now());
        Ok(configuration)
    }
}
