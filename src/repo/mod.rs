/// In-memory storage for the slowly-changing configuration document
use crate::domain::Configuration;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Source of the current time, injectable for staleness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedConfiguration {
    configuration: Arc<Configuration>,
    fetched_at: DateTime<Utc>,
}

/// Last fetched configuration and when it was fetched.
///
/// Starts empty and is replaced in place on every refresh. Not internally
/// synchronized; the owner serializes the check-refresh-write sequence.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    entry: Option<CachedConfiguration>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Configuration>> {
        self.entry.as_ref().map(|e| e.configuration.clone())
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.fetched_at)
    }

    pub fn set(&mut self, configuration: Arc<Configuration>, fetched_at: DateTime<Utc>) {
        self.entry = Some(CachedConfiguration {
            configuration,
            fetched_at,
        });
    }

    /// True once `now - fetched_at` exceeds `max_age`. An empty store is
    /// reported as not stale; emptiness is checked separately with `get`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match &self.entry {
            Some(e) => now - e.fetched_at > max_age,
            None => false,
        }
    }
}
