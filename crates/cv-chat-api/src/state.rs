//! Shared application state for the Axum server.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use cv_protocol::contact::ContactRecord;
use tokio::sync::RwLock;

use crate::config::ApiConfig;
use crate::intent::IntentResolver;
use crate::theme_store::ThemeStore;

/// Number of contact submissions retained in memory.
pub const CONTACT_LOG_CAPACITY: usize = 100;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Intent resolution (provider choice is fixed at construction).
    pub resolver: Arc<IntentResolver>,
    pub themes: ThemeStore,
    pub contacts: ContactLog,
}

impl AppState {
    pub fn new(resolver: IntentResolver, themes: ThemeStore) -> Self {
        Self {
            resolver: Arc::new(resolver),
            themes,
            contacts: ContactLog::new(CONTACT_LOG_CAPACITY),
        }
    }

    /// Build state from loaded configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            IntentResolver::from_config(config.dialogflow.as_ref()),
            ThemeStore::new(&config.theme_path),
        )
    }

    /// Rule-based state with a theme file at `theme_path` (for tests).
    pub fn rule_based(theme_path: impl Into<PathBuf>) -> Self {
        Self::new(IntentResolver::rule_based(), ThemeStore::new(theme_path))
    }
}

/// Most recent contact submissions, oldest evicted first.
#[derive(Debug, Clone)]
pub struct ContactLog {
    capacity: usize,
    entries: Arc<RwLock<VecDeque<ContactRecord>>>,
}

impl ContactLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    pub async fn push(&self, record: ContactRecord) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write().await;
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(record);
    }

    /// Retained submissions, oldest first.
    pub async fn recent(&self) -> Vec<ContactRecord> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
