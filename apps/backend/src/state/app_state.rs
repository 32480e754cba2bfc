use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::TokenService;
use crate::repos::{MemoryUserStore, UserStore};

/// Application state shared by every worker.
///
/// Everything here is either immutable after startup or synchronizes
/// internally.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token issuance and verification, keyed by the startup secret
    pub tokens: TokenService,
    /// Credential store
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(security: SecurityConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            tokens: TokenService::new(security),
            users,
        }
    }

    /// State backed by an empty in-process credential store.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(security, Arc::new(MemoryUserStore::new()))
    }

    /// In-memory state with the fixed test secret.
    pub fn for_tests() -> Self {
        Self::in_memory(SecurityConfig::for_tests())
    }
}
