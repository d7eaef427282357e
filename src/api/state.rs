//! Shared application state for the salary engine API.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::calculation::{EwaLedger, SalaryResolver};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Configuration and the resolver are read-only after startup. The EWA
/// ledger is the only mutable state and sits behind a read-write lock.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    resolver: SalaryResolver,
    ledger: Arc<RwLock<EwaLedger>>,
}

impl AppState {
    /// Creates application state with an empty withdrawal ledger.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_ledger(config, EwaLedger::new())
    }

    /// Creates application state around an existing ledger.
    pub fn with_ledger(config: ConfigLoader, ledger: EwaLedger) -> Self {
        let resolver = SalaryResolver::new(config.policy().statutory.clone());
        Self {
            config: Arc::new(config),
            resolver,
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the salary resolver configured from the statutory policy.
    pub fn resolver(&self) -> &SalaryResolver {
        &self.resolver
    }

    /// Returns the EWA withdrawal ledger.
    pub fn ledger(&self) -> &RwLock<EwaLedger> {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_the_ledger() {
        let state = AppState::new(ConfigLoader::standard());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.ledger, &clone.ledger));
        assert!(clone.ledger().read().await.withdrawals().is_empty());
    }

    #[test]
    fn test_resolver_uses_configured_policy() {
        let state = AppState::new(ConfigLoader::standard());
        assert_eq!(state.resolver().policy(), &state.config().policy().statutory);
    }
}
