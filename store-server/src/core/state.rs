use std::sync::Arc;

use crate::checkout::CheckoutManager;
use crate::core::Config;
use crate::store::CatalogStore;

/// Server state holding shared service references
///
/// Cloning is shallow: every handler gets cheap `Arc` copies of the catalog
/// store and the checkout manager.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration (immutable)
    pub config: Config,
    /// Catalog item store (read-mostly, coordination-free reads)
    pub catalog: Arc<CatalogStore>,
    /// Order/quote lifecycle manager (sole writer of status transitions)
    pub checkout: Arc<CheckoutManager>,
}

impl ServerState {
    /// Initialize server state from configuration
    pub fn initialize(config: &Config) -> Self {
        let checkout = CheckoutManager::new(
            config.default_currency.clone(),
            config.quote_validity_days,
        );
        Self {
            config: config.clone(),
            catalog: Arc::new(CatalogStore::new()),
            checkout: Arc::new(checkout),
        }
    }
}
