use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Store;
use crate::payments::PaymentProvider;

/// Process-wide service state: owned configuration, the shared store
/// handle, and the payment provider client.
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub payments: PaymentProvider,
}

pub type SharedState = Arc<AppState>;
