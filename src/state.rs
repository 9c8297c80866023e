use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;
use crate::token::TokenMaker;

/// The application's state.
///
/// Everything here is read-only after startup and shared by every request.
#[derive(Clone)]
pub struct AppState<S: Store> {
    /// The data-access collaborator.
    pub store: S,
    /// The token maker selected at startup.
    pub tokens: Arc<dyn TokenMaker>,
    /// The application's configuration.
    pub config: Arc<Config>,
}

impl<S: Store> AppState<S> {
    /// Creates a new `AppState`.
    pub fn new(store: S, tokens: Arc<dyn TokenMaker>, config: Config) -> Self {
        Self {
            store,
            tokens,
            config: Arc::new(config),
        }
    }
}
