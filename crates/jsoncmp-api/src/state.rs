//! Shared handler state

use jsoncmp_engine::Comparator;
use std::sync::Arc;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<Comparator>,
}

impl AppState {
    pub fn new(comparator: Comparator) -> Self {
        Self {
            comparator: Arc::new(comparator),
        }
    }
}
