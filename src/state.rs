use crate::storage::VisitStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VisitStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitStore>) -> Self {
        Self { store }
    }
}
