use std::sync::Arc;

use crate::client::FlagClient;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn FlagClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn FlagClient>) -> Self {
        Self { client }
    }
}
