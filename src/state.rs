//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::FeedConfig;
use crate::stream::SubscriberRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FeedConfig>,
    pub subscribers: Arc<SubscriberRegistry>,
}

impl AppState {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config: Arc::new(config),
            subscribers: Arc::new(SubscriberRegistry::new()),
        }
    }
}
