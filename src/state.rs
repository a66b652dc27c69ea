use std::sync::Arc;

use crate::config::Config;
use crate::delivery::{BlobStore, WebhookSink};
use crate::stores::StoreDirectory;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub stores: Option<StoreDirectory>,
    pub webhook: Option<WebhookSink>,
    pub blob: Option<BlobStore>,
}
