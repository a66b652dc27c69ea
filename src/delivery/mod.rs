pub mod blob;
pub mod webhook;

pub use blob::BlobStore;
pub use webhook::WebhookSink;
