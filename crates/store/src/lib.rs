//! Remote store boundary.
//!
//! The service only ever inserts: one JSON record into one named collection.
//! Whatever durability or uniqueness rules exist live on the remote side.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Failure to record an insert on the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to store failed: {0}")]
    Request(String),

    #[error("store rejected insert with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid collection name {0:?}")]
    InvalidCollection(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Insert-only access to a remote collection store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short label used in logs.
    fn kind(&self) -> &'static str;

    /// Insert one record into `collection`.
    async fn insert(&self, collection: &str, record: serde_json::Value) -> Result<(), StoreError>;
}
