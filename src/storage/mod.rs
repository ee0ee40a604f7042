//! Report persistence — the whole collection lives in a single JSON blob.
//!
//! Every mutation is a whole-collection read-modify-write. The collection
//! is small and single-writer by assumption; two concurrent writers can
//! drop each other's writes (known limitation, not fixed). A blob that
//! fails to parse is treated as an empty collection so storage corruption
//! never bricks the caller.

mod report_store;

pub use report_store::{InMemoryStore, JsonFileStore, ReportStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
