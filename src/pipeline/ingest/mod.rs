//! Ingestion pipeline — submit a PDF report to the extraction service and
//! poll for results under a bounded, fixed-interval retry policy.
//!
//! Module boundaries:
//! - `client`: transport only — two HTTP calls, no retry knowledge
//! - `poller`: the bounded retry loop and its state machine
//! - `runner`: end-to-end orchestration (submit → poll → normalize → save)

pub mod client;
pub mod error;
pub mod poller;
pub mod runner;
pub mod types;

pub use client::{ExtractionApi, HttpExtractionClient, MockExtractionClient};
pub use error::IngestError;
pub use poller::{PollOrchestrator, PollPolicy};
pub use runner::{IngestPhase, IngestService};
pub use types::{JobHandle, RawExtractionResult, UploadFile};
