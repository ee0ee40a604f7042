//! Document processing pipeline: ingestion (submit + poll) and
//! schema-agnostic normalization.

pub mod ingest;
pub mod normalize;
