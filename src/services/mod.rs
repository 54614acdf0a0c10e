//! Pipeline services
//!
//! Host-agnostic business logic: the ingestion orchestrator and the batch
//! writer. Everything here talks to the outside world only through the
//! collaborator traits in `adapters`.

pub mod ingest;
pub mod writer;
