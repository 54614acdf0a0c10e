//! Tipsheet - email tip ingestion for the league spreadsheet
//!
//! Players email their score predictions ("tips") to a shared mailbox. Each
//! mailbox push notification triggers one ingestion run: list the messages
//! added since the stored cursor, persist the new cursor, parse tip lines out
//! of the message bodies, validate them against the player and match tables,
//! and write the surviving tips to the spreadsheet in one batched update.
//!
//! ## Module Organization
//!
//! - `adapters/`: collaborator interfaces (mailbox feed, message store,
//!   cursor store, sheet writer) - injected, so tests substitute doubles
//! - `config/`: configuration management
//! - `parser/`: free-text message body -> tip candidates
//! - `reference/`: immutable player and match lookup tables
//! - `resolver/`: candidate validation and deadline enforcement
//! - `services/`: the ingestion orchestrator and batch writer
//! - `types/`: wire payloads, domain types and errors
//!
//! The webhook transport, push-subscription renewal and OAuth handling live
//! in the host application, not here; this crate starts from a decoded
//! notification payload.

pub mod adapters;
pub mod config;
pub mod parser;
pub mod reference;
pub mod resolver;
pub mod services;
pub mod types;

pub use services::ingest::Ingestor;
pub use types::error::{IngestError, Result};
