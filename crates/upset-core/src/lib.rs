//! Interaction core for the UpSet visualization
//! 
//! This crate provides the typed event bus, the command registry and the
//! provenance graph that every view-model builds its reversible actions on.

pub mod commands;
pub mod error;
pub mod events;
pub mod provenance;

// Re-export commonly used types
pub use commands::{ActionKey, ActionName, CommandRegistry, Direction, Handler};
pub use error::ProvenanceError;
pub use events::{Event, EventBus, Listener};
pub use provenance::{ActionRecord, Invocation, ProvenanceGraph, RecordRef};
