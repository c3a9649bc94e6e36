//! Data model for the UpSet visualization
//!
//! Sets, attributes, render rows, the session-scoped render configuration and
//! a small in-memory engine that turns set memberships into render rows.

pub mod attributes;
pub mod config;
pub mod dataset;
pub mod elements;
pub mod engine;
pub mod rows;
pub mod sets;
pub mod source;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use attributes::{Attribute, AttributeType};
pub use config::{AggregateBy, RenderConfig, RenderConfigStore, SessionStorage, SortBy};
pub use dataset::{Data, DataSetInfo, DataSetJson};
pub use elements::SelectionEntry;
pub use rows::{Group, RenderRow, RowData, SubSet};
pub use sets::Set;
pub use source::{DataProvider, InMemoryProvider};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Dataset '{0}' not found")]
    DatasetNotFound(String),

    #[error("Unknown set '{0}'")]
    UnknownSet(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}
