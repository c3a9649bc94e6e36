use thiserror::Error;
use upset_core::ProvenanceError;
use upset_data::DataError;

use crate::actions::Action;

/// Errors raised by the view-models
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("selection index {index} is out of bounds (selections: {len})")]
    StaleSelectionIndex { index: usize, len: usize },

    #[error("argument {position} is not a {expected}")]
    ArgumentMismatch {
        position: usize,
        expected: &'static str,
    },

    #[error("no dataset has been loaded")]
    NoDataset,

    #[error("action '{0}' is not handled here")]
    UnsupportedAction(Action),

    #[error(transparent)]
    Provenance(#[from] ProvenanceError),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ViewError {
    /// Find a view error anywhere in an error chain
    pub fn find(error: &anyhow::Error) -> Option<&ViewError> {
        error.chain().find_map(|cause| cause.downcast_ref::<ViewError>())
    }
}
