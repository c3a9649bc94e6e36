use thiserror::Error;

use crate::commands::Direction;

/// Errors raised by the command registry and the provenance graph
#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("no {direction} handler registered for action '{action}'")]
    UnregisteredCommand {
        action: String,
        direction: Direction,
    },

    #[error("{direction} handler for action '{action}' failed")]
    Handler {
        action: String,
        direction: Direction,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvenanceError {
    /// The handler error, if this wraps one
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            ProvenanceError::Handler { source, .. } => Some(source),
            ProvenanceError::UnregisteredCommand { .. } => None,
        }
    }
}
