//! Sets of the loaded dataset

use serde::{Deserialize, Serialize};

/// A named set of dataset elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    /// Position of the set in the dataset description; stable across removal
    pub id: usize,
    pub name: String,
    /// Indices of the member elements
    pub items: Vec<usize>,
}

impl Set {
    pub fn new(id: usize, name: impl Into<String>, items: Vec<usize>) -> Self {
        Self {
            id,
            name: name.into(),
            items,
        }
    }

    /// Cardinality of the set
    pub fn set_size(&self) -> usize {
        self.items.len()
    }
}
