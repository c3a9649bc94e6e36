//! Per-element attributes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the synthetic attribute listing each element's sets
pub const SETS_ATTRIBUTE: &str = "Sets";

/// Attribute value type, as declared by the dataset description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Id,
    Integer,
    Float,
    String,
    Sets,
}

/// A column of per-element values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    /// One value per dataset element, indexed by element
    pub values: Vec<Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Whether this is the set-membership attribute rather than element data
    pub fn is_sets(&self) -> bool {
        self.kind == AttributeType::Sets || self.name == SETS_ATTRIBUTE
    }

    /// Value for an element, `Null` when out of range
    pub fn value(&self, item: usize) -> Value {
        self.values.get(item).cloned().unwrap_or(Value::Null)
    }
}
