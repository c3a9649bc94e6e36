//! Selected rows and the element records derived from them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Attribute, RenderRow};

/// Attribute values of a single element, keyed by attribute name
pub type ElementRecord = IndexMap<String, Value>;

/// A row selected for the element view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: String,
    pub row: RenderRow,
    /// One record per element of the row, in item order
    pub elements: Vec<ElementRecord>,
}

impl SelectionEntry {
    /// Build the selection for `row`, reading each element's values from `attributes`
    pub fn from_row(row: &RenderRow, attributes: &[Attribute]) -> Self {
        let elements = row
            .data
            .items()
            .iter()
            .map(|&item| {
                attributes
                    .iter()
                    .filter(|attr| !attr.is_sets())
                    .map(|attr| (attr.name.clone(), attr.value(item)))
                    .collect()
            })
            .collect();

        Self {
            id: row.id.clone(),
            row: row.clone(),
            elements,
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeType, SubSet};
    use serde_json::json;

    #[test]
    fn test_records_follow_row_items() {
        let attributes = vec![
            Attribute::new("Name", AttributeType::Id, vec![json!("a"), json!("b"), json!("c")]),
            Attribute::new("Age", AttributeType::Integer, vec![json!(31), json!(42)]),
            Attribute::new("Sets", AttributeType::Sets, vec![json!([]), json!([]), json!([])]),
        ];
        let row = RenderRow::subset(
            "SubSet_1_0",
            SubSet {
                element_name: "A".into(),
                combined_sets: vec![1, 0],
                set_size: 2,
                expected_prob: 0.5,
                disproportionality: 0.1,
                items: vec![2, 0],
            },
        );

        let entry = SelectionEntry::from_row(&row, &attributes);
        assert_eq!(entry.id, "SubSet_1_0");
        assert_eq!(entry.element_count(), 2);
        assert_eq!(entry.elements[0].get("Name"), Some(&json!("c")));
        assert_eq!(entry.elements[0].get("Age"), Some(&Value::Null));
        assert_eq!(entry.elements[1].get("Age"), Some(&json!(31)));
        assert!(entry.elements[0].get("Sets").is_none());
        let keys: Vec<&String> = entry.elements[1].keys().collect();
        assert_eq!(keys, vec!["Name", "Age"]);
    }
}
