//! Loaded datasets and their descriptions

mod info;

pub use info::{discover, DataSetInfo, DataSetJson, MetaDescriptor, SetDescriptor};

use serde::{Deserialize, Serialize};

use crate::{Attribute, DataError, RenderRow, Set};

/// A loaded dataset together with its current render rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub name: String,
    /// Sets currently shown as matrix columns
    pub sets: Vec<Set>,
    /// Sets removed from the matrix
    pub unused_sets: Vec<Set>,
    pub attributes: Vec<Attribute>,
    pub item_count: usize,
    pub render_rows: Vec<RenderRow>,
}

impl Data {
    pub fn new(name: impl Into<String>, sets: Vec<Set>, attributes: Vec<Attribute>, item_count: usize) -> Self {
        Self {
            name: name.into(),
            sets,
            unused_sets: Vec::new(),
            attributes,
            item_count,
            render_rows: Vec::new(),
        }
    }

    /// Attributes describing elements, without the set-membership column
    pub fn valid_attributes(&self) -> Vec<Attribute> {
        self.attributes.iter().filter(|a| !a.is_sets()).cloned().collect()
    }

    /// Names of the used sets, in column order
    pub fn set_names(&self) -> Vec<String> {
        self.sets.iter().map(|s| s.name.clone()).collect()
    }

    /// Move a used set to the unused list
    pub fn remove_set(&mut self, name: &str) -> Result<Set, DataError> {
        let index = self
            .sets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| DataError::UnknownSet(name.to_string()))?;
        let set = self.sets.remove(index);
        self.unused_sets.push(set.clone());
        Ok(set)
    }

    /// Bring a set back into the matrix at its original column position
    pub fn add_set(&mut self, set: Set) {
        self.unused_sets.retain(|s| s.id != set.id);
        if self.sets.iter().any(|s| s.id == set.id) {
            return;
        }
        let index = self.sets.partition_point(|s| s.id < set.id);
        self.sets.insert(index, set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeType;
    use serde_json::json;

    fn sample() -> Data {
        Data::new(
            "sample",
            vec![
                Set::new(0, "A", vec![0, 1]),
                Set::new(1, "B", vec![1, 2]),
                Set::new(2, "C", vec![2]),
            ],
            vec![
                Attribute::new("Name", AttributeType::Id, vec![json!("x"), json!("y"), json!("z")]),
                Attribute::new("Sets", AttributeType::Sets, vec![json!(["A"]), json!(["A", "B"]), json!(["B", "C"])]),
            ],
            3,
        )
    }

    #[test]
    fn test_remove_and_add_set_restores_column_order() {
        let mut data = sample();
        let removed = data.remove_set("B").unwrap();
        assert_eq!(data.set_names(), vec!["A", "C"]);
        assert_eq!(data.unused_sets.len(), 1);

        data.add_set(removed);
        assert_eq!(data.set_names(), vec!["A", "B", "C"]);
        assert!(data.unused_sets.is_empty());
    }

    #[test]
    fn test_remove_unknown_set() {
        let mut data = sample();
        assert!(matches!(data.remove_set("Z"), Err(DataError::UnknownSet(_))));
    }

    #[test]
    fn test_valid_attributes_skip_sets() {
        let names: Vec<String> = sample().valid_attributes().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Name"]);
    }
}
