//! Rows of the combination matrix

use serde::{Deserialize, Serialize};

/// A row of the matrix: an aggregation group or a subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRow {
    pub id: String,
    pub data: RowData,
}

/// Payload of a render row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RowData {
    Group(Group),
    SubSet(SubSet),
}

/// Aggregation of subsets under one label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub element_name: String,
    /// Nesting level, 1 for first-level aggregation
    pub level: u8,
    pub set_size: usize,
    pub expected_prob: f64,
    pub disproportionality: f64,
    pub items: Vec<usize>,
    /// Number of subsets aggregated by this group
    pub subset_count: usize,
}

/// One exclusive intersection of the used sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSet {
    pub element_name: String,
    /// Membership flag (0 or 1) per used set, in used-set order
    pub combined_sets: Vec<u8>,
    pub set_size: usize,
    pub expected_prob: f64,
    pub disproportionality: f64,
    pub items: Vec<usize>,
}

impl SubSet {
    /// Number of sets participating in this intersection
    pub fn degree(&self) -> usize {
        self.combined_sets.iter().filter(|&&m| m == 1).count()
    }

    /// Whether the set at `index` (in used-set order) participates
    pub fn contains_set(&self, index: usize) -> bool {
        self.combined_sets.get(index).copied() == Some(1)
    }
}

impl RowData {
    pub fn element_name(&self) -> &str {
        match self {
            RowData::Group(g) => &g.element_name,
            RowData::SubSet(s) => &s.element_name,
        }
    }

    pub fn set_size(&self) -> usize {
        match self {
            RowData::Group(g) => g.set_size,
            RowData::SubSet(s) => s.set_size,
        }
    }

    pub fn disproportionality(&self) -> f64 {
        match self {
            RowData::Group(g) => g.disproportionality,
            RowData::SubSet(s) => s.disproportionality,
        }
    }

    /// Element indices covered by the row
    pub fn items(&self) -> &[usize] {
        match self {
            RowData::Group(g) => &g.items,
            RowData::SubSet(s) => &s.items,
        }
    }
}

impl RenderRow {
    pub fn subset(id: impl Into<String>, subset: SubSet) -> Self {
        Self {
            id: id.into(),
            data: RowData::SubSet(subset),
        }
    }

    pub fn group(id: impl Into<String>, group: Group) -> Self {
        Self {
            id: id.into(),
            data: RowData::Group(group),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.data, RowData::Group(_))
    }

    pub fn as_subset(&self) -> Option<&SubSet> {
        match &self.data {
            RowData::SubSet(s) => Some(s),
            RowData::Group(_) => None,
        }
    }
}
