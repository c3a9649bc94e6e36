//! Grouping and ordering of subsets

use std::collections::BTreeMap;

use crate::{AggregateBy, Group, SortBy, SubSet};

/// Upper bound on the number of overlap buckets built for one render
pub(crate) const MAX_OVERLAP_BUCKETS: usize = 1024;

/// Subsets collected under one aggregation label
#[derive(Debug, Clone)]
pub(crate) struct Bucket {
    pub key: String,
    pub label: String,
    pub members: Vec<SubSet>,
}

impl Bucket {
    fn new(key: String, label: String) -> Self {
        Self {
            key,
            label,
            members: Vec::new(),
        }
    }

    /// Summarize the bucket as a group row payload
    pub fn to_group(&self, level: u8) -> Group {
        Group {
            element_name: self.label.clone(),
            level,
            set_size: self.members.iter().map(|s| s.set_size).sum(),
            expected_prob: self.members.iter().map(|s| s.expected_prob).sum(),
            disproportionality: self.members.iter().map(|s| s.disproportionality).sum(),
            items: self.members.iter().flat_map(|s| s.items.iter().copied()).collect(),
            subset_count: self.members.len(),
        }
    }
}

/// Split already-sorted subsets into buckets, keeping member order
///
/// Returns no buckets for `AggregateBy::None`. Buckets without members are
/// dropped when `hide_empties` is set.
pub(crate) fn bucket(
    subsets: &[SubSet],
    by: AggregateBy,
    overlap: usize,
    set_names: &[String],
    hide_empties: bool,
) -> Vec<Bucket> {
    let mut buckets = match by {
        AggregateBy::None => Vec::new(),
        AggregateBy::Degree => {
            let mut by_degree: BTreeMap<usize, Bucket> = BTreeMap::new();
            for subset in subsets {
                let degree = subset.degree();
                by_degree
                    .entry(degree)
                    .or_insert_with(|| Bucket::new(format!("degree_{degree}"), format!("Degree {degree}")))
                    .members
                    .push(subset.clone());
            }
            by_degree.into_values().collect()
        }
        AggregateBy::Sets => set_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let mut bucket = Bucket::new(format!("set_{index}"), name.clone());
                bucket.members = subsets.iter().filter(|s| s.contains_set(index)).cloned().collect();
                bucket
            })
            .collect(),
        AggregateBy::DeviationBins => {
            let mut positive = Bucket::new("deviation_positive".into(), "Positive Deviation".into());
            let mut negative = Bucket::new("deviation_negative".into(), "Negative Deviation".into());
            for subset in subsets {
                if subset.disproportionality >= 0.0 {
                    positive.members.push(subset.clone());
                } else {
                    negative.members.push(subset.clone());
                }
            }
            vec![positive, negative]
        }
        AggregateBy::Overlaps => {
            let combos = combinations(set_names.len(), overlap, MAX_OVERLAP_BUCKETS);
            if combos.len() == MAX_OVERLAP_BUCKETS {
                tracing::warn!(
                    "Overlap aggregation of {} sets by {} capped at {} buckets",
                    set_names.len(),
                    overlap,
                    MAX_OVERLAP_BUCKETS
                );
            }
            combos
                .into_iter()
                .map(|combo| {
                    let key: Vec<String> = combo.iter().map(usize::to_string).collect();
                    let label: Vec<&str> = combo.iter().map(|&i| set_names[i].as_str()).collect();
                    let mut bucket = Bucket::new(format!("overlap_{}", key.join("_")), label.join(" ∩ "));
                    bucket.members = subsets
                        .iter()
                        .filter(|s| combo.iter().all(|&i| s.contains_set(i)))
                        .cloned()
                        .collect();
                    bucket
                })
                .collect()
        }
    };

    if hide_empties {
        buckets.retain(|b| !b.members.is_empty());
    }
    buckets
}

/// Order subsets in place
pub(crate) fn sort_subsets(subsets: &mut [SubSet], sort_by: SortBy) {
    match sort_by {
        SortBy::Cardinality => subsets.sort_by(|a, b| {
            b.set_size.cmp(&a.set_size).then_with(|| a.degree().cmp(&b.degree()))
        }),
        SortBy::Degree => subsets.sort_by(|a, b| {
            a.degree().cmp(&b.degree()).then_with(|| b.set_size.cmp(&a.set_size))
        }),
        SortBy::Deviation => subsets.sort_by(|a, b| {
            b.disproportionality
                .abs()
                .total_cmp(&a.disproportionality.abs())
        }),
        SortBy::Set(index) => subsets.sort_by(|a, b| {
            b.contains_set(index)
                .cmp(&a.contains_set(index))
                .then_with(|| b.set_size.cmp(&a.set_size))
        }),
    }
}

/// The first `limit` `k`-element combinations of `0..n`, in lexicographic order
fn combinations(n: usize, k: usize, limit: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > n || limit == 0 {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut combo: Vec<usize> = (0..k).collect();
    loop {
        result.push(combo.clone());
        if result.len() == limit {
            return result;
        }
        let Some(pivot) = (0..k).rev().find(|&i| combo[i] != i + n - k) else {
            return result;
        };
        combo[pivot] += 1;
        for i in pivot + 1..k {
            combo[i] = combo[i - 1] + 1;
        }
    }
}
