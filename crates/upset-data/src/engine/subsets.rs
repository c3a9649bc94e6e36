//! Exclusive intersections of the used sets

use std::cmp::Reverse;
use ahash::AHashMap;

use crate::{Set, SubSet};

/// Above this many used sets only observed combinations are materialized
const MAX_ENUMERATED_SETS: usize = 16;

/// Compute one subset per combination of the used sets
///
/// Every element lands in exactly one subset. Unobserved combinations are
/// included (with size zero) when `include_empty` is set. Subsets come out
/// ordered by degree, then by column order.
pub fn compute_subsets(sets: &[Set], item_count: usize, include_empty: bool) -> Vec<SubSet> {
    let set_count = sets.len();
    let mut memberships = vec![vec![0u8; set_count]; item_count];
    for (column, set) in sets.iter().enumerate() {
        for &item in &set.items {
            if let Some(mask) = memberships.get_mut(item) {
                mask[column] = 1;
            }
        }
    }

    let mut observed: AHashMap<Vec<u8>, Vec<usize>> = AHashMap::new();
    for (item, mask) in memberships.into_iter().enumerate() {
        observed.entry(mask).or_default().push(item);
    }

    let mut masks: Vec<Vec<u8>> = if include_empty && set_count <= MAX_ENUMERATED_SETS {
        (0..1usize << set_count)
            .map(|bits| (0..set_count).map(|c| ((bits >> (set_count - 1 - c)) & 1) as u8).collect())
            .collect()
    } else {
        observed.keys().cloned().collect()
    };
    masks.sort_by_key(|mask| (mask.iter().filter(|&&m| m == 1).count(), Reverse(mask.clone())));

    let total = item_count as f64;
    let probabilities = membership_probabilities(sets, item_count);

    masks
        .into_iter()
        .map(|mask| {
            let items = observed.remove(&mask).unwrap_or_default();
            let expected_prob: f64 = mask
                .iter()
                .zip(&probabilities)
                .map(|(&m, &p)| if m == 1 { p } else { 1.0 - p })
                .product();
            let observed_prob = if total > 0.0 { items.len() as f64 / total } else { 0.0 };

            SubSet {
                element_name: subset_name(&mask, sets),
                set_size: items.len(),
                expected_prob,
                disproportionality: if total > 0.0 { observed_prob - expected_prob } else { 0.0 },
                combined_sets: mask,
                items,
            }
        })
        .collect()
}

/// Row id of a subset, derived from its membership vector
pub fn subset_id(subset: &SubSet) -> String {
    let flags: Vec<String> = subset.combined_sets.iter().map(u8::to_string).collect();
    format!("SubSet_{}", flags.join("_"))
}

fn membership_probabilities(sets: &[Set], item_count: usize) -> Vec<f64> {
    sets.iter()
        .map(|set| {
            if item_count == 0 {
                0.0
            } else {
                set.items.iter().filter(|&&i| i < item_count).count() as f64 / item_count as f64
            }
        })
        .collect()
}

fn subset_name(mask: &[u8], sets: &[Set]) -> String {
    let names: Vec<&str> = mask
        .iter()
        .zip(sets)
        .filter(|(m, _)| **m == 1)
        .map(|(_, set)| set.name.as_str())
        .collect();
    if names.is_empty() {
        "No Set".to_string()
    } else {
        names.join(" ∩ ")
    }
}
