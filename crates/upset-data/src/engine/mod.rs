//! In-memory row engine
//!
//! Turns the used sets of a [`Data`] into the render rows of the matrix:
//! exclusive subsets, filtered and sorted, optionally aggregated on two levels.

mod aggregate;
mod subsets;

pub use subsets::{compute_subsets, subset_id};

use crate::{AggregateBy, Data, RenderConfig, RenderRow, SubSet};
use aggregate::{bucket, sort_subsets};

/// Compute the rows to render for `data` under `config`
///
/// `set_filter` restricts the rows to subsets containing the used set at that
/// index.
pub fn render_rows(data: &Data, config: &RenderConfig, set_filter: Option<usize>) -> Vec<RenderRow> {
    let mut subsets = compute_subsets(&data.sets, data.item_count, !config.hide_empties);
    subsets.retain(|s| {
        config.accepts_degree(s.degree())
            && set_filter.map_or(true, |index| s.contains_set(index))
            && (!config.hide_empties || s.set_size > 0)
    });
    sort_subsets(&mut subsets, config.sort_by);

    let set_names = data.set_names();
    let mut rows = Vec::new();

    if config.first_aggregate_by == AggregateBy::None {
        push_subsets(&mut rows, &subsets);
    } else {
        let first = bucket(
            &subsets,
            config.first_aggregate_by,
            config.first_overlap,
            &set_names,
            config.hide_empties,
        );
        for outer in first {
            rows.push(RenderRow::group(format!("Group_{}", outer.key), outer.to_group(1)));

            if config.second_aggregate_by == AggregateBy::None {
                push_subsets(&mut rows, &outer.members);
                continue;
            }

            let second = bucket(
                &outer.members,
                config.second_aggregate_by,
                config.second_overlap,
                &set_names,
                config.hide_empties,
            );
            for inner in second {
                rows.push(RenderRow::group(
                    format!("Group_{}_{}", outer.key, inner.key),
                    inner.to_group(2),
                ));
                push_subsets(&mut rows, &inner.members);
            }
        }
    }

    tracing::debug!("Computed {} render rows for '{}'", rows.len(), data.name);
    rows
}

fn push_subsets(rows: &mut Vec<RenderRow>, subsets: &[SubSet]) {
    rows.extend(subsets.iter().map(|s| RenderRow::subset(subset_id(s), s.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RowData, Set, SortBy};

    /// A = {0, 1, 2}, B = {1, 2, 3}, C = {3}; element 4 is in no set
    fn sample() -> Data {
        Data::new(
            "sample",
            vec![
                Set::new(0, "A", vec![0, 1, 2]),
                Set::new(1, "B", vec![1, 2, 3]),
                Set::new(2, "C", vec![3]),
            ],
            Vec::new(),
            5,
        )
    }

    fn flat(hide_empties: bool) -> RenderConfig {
        RenderConfig {
            first_aggregate_by: AggregateBy::None,
            hide_empties,
            ..RenderConfig::default()
        }
    }

    fn names(rows: &[RenderRow]) -> Vec<&str> {
        rows.iter().map(|r| r.data.element_name()).collect()
    }

    #[test]
    fn test_every_element_lands_in_one_subset() {
        let subsets = compute_subsets(&sample().sets, 5, true);
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets.iter().map(|s| s.set_size).sum::<usize>(), 5);
        assert_eq!(subsets[0].element_name, "No Set");
        assert_eq!(subsets[1].combined_sets, vec![1, 0, 0]);
    }

    #[test]
    fn test_disproportionality_against_independence() {
        let subsets = compute_subsets(&sample().sets, 5, false);
        let only_a = subsets.iter().find(|s| s.combined_sets == vec![1, 0, 0]).unwrap();
        // expected 0.6 * 0.4 * 0.8, observed 1 / 5
        assert!((only_a.expected_prob - 0.192).abs() < 1e-9);
        assert!((only_a.disproportionality - 0.008).abs() < 1e-9);
    }

    #[test]
    fn test_hide_empties_and_cardinality_sort() {
        let rows = render_rows(&sample(), &flat(true), None);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].data.element_name(), "A ∩ B");
        assert_eq!(rows[0].id, "SubSet_1_1_0");

        let all = render_rows(&sample(), &flat(false), None);
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_degree_filters() {
        let config = RenderConfig {
            min_degree: 1,
            max_degree: Some(1),
            ..flat(true)
        };
        let rows = render_rows(&sample(), &config, None);
        assert_eq!(names(&rows), vec!["A"]);
    }

    #[test]
    fn test_set_filter() {
        let rows = render_rows(&sample(), &flat(true), Some(2));
        assert_eq!(names(&rows), vec!["B ∩ C"]);
    }

    #[test]
    fn test_sort_by_set_puts_members_first() {
        let config = RenderConfig {
            sort_by: SortBy::Set(2),
            ..flat(true)
        };
        let rows = render_rows(&sample(), &config, None);
        assert_eq!(rows[0].data.element_name(), "B ∩ C");
    }

    #[test]
    fn test_degree_aggregation_emits_groups() {
        let config = RenderConfig {
            hide_empties: true,
            ..RenderConfig::default()
        };
        let rows = render_rows(&sample(), &config, None);
        let groups: Vec<&str> = rows
            .iter()
            .filter(|r| r.is_group())
            .map(|r| r.data.element_name())
            .collect();
        assert_eq!(groups, vec!["Degree 0", "Degree 1", "Degree 2"]);

        match &rows[4].data {
            RowData::Group(g) => {
                assert_eq!(g.level, 1);
                assert_eq!(g.set_size, 3);
                assert_eq!(g.subset_count, 2);
            }
            other => panic!("expected degree 2 group, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_aggregation() {
        let config = RenderConfig {
            first_aggregate_by: AggregateBy::Sets,
            second_aggregate_by: AggregateBy::Degree,
            hide_empties: true,
            ..RenderConfig::default()
        };
        let rows = render_rows(&sample(), &config, None);

        assert_eq!(rows[0].id, "Group_set_0");
        assert_eq!(rows[1].id, "Group_set_0_degree_1");
        match &rows[1].data {
            RowData::Group(g) => assert_eq!(g.level, 2),
            other => panic!("expected nested group, got {other:?}"),
        }
        assert_eq!(rows[2].data.element_name(), "A");
    }

    #[test]
    fn test_overlap_aggregation() {
        let config = RenderConfig {
            first_aggregate_by: AggregateBy::Overlaps,
            first_overlap: 2,
            hide_empties: true,
            ..RenderConfig::default()
        };
        let rows = render_rows(&sample(), &config, None);
        let groups: Vec<&str> = rows
            .iter()
            .filter(|r| r.is_group())
            .map(|r| r.data.element_name())
            .collect();
        assert_eq!(groups, vec!["A ∩ B", "B ∩ C"]);
    }
}
