//! Views rendering view-model updates to the log

use std::sync::Arc;
use tracing::info;
use upset_core::EventBus;
use upset_data::{RenderRow, RowData};
use upset_views::{
    DataSetInfoEvent, DataSetInfoEventKind, ElementEvent, ElementEventKind, FilterBoxEvent, FilterBoxEventKind,
    NavBarEvent, NavBarEventKind, SessionViews, UpsetEvent, UpsetEventKind, View,
};

/// Logs every update it receives
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleView;

/// Console views for every region of the application
pub fn views() -> SessionViews {
    let view = Arc::new(ConsoleView);
    SessionViews {
        navbar: view.clone(),
        dataset_info: view.clone(),
        filter_box: view.clone(),
        upset: view.clone(),
        elements: view,
    }
}

impl View<NavBarEvent> for ConsoleView {
    fn create(&self, comm: &EventBus<NavBarEvent>) {
        comm.on(NavBarEventKind::Update, |event| {
            if let NavBarEvent::Update(datasets) = event {
                let names: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
                info!("[navbar] datasets: {}", names.join(", "));
            }
            Ok(())
        });
    }
}

impl View<DataSetInfoEvent> for ConsoleView {
    fn create(&self, comm: &EventBus<DataSetInfoEvent>) {
        comm.on(DataSetInfoEventKind::Update, |event| {
            let DataSetInfoEvent::Update { current, .. } = event;
            if let Some(info) = current {
                info!(
                    "[dataset] {} ({} sets, {} attributes) {}",
                    info.name, info.set_count, info.attribute_count, info.description
                );
            }
            Ok(())
        });
    }
}

impl View<FilterBoxEvent> for ConsoleView {
    fn create(&self, comm: &EventBus<FilterBoxEvent>) {
        comm.on(FilterBoxEventKind::Update, |event| {
            if let FilterBoxEvent::Update(config) = event {
                info!(
                    "[filters] first={:?}/{} second={:?}/{} sort={:?} degree={}..{} hide_empty={}",
                    config.first_aggregate_by,
                    config.first_overlap,
                    config.second_aggregate_by,
                    config.second_overlap,
                    config.sort_by,
                    config.min_degree,
                    config.max_degree.map(|d| d.to_string()).unwrap_or_default(),
                    config.hide_empties
                );
            }
            Ok(())
        });
    }
}

impl View<UpsetEvent> for ConsoleView {
    fn create(&self, comm: &EventBus<UpsetEvent>) {
        comm.on(UpsetEventKind::Update, |event| {
            if let UpsetEvent::Update(data) = event {
                info!(
                    "[matrix] {} rows over sets {}",
                    data.render_rows.len(),
                    data.set_names().join(", ")
                );
            }
            Ok(())
        });
    }
}

impl View<ElementEvent> for ConsoleView {
    fn create(&self, comm: &EventBus<ElementEvent>) {
        comm.on(ElementEventKind::Update, |event| {
            if let ElementEvent::Update { selections, .. } = event {
                for (index, selection) in selections.iter().enumerate() {
                    info!(
                        "[elements] #{} {} ({} elements)",
                        index,
                        selection.row.data.element_name(),
                        selection.element_count()
                    );
                }
            }
            Ok(())
        });
    }
}

/// One line of the row listing
pub fn describe_row(position: usize, row: &RenderRow) -> String {
    match &row.data {
        RowData::Group(group) => format!(
            "{:>3} {}{} [{}]",
            position,
            "  ".repeat(usize::from(group.level.saturating_sub(1))),
            group.element_name,
            group.set_size
        ),
        RowData::SubSet(subset) => {
            let glyphs: String = subset
                .combined_sets
                .iter()
                .map(|&member| if member == 1 { '●' } else { '○' })
                .collect();
            format!(
                "{:>3}     {} {:<30} {:>4} {:+.3}",
                position, glyphs, subset.element_name, subset.set_size, subset.disproportionality
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upset_data::{Group, SubSet};

    #[test]
    fn test_describe_rows() {
        let subset = RenderRow::subset(
            "SubSet_1_0_1",
            SubSet {
                element_name: "A ∩ C".into(),
                combined_sets: vec![1, 0, 1],
                set_size: 4,
                expected_prob: 0.1,
                disproportionality: 0.25,
                items: vec![0, 1, 2, 3],
            },
        );
        let line = describe_row(2, &subset);
        assert!(line.contains("●○●"));
        assert!(line.contains("+0.250"));

        let group = RenderRow::group(
            "Group_2",
            Group {
                element_name: "Degree 2".into(),
                level: 1,
                set_size: 9,
                ..Group::default()
            },
        );
        assert_eq!(describe_row(0, &group), "  0 Degree 2 [9]");
    }
}
