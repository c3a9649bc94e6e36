//! Application-wide events shared by every view-model

use std::sync::Arc;
use upset_core::Event;
use upset_data::{Data, DataSetInfo, RenderConfig, RenderRow, SelectionEntry, Set};

/// How a filter change affects the set filter of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetFilterChange {
    Unchanged,
    /// Show only subsets containing the used set at this index
    Only(usize),
    Cleared,
}

/// Events of the application bus
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The dataset manifest was read
    DatasetsDiscovered(Vec<DataSetInfo>),
    /// A dataset was picked in the navbar
    ChangeDataset(DataSetInfo),
    /// The picked dataset loaded and replaced the previous one
    DatasetChanged(DataSetInfo),
    /// The data engine produced new rows
    RenderRowsChanged(Arc<Data>),
    FilterChanged {
        config: Option<RenderConfig>,
        set_filter: SetFilterChange,
    },
    /// Reset the first aggregation to none
    SetAggNone,
    SortBySet(usize),
    SortByCardinality,
    SortByDeviation,
    RemoveSet(Set),
    AddSet(Set),
    /// Append a selection built from a row
    AddSelection(RenderRow),
    /// Reinsert a previously removed selection at its old position
    InsertSelection {
        index: usize,
        entry: SelectionEntry,
    },
    RemoveSelection(usize),
    /// Request a reversible selection from anywhere in the application
    AddSelectionTrigger(RenderRow),
    RemoveSelectionTrigger(usize),
}

/// Subscription keys of [`AppEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppEventKind {
    DatasetsDiscovered,
    ChangeDataset,
    DatasetChanged,
    RenderRowsChanged,
    FilterChanged,
    SetAggNone,
    SortBySet,
    SortByCardinality,
    SortByDeviation,
    RemoveSet,
    AddSet,
    AddSelection,
    InsertSelection,
    RemoveSelection,
    AddSelectionTrigger,
    RemoveSelectionTrigger,
}

impl Event for AppEvent {
    type Kind = AppEventKind;

    fn kind(&self) -> AppEventKind {
        match self {
            AppEvent::DatasetsDiscovered(_) => AppEventKind::DatasetsDiscovered,
            AppEvent::ChangeDataset(_) => AppEventKind::ChangeDataset,
            AppEvent::DatasetChanged(_) => AppEventKind::DatasetChanged,
            AppEvent::RenderRowsChanged(_) => AppEventKind::RenderRowsChanged,
            AppEvent::FilterChanged { .. } => AppEventKind::FilterChanged,
            AppEvent::SetAggNone => AppEventKind::SetAggNone,
            AppEvent::SortBySet(_) => AppEventKind::SortBySet,
            AppEvent::SortByCardinality => AppEventKind::SortByCardinality,
            AppEvent::SortByDeviation => AppEventKind::SortByDeviation,
            AppEvent::RemoveSet(_) => AppEventKind::RemoveSet,
            AppEvent::AddSet(_) => AppEventKind::AddSet,
            AppEvent::AddSelection(_) => AppEventKind::AddSelection,
            AppEvent::InsertSelection { .. } => AppEventKind::InsertSelection,
            AppEvent::RemoveSelection(_) => AppEventKind::RemoveSelection,
            AppEvent::AddSelectionTrigger(_) => AppEventKind::AddSelectionTrigger,
            AppEvent::RemoveSelectionTrigger(_) => AppEventKind::RemoveSelectionTrigger,
        }
    }
}
