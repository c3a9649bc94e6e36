//! Element view-model
//!
//! Keeps the ordered list of selected rows together with the element records
//! of each row. Selections are added and removed through reversible actions;
//! removing a selection captures the entry so undo reinserts it at the same
//! position.

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, warn};
use upset_core::{Direction, Event, EventBus, Invocation};
use upset_data::{Attribute, Data, RenderRow, SelectionEntry};

use crate::actions::{Action, ActionArg, ArgsExt};
use crate::application::Application;
use crate::error::ViewError;
use crate::events::{AppEvent, AppEventKind};
use crate::view_model::{View, ViewModelBase};

/// Events between the element view-model and its view
#[derive(Debug, Clone)]
pub enum ElementEvent {
    /// The user picked a row to inspect
    AddSelectionTrigger(RenderRow),
    /// The user closed the selection at this index
    RemoveSelectionTrigger(usize),
    Update {
        selections: Vec<SelectionEntry>,
        attributes: Vec<Attribute>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementEventKind {
    AddSelectionTrigger,
    RemoveSelectionTrigger,
    Update,
}

impl Event for ElementEvent {
    type Kind = ElementEventKind;

    fn kind(&self) -> ElementEventKind {
        match self {
            ElementEvent::AddSelectionTrigger(_) => ElementEventKind::AddSelectionTrigger,
            ElementEvent::RemoveSelectionTrigger(_) => ElementEventKind::RemoveSelectionTrigger,
            ElementEvent::Update { .. } => ElementEventKind::Update,
        }
    }
}

#[derive(Default)]
struct ElementState {
    dataset: Option<Arc<Data>>,
    selections: Vec<SelectionEntry>,
}

/// View-model of the element (detail) panel
pub struct ElementViewModel {
    base: ViewModelBase<ElementEvent>,
    state: Arc<RwLock<ElementState>>,
}

impl ElementViewModel {
    pub fn new(view: Arc<dyn View<ElementEvent>>, app: Application) -> Self {
        let vm = Self {
            base: ViewModelBase::new(view, app),
            state: Arc::new(RwLock::new(ElementState::default())),
        };
        vm.subscribe_app();
        vm.register_actions();
        vm.subscribe_view();
        vm.base.create_view();
        vm
    }

    /// The local bus shared with the paired view
    pub fn comm(&self) -> &EventBus<ElementEvent> {
        self.base.comm()
    }

    /// Current selections in insertion order
    pub fn selections(&self) -> Vec<SelectionEntry> {
        self.state.read().selections.clone()
    }

    pub fn selection_count(&self) -> usize {
        self.state.read().selections.len()
    }

    fn subscribe_app(&self) {
        let app = self.base.app();

        let (state, comm) = (self.state.clone(), self.comm().clone());
        app.on(AppEventKind::RenderRowsChanged, move |event| {
            if let AppEvent::RenderRowsChanged(data) = event {
                {
                    let mut state = state.write();
                    let same_dataset = state.dataset.as_ref().map(|d| d.name == data.name).unwrap_or(false);
                    if !same_dataset && !state.selections.is_empty() {
                        debug!("Dataset changed to {}, clearing {} selection(s)", data.name, state.selections.len());
                        state.selections.clear();
                    }
                    state.dataset = Some(data.clone());
                }
                publish(&state, &comm)?;
            }
            Ok(())
        });

        let (state, comm) = (self.state.clone(), self.comm().clone());
        app.on(AppEventKind::AddSelection, move |event| {
            if let AppEvent::AddSelection(row) = event {
                {
                    let mut state = state.write();
                    let data = state.dataset.clone().ok_or(ViewError::NoDataset)?;
                    state.selections.push(SelectionEntry::from_row(row, &data.attributes));
                }
                publish(&state, &comm)?;
            }
            Ok(())
        });

        let (state, comm) = (self.state.clone(), self.comm().clone());
        app.on(AppEventKind::InsertSelection, move |event| {
            if let AppEvent::InsertSelection { index, entry } = event {
                {
                    let mut state = state.write();
                    let len = state.selections.len();
                    if *index > len {
                        return Err(ViewError::StaleSelectionIndex { index: *index, len }.into());
                    }
                    state.selections.insert(*index, entry.clone());
                }
                publish(&state, &comm)?;
            }
            Ok(())
        });

        let (state, comm) = (self.state.clone(), self.comm().clone());
        app.on(AppEventKind::RemoveSelection, move |event| {
            if let AppEvent::RemoveSelection(index) = event {
                {
                    let mut state = state.write();
                    let len = state.selections.len();
                    if *index >= len {
                        warn!("Refusing to remove selection {} of {}", index, len);
                        return Err(ViewError::StaleSelectionIndex { index: *index, len }.into());
                    }
                    state.selections.remove(*index);
                }
                publish(&state, &comm)?;
            }
            Ok(())
        });

        // Any component may request a selection through the app bus
        let comm = self.comm().clone();
        app.on(AppEventKind::AddSelectionTrigger, move |event| match event {
            AppEvent::AddSelectionTrigger(row) => comm.emit(ElementEvent::AddSelectionTrigger(row.clone())),
            _ => Ok(()),
        });

        let comm = self.comm().clone();
        app.on(AppEventKind::RemoveSelectionTrigger, move |event| match event {
            AppEvent::RemoveSelectionTrigger(index) => comm.emit(ElementEvent::RemoveSelectionTrigger(*index)),
            _ => Ok(()),
        });
    }

    fn register_actions(&self) {
        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::AddSelection, Direction::Do, move |args| {
            bus.emit(AppEvent::AddSelection(args.row(0)?.clone()))
        });

        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::AddSelection, Direction::Undo, move |args| {
            bus.emit(AppEvent::RemoveSelection(args.index(0)?))
        });

        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::RemoveSelection, Direction::Do, move |args| {
            bus.emit(AppEvent::RemoveSelection(args.index(0)?))
        });

        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::RemoveSelection, Direction::Undo, move |args| {
            bus.emit(AppEvent::InsertSelection {
                index: args.index(0)?,
                entry: args.selection(1)?.clone(),
            })
        });
    }

    fn subscribe_view(&self) {
        let (state, app) = (self.state.clone(), self.base.app().clone());
        self.comm().on(ElementEventKind::AddSelectionTrigger, move |event| {
            if let ElementEvent::AddSelectionTrigger(row) = event {
                // The new entry lands at the end, so undo removes that index
                let undo_index = state.read().selections.len();
                app.apply(
                    Action::AddSelection,
                    Invocation::single(ActionArg::Row(row.clone())),
                    Invocation::single(ActionArg::Index(undo_index)),
                )?;
            }
            Ok(())
        });

        let (state, app) = (self.state.clone(), self.base.app().clone());
        self.comm().on(ElementEventKind::RemoveSelectionTrigger, move |event| {
            if let ElementEvent::RemoveSelectionTrigger(index) = event {
                let entry = {
                    let state = state.read();
                    state.selections.get(*index).cloned().ok_or(ViewError::StaleSelectionIndex {
                        index: *index,
                        len: state.selections.len(),
                    })?
                };
                app.apply(
                    Action::RemoveSelection,
                    Invocation::single(ActionArg::Index(*index)),
                    Invocation::new(vec![ActionArg::Index(*index), ActionArg::Selection(entry)]),
                )?;
            }
            Ok(())
        });
    }
}

/// Emit the current selections, skipping empty lists
fn publish(state: &RwLock<ElementState>, comm: &EventBus<ElementEvent>) -> anyhow::Result<()> {
    let update = {
        let state = state.read();
        if state.selections.is_empty() {
            debug!("No selections, update suppressed");
            return Ok(());
        }
        let attributes = state.dataset.as_ref().map(|d| d.valid_attributes()).unwrap_or_default();
        ElementEvent::Update {
            selections: state.selections.clone(),
            attributes,
        }
    };
    comm.emit(update)
}
