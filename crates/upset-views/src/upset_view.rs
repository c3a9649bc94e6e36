//! Matrix (UpSet) view-model
//!
//! Forwards new render rows to the matrix view and turns the view's header,
//! connector and row interactions into application events. Removing a set is
//! reversible; undo adds the set back.

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::debug;
use upset_core::{Direction, Event, EventBus, Invocation};
use upset_data::{Data, RenderRow, Set};

use crate::actions::{Action, ActionArg, ArgsExt};
use crate::application::Application;
use crate::events::{AppEvent, AppEventKind, SetFilterChange};
use crate::view_model::{View, ViewModelBase};

/// Events between the matrix view-model and its view
#[derive(Debug, Clone)]
pub enum UpsetEvent {
    /// A set header was clicked for removal
    RemoveSetTrigger(Set),
    /// Show only subsets containing the used set at this index
    SetFilter(usize),
    SortBySetTrigger(usize),
    SortByCardinalityTrigger,
    SortByDeviationTrigger,
    /// A row was clicked
    SelectRowTrigger(RenderRow),
    Update(Arc<Data>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpsetEventKind {
    RemoveSetTrigger,
    SetFilter,
    SortBySetTrigger,
    SortByCardinalityTrigger,
    SortByDeviationTrigger,
    SelectRowTrigger,
    Update,
}

impl Event for UpsetEvent {
    type Kind = UpsetEventKind;

    fn kind(&self) -> UpsetEventKind {
        match self {
            UpsetEvent::RemoveSetTrigger(_) => UpsetEventKind::RemoveSetTrigger,
            UpsetEvent::SetFilter(_) => UpsetEventKind::SetFilter,
            UpsetEvent::SortBySetTrigger(_) => UpsetEventKind::SortBySetTrigger,
            UpsetEvent::SortByCardinalityTrigger => UpsetEventKind::SortByCardinalityTrigger,
            UpsetEvent::SortByDeviationTrigger => UpsetEventKind::SortByDeviationTrigger,
            UpsetEvent::SelectRowTrigger(_) => UpsetEventKind::SelectRowTrigger,
            UpsetEvent::Update(_) => UpsetEventKind::Update,
        }
    }
}

/// View-model of the combination matrix
pub struct UpsetViewModel {
    base: ViewModelBase<UpsetEvent>,
    data: Arc<RwLock<Option<Arc<Data>>>>,
}

impl UpsetViewModel {
    pub fn new(view: Arc<dyn View<UpsetEvent>>, app: Application) -> Self {
        let vm = Self {
            base: ViewModelBase::new(view, app),
            data: Arc::new(RwLock::new(None)),
        };
        vm.subscribe_app();
        vm.register_actions();
        vm.subscribe_view();
        vm.base.create_view();
        vm
    }

    pub fn comm(&self) -> &EventBus<UpsetEvent> {
        self.base.comm()
    }

    /// The dataset last rendered
    pub fn data(&self) -> Option<Arc<Data>> {
        self.data.read().clone()
    }

    fn subscribe_app(&self) {
        let (data, comm) = (self.data.clone(), self.comm().clone());
        self.base.app().on(AppEventKind::RenderRowsChanged, move |event| {
            if let AppEvent::RenderRowsChanged(rows) = event {
                *data.write() = Some(rows.clone());
                comm.emit(UpsetEvent::Update(rows.clone()))?;
            }
            Ok(())
        });
    }

    fn register_actions(&self) {
        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::RemoveSet, Direction::Do, move |args| {
            bus.emit(AppEvent::RemoveSet(args.set(0)?.clone()))
        });

        let bus = self.base.app().bus().clone();
        self.base.register_functions(Action::RemoveSet, Direction::Undo, move |args| {
            bus.emit(AppEvent::AddSet(args.set(0)?.clone()))
        });
    }

    fn subscribe_view(&self) {
        let comm = self.comm();

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::RemoveSetTrigger, move |event| {
            if let UpsetEvent::RemoveSetTrigger(set) = event {
                app.apply(
                    Action::RemoveSet,
                    Invocation::single(ActionArg::Set(set.clone())),
                    Invocation::single(ActionArg::Set(set.clone())),
                )?;
            }
            Ok(())
        });

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::SetFilter, move |event| {
            if let UpsetEvent::SetFilter(index) = event {
                app.emit(AppEvent::FilterChanged {
                    config: None,
                    set_filter: SetFilterChange::Only(*index),
                })?;
                app.emit(AppEvent::SetAggNone)?;
            }
            Ok(())
        });

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::SortBySetTrigger, move |event| match event {
            UpsetEvent::SortBySetTrigger(index) => app.emit(AppEvent::SortBySet(*index)),
            _ => Ok(()),
        });

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::SortByCardinalityTrigger, move |_| app.emit(AppEvent::SortByCardinality));

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::SortByDeviationTrigger, move |_| app.emit(AppEvent::SortByDeviation));

        let app = self.base.app().clone();
        comm.on(UpsetEventKind::SelectRowTrigger, move |event| {
            if let UpsetEvent::SelectRowTrigger(row) = event {
                if row.is_group() {
                    debug!("Ignoring click on group row {}", row.id);
                    return Ok(());
                }
                app.emit(AppEvent::AddSelectionTrigger(row.clone()))?;
            }
            Ok(())
        });
    }
}
