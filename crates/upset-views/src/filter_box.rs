//! Filter box view-model
//!
//! Owns the aggregation, filter and sort options. Every option change is a
//! reversible action whose inverse restores the value held before the change.

use std::sync::Arc;
use tracing::debug;
use upset_core::{Direction, Event, EventBus, Invocation};
use upset_data::{AggregateBy, RenderConfig, RenderConfigStore, SortBy};

use crate::actions::{Action, ActionArg, ArgsExt};
use crate::application::Application;
use crate::error::ViewError;
use crate::events::{AppEvent, AppEventKind, SetFilterChange};
use crate::view_model::{View, ViewModelBase};

/// A single option edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigChange {
    FirstAggregation(AggregateBy),
    SecondAggregation(AggregateBy),
    SortBy(SortBy),
    FirstOverlap(usize),
    SecondOverlap(usize),
    MinDegree(usize),
    MaxDegree(Option<usize>),
    HideEmpty(bool),
    SortBySet(usize),
    SortByCardinality,
    SortByDeviation,
}

impl ConfigChange {
    /// The reversible action recording this edit
    pub fn action(&self) -> Action {
        match self {
            ConfigChange::FirstAggregation(_) => Action::ApplyFirstAggregation,
            ConfigChange::SecondAggregation(_) => Action::ApplySecondAggregation,
            ConfigChange::SortBy(_) => Action::ApplySortBy,
            ConfigChange::FirstOverlap(_) => Action::ApplyFirstOverlap,
            ConfigChange::SecondOverlap(_) => Action::ApplySecondOverlap,
            ConfigChange::MinDegree(_) => Action::ApplyMinDegreeChange,
            ConfigChange::MaxDegree(_) => Action::ApplyMaxDegreeChange,
            ConfigChange::HideEmpty(_) => Action::ApplyHideEmpty,
            ConfigChange::SortBySet(_) => Action::ApplySortBySet,
            ConfigChange::SortByCardinality => Action::SortByCardinality,
            ConfigChange::SortByDeviation => Action::SortByDeviation,
        }
    }

    /// Argument carrying the new value
    pub fn forward_arg(&self) -> ActionArg {
        match *self {
            ConfigChange::FirstAggregation(agg) | ConfigChange::SecondAggregation(agg) => ActionArg::Aggregation(agg),
            ConfigChange::SortBy(sort) => ActionArg::Sort(sort),
            ConfigChange::FirstOverlap(n) | ConfigChange::SecondOverlap(n) | ConfigChange::MinDegree(n) => {
                ActionArg::Count(n)
            }
            ConfigChange::MaxDegree(bound) => ActionArg::Bound(bound),
            ConfigChange::HideEmpty(flag) => ActionArg::Flag(flag),
            ConfigChange::SortBySet(index) => ActionArg::Sort(SortBy::Set(index)),
            ConfigChange::SortByCardinality => ActionArg::Sort(SortBy::Cardinality),
            ConfigChange::SortByDeviation => ActionArg::Sort(SortBy::Deviation),
        }
    }

    /// Argument carrying the value this edit overwrites in `current`
    pub fn inverse_arg(&self, current: &RenderConfig) -> ActionArg {
        match self {
            ConfigChange::FirstAggregation(_) => ActionArg::Aggregation(current.first_aggregate_by),
            ConfigChange::SecondAggregation(_) => ActionArg::Aggregation(current.second_aggregate_by),
            ConfigChange::FirstOverlap(_) => ActionArg::Count(current.first_overlap),
            ConfigChange::SecondOverlap(_) => ActionArg::Count(current.second_overlap),
            ConfigChange::MinDegree(_) => ActionArg::Count(current.min_degree),
            ConfigChange::MaxDegree(_) => ActionArg::Bound(current.max_degree),
            ConfigChange::HideEmpty(_) => ActionArg::Flag(current.hide_empties),
            ConfigChange::SortBy(_)
            | ConfigChange::SortBySet(_)
            | ConfigChange::SortByCardinality
            | ConfigChange::SortByDeviation => ActionArg::Sort(current.sort_by),
        }
    }

    /// Rebuild the edit an action's handler was invoked with
    ///
    /// Both directions of an action carry the same kind of value, so one
    /// decoder serves do and undo. Sort actions decode to [`ConfigChange::SortBy`].
    pub fn decode(action: Action, args: &[ActionArg]) -> Result<Self, ViewError> {
        Ok(match action {
            Action::ApplyFirstAggregation => ConfigChange::FirstAggregation(args.aggregation(0)?),
            Action::ApplySecondAggregation => ConfigChange::SecondAggregation(args.aggregation(0)?),
            Action::ApplyFirstOverlap => ConfigChange::FirstOverlap(args.count(0)?),
            Action::ApplySecondOverlap => ConfigChange::SecondOverlap(args.count(0)?),
            Action::ApplyMinDegreeChange => ConfigChange::MinDegree(args.count(0)?),
            Action::ApplyMaxDegreeChange => ConfigChange::MaxDegree(args.bound(0)?),
            Action::ApplyHideEmpty => ConfigChange::HideEmpty(args.flag(0)?),
            Action::ApplySortBy | Action::ApplySortBySet | Action::SortByCardinality | Action::SortByDeviation => {
                ConfigChange::SortBy(args.sort_order(0)?)
            }
            other => return Err(ViewError::UnsupportedAction(other)),
        })
    }

    /// Write the edit into `config`
    pub fn assign(&self, config: &mut RenderConfig) {
        match *self {
            ConfigChange::FirstAggregation(agg) => config.first_aggregate_by = agg,
            ConfigChange::SecondAggregation(agg) => config.second_aggregate_by = agg,
            ConfigChange::SortBy(sort) => config.sort_by = sort,
            ConfigChange::FirstOverlap(n) => config.first_overlap = n,
            ConfigChange::SecondOverlap(n) => config.second_overlap = n,
            ConfigChange::MinDegree(n) => config.min_degree = n,
            ConfigChange::MaxDegree(bound) => config.max_degree = bound,
            ConfigChange::HideEmpty(flag) => config.hide_empties = flag,
            ConfigChange::SortBySet(index) => config.sort_by = SortBy::Set(index),
            ConfigChange::SortByCardinality => config.sort_by = SortBy::Cardinality,
            ConfigChange::SortByDeviation => config.sort_by = SortBy::Deviation,
        }
    }
}

/// Events between the filter box view-model and its view
#[derive(Debug, Clone)]
pub enum FilterBoxEvent {
    /// The user edited one option
    Change(ConfigChange),
    /// The view replaced the whole configuration
    FilterChanged(RenderConfig),
    Update(RenderConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterBoxEventKind {
    Change,
    FilterChanged,
    Update,
}

impl Event for FilterBoxEvent {
    type Kind = FilterBoxEventKind;

    fn kind(&self) -> FilterBoxEventKind {
        match self {
            FilterBoxEvent::Change(_) => FilterBoxEventKind::Change,
            FilterBoxEvent::FilterChanged(_) => FilterBoxEventKind::FilterChanged,
            FilterBoxEvent::Update(_) => FilterBoxEventKind::Update,
        }
    }
}

/// View-model of the aggregation and filter controls
pub struct FilterBoxViewModel {
    base: ViewModelBase<FilterBoxEvent>,
    store: RenderConfigStore,
}

impl FilterBoxViewModel {
    pub fn new(view: Arc<dyn View<FilterBoxEvent>>, app: Application, store: RenderConfigStore) -> Self {
        let vm = Self {
            base: ViewModelBase::new(view, app),
            store,
        };
        vm.subscribe_app();
        vm.register_actions();
        vm.subscribe_view();
        vm.base.create_view();
        vm
    }

    pub fn comm(&self) -> &EventBus<FilterBoxEvent> {
        self.base.comm()
    }

    /// The stored configuration
    pub fn config(&self) -> Result<RenderConfig, ViewError> {
        Ok(self.store.load()?)
    }

    fn subscribe_app(&self) {
        let app = self.base.app();

        // Sort requests from other views become reversible edits here
        for kind in [
            AppEventKind::SortBySet,
            AppEventKind::SortByCardinality,
            AppEventKind::SortByDeviation,
        ] {
            let comm = self.comm().clone();
            app.on(kind, move |event| {
                let change = match event {
                    AppEvent::SortBySet(index) => ConfigChange::SortBySet(*index),
                    AppEvent::SortByCardinality => ConfigChange::SortByCardinality,
                    AppEvent::SortByDeviation => ConfigChange::SortByDeviation,
                    _ => return Ok(()),
                };
                comm.emit(FilterBoxEvent::Change(change))
            });
        }

        let (store, comm) = (self.store.clone(), self.comm().clone());
        app.on(AppEventKind::DatasetChanged, move |event| {
            if let AppEvent::DatasetChanged(info) = event {
                let config = store.update(|c| c.current_file = Some(info.name.clone()))?;
                comm.emit(FilterBoxEvent::Update(config))?;
            }
            Ok(())
        });

        let (store, comm, bus) = (self.store.clone(), self.comm().clone(), app.bus().clone());
        app.on(AppEventKind::SetAggNone, move |_| {
            let config = store.update(|c| c.first_aggregate_by = AggregateBy::None)?;
            publish(&comm, &bus, config)
        });
    }

    fn register_actions(&self) {
        for action in Action::CONFIG_ACTIONS {
            for direction in [Direction::Do, Direction::Undo] {
                let (store, comm, bus) = (self.store.clone(), self.comm().clone(), self.base.app().bus().clone());
                self.base.register_functions(action, direction, move |args| {
                    let change = ConfigChange::decode(action, args)?;
                    let config = store.update(|c| change.assign(c))?;
                    debug!("{} {}: {:?}", direction, action, change);
                    publish(&comm, &bus, config)
                });
            }
        }
    }

    fn subscribe_view(&self) {
        let (store, app) = (self.store.clone(), self.base.app().clone());
        self.comm().on(FilterBoxEventKind::Change, move |event| {
            if let FilterBoxEvent::Change(change) = event {
                let current = store.load()?;
                app.apply(
                    change.action(),
                    Invocation::single(change.forward_arg()),
                    Invocation::single(change.inverse_arg(&current)),
                )?;
            }
            Ok(())
        });

        let (store, app) = (self.store.clone(), self.base.app().clone());
        self.comm().on(FilterBoxEventKind::FilterChanged, move |event| {
            if let FilterBoxEvent::FilterChanged(config) = event {
                store.save(config)?;
                app.emit(AppEvent::FilterChanged {
                    config: Some(config.clone()),
                    set_filter: SetFilterChange::Unchanged,
                })?;
            }
            Ok(())
        });
    }
}

/// Show the new configuration locally and announce it to the application
fn publish(comm: &EventBus<FilterBoxEvent>, bus: &EventBus<AppEvent>, config: RenderConfig) -> anyhow::Result<()> {
    comm.emit(FilterBoxEvent::Update(config.clone()))?;
    bus.emit(AppEvent::FilterChanged {
        config: Some(config),
        set_filter: SetFilterChange::Unchanged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use upset_data::{DataSetInfo, SessionStorage};

    fn setup() -> (Application, FilterBoxViewModel, Arc<RecordingView<FilterBoxEvent>>) {
        let app = Application::new();
        let view = Arc::new(RecordingView::new(FilterBoxEventKind::Update));
        let store = RenderConfigStore::new(SessionStorage::new());
        let vm = FilterBoxViewModel::new(view.clone(), app.clone(), store);
        (app, vm, view)
    }

    #[test]
    fn test_sort_then_hide_empty_unwinds() {
        let (app, vm, _view) = setup();
        vm.comm().emit(FilterBoxEvent::Change(ConfigChange::SortBySet(2))).unwrap();
        vm.comm().emit(FilterBoxEvent::Change(ConfigChange::HideEmpty(true))).unwrap();
        assert_eq!(app.graph().cursor(), 2);
        assert!(vm.config().unwrap().hide_empties);

        app.undo().unwrap();
        assert_eq!(app.graph().cursor(), 1);
        let config = vm.config().unwrap();
        assert!(!config.hide_empties);
        assert_eq!(config.sort_by, SortBy::Set(2));

        app.undo().unwrap();
        assert_eq!(app.graph().cursor(), 0);
        assert_eq!(vm.config().unwrap().sort_by, SortBy::Cardinality);

        assert!(app.undo().unwrap().is_none());
        assert_eq!(app.graph().cursor(), 0);
    }

    #[test]
    fn test_every_option_round_trips_through_history() {
        let (app, vm, _view) = setup();
        let initial = vm.config().unwrap();
        let changes = [
            ConfigChange::FirstAggregation(AggregateBy::Sets),
            ConfigChange::SecondAggregation(AggregateBy::Degree),
            ConfigChange::SortBy(SortBy::Degree),
            ConfigChange::FirstOverlap(3),
            ConfigChange::SecondOverlap(4),
            ConfigChange::MinDegree(1),
            ConfigChange::MaxDegree(Some(3)),
            ConfigChange::HideEmpty(true),
            ConfigChange::SortByDeviation,
        ];
        for change in changes {
            vm.comm().emit(FilterBoxEvent::Change(change)).unwrap();
        }
        let changed = vm.config().unwrap();
        assert_eq!(changed.second_aggregate_by, AggregateBy::Degree);
        assert_eq!(changed.sort_by, SortBy::Deviation);

        while app.undo().unwrap().is_some() {}
        assert_eq!(vm.config().unwrap(), initial);

        while app.redo().unwrap().is_some() {}
        assert_eq!(vm.config().unwrap(), changed);
    }

    #[test]
    fn test_changes_are_announced() {
        let (app, vm, view) = setup();
        let announced = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = announced.clone();
        app.on(AppEventKind::FilterChanged, move |event| {
            if let AppEvent::FilterChanged { config, set_filter } = event {
                sink.lock().push((config.clone(), *set_filter));
            }
            Ok(())
        });

        vm.comm().emit(FilterBoxEvent::Change(ConfigChange::MinDegree(2))).unwrap();
        assert_eq!(view.count(), 1);
        let announced = announced.lock();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].0.as_ref().map(|c| c.min_degree), Some(2));
        assert_eq!(announced[0].1, SetFilterChange::Unchanged);
    }

    #[test]
    fn test_app_sort_requests_are_reversible() {
        let (app, vm, _view) = setup();
        app.emit(AppEvent::SortBySet(1)).unwrap();
        app.emit(AppEvent::SortByDeviation).unwrap();
        assert_eq!(vm.config().unwrap().sort_by, SortBy::Deviation);

        app.undo().unwrap();
        assert_eq!(vm.config().unwrap().sort_by, SortBy::Set(1));
        assert_eq!(app.graph().records()[1].action(), Action::SortByDeviation);
    }

    #[test]
    fn test_set_agg_none_is_not_recorded() {
        let (app, vm, _view) = setup();
        app.emit(AppEvent::SetAggNone).unwrap();
        assert_eq!(vm.config().unwrap().first_aggregate_by, AggregateBy::None);
        assert!(app.graph().is_empty());
    }

    #[test]
    fn test_dataset_change_sets_current_file() {
        let (app, vm, _view) = setup();
        let info = DataSetInfo {
            name: "Movies".into(),
            file: "movies.csv".into(),
            set_count: 17,
            attribute_count: 2,
            author: String::new(),
            description: String::new(),
            source: String::new(),
        };
        app.emit(AppEvent::DatasetChanged(info)).unwrap();
        assert_eq!(vm.config().unwrap().current_file.as_deref(), Some("Movies"));
    }

    #[test]
    fn test_decode_rejects_foreign_actions() {
        let args = [ActionArg::Index(0)];
        assert!(matches!(
            ConfigChange::decode(Action::RemoveSet, &args),
            Err(ViewError::UnsupportedAction(Action::RemoveSet))
        ));
        assert!(matches!(
            ConfigChange::decode(Action::ApplyHideEmpty, &args),
            Err(ViewError::ArgumentMismatch { position: 0, .. })
        ));
    }
}
