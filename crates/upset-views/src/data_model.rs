//! Binding between the application bus and the row engine
//!
//! Loads the picked dataset, applies set removals and filter changes, and
//! publishes the recomputed rows as [`AppEvent::RenderRowsChanged`]. A
//! dataset switch is announced as [`AppEvent::DatasetChanged`] only once the
//! load succeeded, and it starts a fresh action history.

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, info};
use upset_data::engine::render_rows;
use upset_data::{Data, DataProvider, RenderConfigStore};

use crate::application::Application;
use crate::events::{AppEvent, AppEventKind, SetFilterChange};

#[derive(Default)]
struct ModelState {
    data: Option<Data>,
    set_filter: Option<usize>,
}

/// Owner of the loaded dataset
pub struct DataModel {
    state: Arc<RwLock<ModelState>>,
}

impl DataModel {
    pub fn new(app: &Application, provider: Arc<dyn DataProvider>, store: RenderConfigStore) -> Self {
        let model = Self {
            state: Arc::new(RwLock::new(ModelState::default())),
        };
        let bus = app.bus();

        let (state, store_, out, graph) = (model.state.clone(), store.clone(), bus.clone(), app.graph().clone());
        bus.on(AppEventKind::ChangeDataset, move |event| {
            if let AppEvent::ChangeDataset(info) = event {
                let data = provider.load(info)?;
                info!("Loaded dataset '{}' with {} sets", data.name, data.sets.len());
                {
                    let mut state = state.write();
                    state.data = Some(data);
                    state.set_filter = None;
                }
                // recorded arguments refer to the previous dataset's rows and sets
                if !graph.is_empty() {
                    debug!("Discarding {} history records", graph.len());
                    graph.clear();
                }
                out.emit(AppEvent::DatasetChanged(info.clone()))?;
                refresh(&state, &store_, &out)?;
            }
            Ok(())
        });

        let (state, store_, out) = (model.state.clone(), store.clone(), bus.clone());
        bus.on(AppEventKind::FilterChanged, move |event| {
            if let AppEvent::FilterChanged { config, set_filter } = event {
                if let Some(config) = config {
                    store_.save(config)?;
                }
                {
                    let mut state = state.write();
                    match set_filter {
                        SetFilterChange::Unchanged => {}
                        SetFilterChange::Only(index) => state.set_filter = Some(*index),
                        SetFilterChange::Cleared => state.set_filter = None,
                    }
                }
                refresh(&state, &store_, &out)?;
            }
            Ok(())
        });

        let (state, store_, out) = (model.state.clone(), store.clone(), bus.clone());
        bus.on(AppEventKind::RemoveSet, move |event| {
            if let AppEvent::RemoveSet(set) = event {
                {
                    let mut state = state.write();
                    match state.data.as_mut() {
                        Some(data) => {
                            data.remove_set(&set.name)?;
                        }
                        None => {
                            debug!("No dataset loaded, ignoring removal of {}", set.name);
                            return Ok(());
                        }
                    }
                    state.set_filter = None;
                }
                refresh(&state, &store_, &out)?;
            }
            Ok(())
        });

        let (state, store_, out) = (model.state.clone(), store, bus.clone());
        bus.on(AppEventKind::AddSet, move |event| {
            if let AppEvent::AddSet(set) = event {
                {
                    let mut state = state.write();
                    match state.data.as_mut() {
                        Some(data) => data.add_set(set.clone()),
                        None => {
                            debug!("No dataset loaded, ignoring re-add of {}", set.name);
                            return Ok(());
                        }
                    }
                    state.set_filter = None;
                }
                refresh(&state, &store_, &out)?;
            }
            Ok(())
        });

        model
    }

    /// The loaded dataset with its current rows
    pub fn data(&self) -> Option<Data> {
        self.state.read().data.clone()
    }

    pub fn set_filter(&self) -> Option<usize> {
        self.state.read().set_filter
    }
}

/// Recompute the rows of the loaded dataset and publish them
fn refresh(
    state: &RwLock<ModelState>,
    store: &RenderConfigStore,
    bus: &upset_core::EventBus<AppEvent>,
) -> anyhow::Result<()> {
    let config = store.load()?;
    let snapshot = {
        let mut state = state.write();
        let set_filter = state.set_filter;
        let Some(data) = state.data.as_mut() else {
            debug!("No dataset loaded, nothing to render");
            return Ok(());
        };
        data.render_rows = render_rows(data, &config, set_filter);
        Arc::new(data.clone())
    };
    bus.emit(AppEvent::RenderRowsChanged(snapshot))
}
