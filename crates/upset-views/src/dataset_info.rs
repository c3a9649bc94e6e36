//! Dataset information panel

use std::sync::Arc;
use parking_lot::RwLock;
use upset_core::{Event, EventBus};
use upset_data::DataSetInfo;

use crate::application::Application;
use crate::events::{AppEvent, AppEventKind};
use crate::view_model::{View, ViewModelBase};

#[derive(Debug, Clone)]
pub enum DataSetInfoEvent {
    Update {
        datasets: Vec<DataSetInfo>,
        current: Option<DataSetInfo>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSetInfoEventKind {
    Update,
}

impl Event for DataSetInfoEvent {
    type Kind = DataSetInfoEventKind;

    fn kind(&self) -> DataSetInfoEventKind {
        DataSetInfoEventKind::Update
    }
}

#[derive(Default)]
struct InfoState {
    datasets: Vec<DataSetInfo>,
    current: Option<DataSetInfo>,
}

/// Keeps the discovered datasets and the one being shown
pub struct DataSetInfoViewModel {
    base: ViewModelBase<DataSetInfoEvent>,
    state: Arc<RwLock<InfoState>>,
}

impl DataSetInfoViewModel {
    pub fn new(view: Arc<dyn View<DataSetInfoEvent>>, app: Application) -> Self {
        let vm = Self {
            base: ViewModelBase::new(view, app),
            state: Arc::new(RwLock::new(InfoState::default())),
        };

        let (state, comm) = (vm.state.clone(), vm.comm().clone());
        vm.base.app().on(AppEventKind::DatasetsDiscovered, move |event| {
            if let AppEvent::DatasetsDiscovered(datasets) = event {
                state.write().datasets = datasets.clone();
                publish(&state, &comm)?;
            }
            Ok(())
        });

        let (state, comm) = (vm.state.clone(), vm.comm().clone());
        vm.base.app().on(AppEventKind::DatasetChanged, move |event| {
            if let AppEvent::DatasetChanged(info) = event {
                state.write().current = Some(info.clone());
                publish(&state, &comm)?;
            }
            Ok(())
        });

        vm.base.create_view();
        vm
    }

    pub fn comm(&self) -> &EventBus<DataSetInfoEvent> {
        self.base.comm()
    }

    pub fn datasets(&self) -> Vec<DataSetInfo> {
        self.state.read().datasets.clone()
    }

    pub fn current(&self) -> Option<DataSetInfo> {
        self.state.read().current.clone()
    }
}

fn publish(state: &RwLock<InfoState>, comm: &EventBus<DataSetInfoEvent>) -> anyhow::Result<()> {
    let update = {
        let state = state.read();
        DataSetInfoEvent::Update {
            datasets: state.datasets.clone(),
            current: state.current.clone(),
        }
    };
    comm.emit(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_info, RecordingView};

    #[test]
    fn test_tracks_discovered_and_current() {
        let app = Application::new();
        let view = Arc::new(RecordingView::new(DataSetInfoEventKind::Update));
        let vm = DataSetInfoViewModel::new(view.clone(), app.clone());

        app.emit(AppEvent::DatasetsDiscovered(vec![sample_info()])).unwrap();
        app.emit(AppEvent::DatasetChanged(sample_info())).unwrap();

        assert_eq!(vm.datasets().len(), 1);
        assert_eq!(vm.current().map(|d| d.name), Some("sample".to_string()));
        assert_eq!(view.count(), 2);
        match view.last() {
            Some(DataSetInfoEvent::Update { current, .. }) => assert!(current.is_some()),
            None => panic!("no update recorded"),
        }
    }
}
