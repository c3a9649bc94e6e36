//! Navbar view-model: the dataset selector

use std::path::Path;
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{info, warn};
use upset_core::{Event, EventBus};
use upset_data::dataset::discover;
use upset_data::{DataProvider, DataSetInfo};

use crate::application::Application;
use crate::events::AppEvent;
use crate::view_model::{View, ViewModelBase};

#[derive(Debug, Clone)]
pub enum NavBarEvent {
    /// The user picked a dataset
    ChangeDataset(DataSetInfo),
    Update(Vec<DataSetInfo>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavBarEventKind {
    ChangeDataset,
    Update,
}

impl Event for NavBarEvent {
    type Kind = NavBarEventKind;

    fn kind(&self) -> NavBarEventKind {
        match self {
            NavBarEvent::ChangeDataset(_) => NavBarEventKind::ChangeDataset,
            NavBarEvent::Update(_) => NavBarEventKind::Update,
        }
    }
}

pub struct NavBarViewModel {
    base: ViewModelBase<NavBarEvent>,
    datasets: Arc<RwLock<Vec<DataSetInfo>>>,
}

impl NavBarViewModel {
    pub fn new(view: Arc<dyn View<NavBarEvent>>, app: Application) -> Self {
        let vm = Self {
            base: ViewModelBase::new(view, app),
            datasets: Arc::new(RwLock::new(Vec::new())),
        };

        let app = vm.base.app().clone();
        vm.comm().on(NavBarEventKind::ChangeDataset, move |event| match event {
            NavBarEvent::ChangeDataset(info) => app.emit(AppEvent::ChangeDataset(info.clone())),
            _ => Ok(()),
        });

        vm.base.create_view();
        vm
    }

    pub fn comm(&self) -> &EventBus<NavBarEvent> {
        self.base.comm()
    }

    /// Datasets offered by the selector
    pub fn datasets(&self) -> Vec<DataSetInfo> {
        self.datasets.read().clone()
    }

    /// Find an offered dataset by name
    pub fn find(&self, name: &str) -> Option<DataSetInfo> {
        self.datasets.read().iter().find(|d| d.name == name).cloned()
    }

    /// Read the manifest and offer the datasets `provider` can load
    pub async fn populate_dataset_selector(
        &self,
        manifest: &Path,
        provider: &dyn DataProvider,
    ) -> anyhow::Result<Vec<DataSetInfo>> {
        let loadable = provider.names();
        let (datasets, skipped): (Vec<_>, Vec<_>) = discover(manifest)
            .await?
            .into_iter()
            .partition(|d| loadable.contains(&d.name));
        for dataset in &skipped {
            warn!("Dataset '{}' ({}) has no loadable data, not offering it", dataset.name, dataset.file);
        }
        self.set_datasets(datasets.clone())?;
        Ok(datasets)
    }

    /// Replace the offered datasets and announce them
    pub fn set_datasets(&self, datasets: Vec<DataSetInfo>) -> anyhow::Result<()> {
        info!("Dataset selector offers {} dataset(s)", datasets.len());
        *self.datasets.write() = datasets.clone();
        self.comm().emit(NavBarEvent::Update(datasets.clone()))?;
        self.base.app().emit(AppEvent::DatasetsDiscovered(datasets))
    }
}
