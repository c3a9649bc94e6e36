//! A fully wired application: every view-model on one bus and history

use std::sync::Arc;
use upset_data::{DataProvider, DataSetInfo, RenderConfigStore};

use crate::application::Application;
use crate::data_model::DataModel;
use crate::dataset_info::{DataSetInfoEvent, DataSetInfoViewModel};
use crate::element_view::{ElementEvent, ElementViewModel};
use crate::filter_box::{FilterBoxEvent, FilterBoxViewModel};
use crate::navbar::{NavBarEvent, NavBarViewModel};
use crate::upset_view::{UpsetEvent, UpsetViewModel};
use crate::view_model::{NullView, View};

/// The rendering views paired with each view-model
#[derive(Clone)]
pub struct SessionViews {
    pub navbar: Arc<dyn View<NavBarEvent>>,
    pub dataset_info: Arc<dyn View<DataSetInfoEvent>>,
    pub filter_box: Arc<dyn View<FilterBoxEvent>>,
    pub upset: Arc<dyn View<UpsetEvent>>,
    pub elements: Arc<dyn View<ElementEvent>>,
}

impl Default for SessionViews {
    fn default() -> Self {
        Self {
            navbar: Arc::new(NullView),
            dataset_info: Arc::new(NullView),
            filter_box: Arc::new(NullView),
            upset: Arc::new(NullView),
            elements: Arc::new(NullView),
        }
    }
}

pub struct Session {
    pub app: Application,
    pub store: RenderConfigStore,
    pub filter_box: FilterBoxViewModel,
    pub upset: UpsetViewModel,
    pub elements: ElementViewModel,
    pub dataset_info: DataSetInfoViewModel,
    pub navbar: NavBarViewModel,
    pub data_model: DataModel,
}

impl Session {
    /// Wire the view-models together
    ///
    /// The data model subscribes last so option changes are stored before rows
    /// are recomputed from them.
    pub fn new(provider: Arc<dyn DataProvider>, store: RenderConfigStore, views: SessionViews) -> Self {
        let app = Application::new();
        let filter_box = FilterBoxViewModel::new(views.filter_box, app.clone(), store.clone());
        let upset = UpsetViewModel::new(views.upset, app.clone());
        let elements = ElementViewModel::new(views.elements, app.clone());
        let dataset_info = DataSetInfoViewModel::new(views.dataset_info, app.clone());
        let navbar = NavBarViewModel::new(views.navbar, app.clone());
        let data_model = DataModel::new(&app, provider, store.clone());

        tracing::debug!("Session wired with {} registered handlers", app.registry().len());
        Self {
            app,
            store,
            filter_box,
            upset,
            elements,
            dataset_info,
            navbar,
            data_model,
        }
    }

    /// Pick a dataset as the navbar would
    pub fn change_dataset(&self, info: DataSetInfo) -> anyhow::Result<()> {
        self.navbar.comm().emit(NavBarEvent::ChangeDataset(info))
    }
}
