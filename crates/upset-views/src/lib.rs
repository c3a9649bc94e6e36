//! View-models of the UpSet application
//!
//! Each view-model pairs a local bus with a rendering [`View`], listens to the
//! application bus and registers the do/undo handlers of its reversible
//! actions. [`Session`] wires all of them to one [`Application`].

pub mod actions;
pub mod application;
pub mod data_model;
pub mod dataset_info;
pub mod element_view;
pub mod error;
pub mod events;
pub mod filter_box;
pub mod navbar;
pub mod session;
pub mod upset_view;
pub mod view_model;

#[cfg(test)]
mod testing;

pub use actions::{Action, ActionArg, ArgsExt};
pub use application::{AppGraph, AppRecord, AppRegistry, Application};
pub use data_model::DataModel;
pub use dataset_info::{DataSetInfoEvent, DataSetInfoEventKind, DataSetInfoViewModel};
pub use element_view::{ElementEvent, ElementEventKind, ElementViewModel};
pub use error::ViewError;
pub use events::{AppEvent, AppEventKind, SetFilterChange};
pub use filter_box::{ConfigChange, FilterBoxEvent, FilterBoxEventKind, FilterBoxViewModel};
pub use navbar::{NavBarEvent, NavBarEventKind, NavBarViewModel};
pub use session::{Session, SessionViews};
pub use upset_view::{UpsetEvent, UpsetEventKind, UpsetViewModel};
pub use view_model::{NullView, View, ViewModelBase};
