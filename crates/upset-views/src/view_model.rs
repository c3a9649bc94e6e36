//! Shared shape of every view-model
//!
//! A view-model owns a local bus paired with its rendering view, reaches the
//! rest of the application through [`Application`], and registers the do/undo
//! handlers of the reversible actions its view exposes.

use std::sync::Arc;
use upset_core::{ActionKey, Direction, Event, EventBus, Invocation, ProvenanceError};

use crate::actions::{Action, ActionArg};
use crate::application::{AppRecord, Application};

/// A rendering view paired with a view-model
pub trait View<E: Event>: Send + Sync {
    /// Render trigger, called once when the view-model is constructed
    ///
    /// The view keeps the bus to emit triggers and subscribe to updates.
    fn create(&self, comm: &EventBus<E>);
}

/// View that renders nothing, for headless use
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl<E: Event> View<E> for NullView {
    fn create(&self, _comm: &EventBus<E>) {}
}

/// State common to all view-models
pub struct ViewModelBase<E: Event> {
    app: Application,
    comm: EventBus<E>,
    view: Arc<dyn View<E>>,
}

impl<E: Event> ViewModelBase<E> {
    pub fn new(view: Arc<dyn View<E>>, app: Application) -> Self {
        Self {
            app,
            comm: EventBus::new(),
            view,
        }
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    /// The local bus shared with the paired view
    pub fn comm(&self) -> &EventBus<E> {
        &self.comm
    }

    /// Hand the local bus to the view; call once wiring is complete
    pub fn create_view(&self) {
        self.view.create(&self.comm);
    }

    /// Register one direction of a reversible action
    pub fn register_functions<F>(&self, action: Action, direction: Direction, handler: F)
    where
        F: Fn(&[ActionArg]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.app.registry().register(ActionKey::new(action, direction), handler);
    }

    pub fn apply(
        &self,
        action: Action,
        forward: Invocation<ActionArg>,
        inverse: Invocation<ActionArg>,
    ) -> Result<AppRecord, ProvenanceError> {
        self.app.apply(action, forward, inverse)
    }
}
