//! The application container shared by every view-model

use upset_core::{CommandRegistry, EventBus, Invocation, ProvenanceError, ProvenanceGraph, RecordRef};

use crate::actions::{Action, ActionArg};
use crate::events::{AppEvent, AppEventKind};

pub type AppRegistry = CommandRegistry<Action, ActionArg>;
pub type AppGraph = ProvenanceGraph<Action, ActionArg>;
pub type AppRecord = RecordRef<Action, ActionArg>;

/// Application bus, command registry and provenance graph
///
/// Cloning is cheap; clones share the same bus and history.
#[derive(Clone)]
pub struct Application {
    bus: EventBus<AppEvent>,
    graph: AppGraph,
}

impl Application {
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            graph: ProvenanceGraph::new(CommandRegistry::new()),
        }
    }

    /// The application-wide event bus
    pub fn bus(&self) -> &EventBus<AppEvent> {
        &self.bus
    }

    pub fn registry(&self) -> &AppRegistry {
        self.graph.registry()
    }

    pub fn graph(&self) -> &AppGraph {
        &self.graph
    }

    /// Subscribe to an application event
    pub fn on<F>(&self, kind: AppEventKind, handler: F)
    where
        F: Fn(&AppEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.bus.on(kind, handler);
    }

    pub fn emit(&self, event: AppEvent) -> anyhow::Result<()> {
        self.bus.emit(event)
    }

    /// Commit a reversible action through the provenance graph
    pub fn apply(
        &self,
        action: Action,
        forward: Invocation<ActionArg>,
        inverse: Invocation<ActionArg>,
    ) -> Result<AppRecord, ProvenanceError> {
        self.graph.apply(action, forward, inverse)
    }

    pub fn undo(&self) -> Result<Option<AppRecord>, ProvenanceError> {
        self.graph.undo()
    }

    pub fn redo(&self) -> Result<Option<AppRecord>, ProvenanceError> {
        self.graph.redo()
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
