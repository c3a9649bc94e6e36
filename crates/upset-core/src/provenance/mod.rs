//! Provenance graph: linear undo/redo history over registered commands
//!
//! Handlers are resolved from the [`CommandRegistry`] by action name and
//! direction each time they run, never stored in the records themselves.

mod record;

pub use record::{ActionRecord, Invocation};

use std::sync::Arc;
use parking_lot::Mutex;

use crate::commands::{ActionKey, ActionName, CommandRegistry};
use crate::error::ProvenanceError;

/// Shared handle to a history node
pub type RecordRef<N, A> = Arc<ActionRecord<N, A>>;

/// History state guarded by the graph
struct HistoryState<N, A> {
    records: Vec<RecordRef<N, A>>,
    /// Number of records currently applied; always in `0..=records.len()`
    cursor: usize,
    next_order: u64,
}

/// The undo/redo engine
pub struct ProvenanceGraph<N: ActionName, A> {
    registry: CommandRegistry<N, A>,
    state: Arc<Mutex<HistoryState<N, A>>>,
}

impl<N: ActionName, A: Send + Sync + 'static> ProvenanceGraph<N, A> {
    /// Create an empty graph resolving handlers from `registry`
    pub fn new(registry: CommandRegistry<N, A>) -> Self {
        Self {
            registry,
            state: Arc::new(Mutex::new(HistoryState {
                records: Vec::new(),
                cursor: 0,
                next_order: 0,
            })),
        }
    }

    /// The registry handlers are resolved from
    pub fn registry(&self) -> &CommandRegistry<N, A> {
        &self.registry
    }

    /// Run the forward handler of `action` and commit a new history node
    ///
    /// Any records beyond the cursor are discarded. Nothing is recorded when
    /// the forward handler is missing or fails.
    pub fn apply(
        &self,
        action: N,
        forward: Invocation<A>,
        inverse: Invocation<A>,
    ) -> Result<RecordRef<N, A>, ProvenanceError> {
        self.registry.invoke(ActionKey::forward(action), forward.args())?;

        let mut state = self.state.lock();
        let cursor = state.cursor;
        let pruned = state.records.len() - cursor;
        state.records.truncate(cursor);

        let order = state.next_order;
        state.next_order += 1;
        let record = Arc::new(ActionRecord::new(action, forward, inverse, order));
        state.records.push(Arc::clone(&record));
        state.cursor += 1;

        if pruned > 0 {
            tracing::debug!("Discarded {} redoable action(s) before applying {}", pruned, action);
        }
        tracing::info!("Applied {} (history {}/{})", action, state.cursor, state.records.len());
        Ok(record)
    }

    /// Step back one action
    ///
    /// Returns `Ok(None)` without side effects when nothing is applied. The
    /// cursor only moves once the inverse handler succeeded.
    pub fn undo(&self) -> Result<Option<RecordRef<N, A>>, ProvenanceError> {
        let (position, record) = {
            let state = self.state.lock();
            if state.cursor == 0 {
                tracing::debug!("Nothing to undo");
                return Ok(None);
            }
            (state.cursor - 1, Arc::clone(&state.records[state.cursor - 1]))
        };

        self.registry
            .invoke(ActionKey::inverse(record.action()), record.undo_invocation().args())?;

        let mut state = self.state.lock();
        state.cursor = position;
        tracing::info!("Undid {} (history {}/{})", record.action(), state.cursor, state.records.len());
        Ok(Some(record))
    }

    /// Replay the next undone action with its captured arguments
    ///
    /// Returns `Ok(None)` without side effects when nothing is undone.
    pub fn redo(&self) -> Result<Option<RecordRef<N, A>>, ProvenanceError> {
        let (position, record) = {
            let state = self.state.lock();
            if state.cursor == state.records.len() {
                tracing::debug!("Nothing to redo");
                return Ok(None);
            }
            (state.cursor, Arc::clone(&state.records[state.cursor]))
        };

        self.registry
            .invoke(ActionKey::forward(record.action()), record.do_invocation().args())?;

        let mut state = self.state.lock();
        state.cursor = position + 1;
        tracing::info!("Redid {} (history {}/{})", record.action(), state.cursor, state.records.len());
        Ok(Some(record))
    }

    /// Number of applied actions
    pub fn cursor(&self) -> usize {
        self.state.lock().cursor
    }

    /// Number of records, applied or undone
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.state.lock().cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        let state = self.state.lock();
        state.cursor < state.records.len()
    }

    /// The most recently applied record
    pub fn current(&self) -> Option<RecordRef<N, A>> {
        let state = self.state.lock();
        state.cursor.checked_sub(1).map(|i| Arc::clone(&state.records[i]))
    }

    /// Snapshot of every record in order
    pub fn records(&self) -> Vec<RecordRef<N, A>> {
        self.state.lock().records.clone()
    }

    /// Drop all history without running any handler
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.cursor = 0;
    }
}

impl<N: ActionName, A> Clone for ProvenanceGraph<N, A> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            state: Arc::clone(&self.state),
        }
    }
}
