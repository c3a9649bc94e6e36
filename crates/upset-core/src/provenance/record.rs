//! History nodes

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Captured arguments for one direction of an action
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<A> {
    args: Vec<A>,
}

impl<A> Invocation<A> {
    pub fn new(args: Vec<A>) -> Self {
        Self { args }
    }

    /// Invocation carrying a single argument
    pub fn single(arg: A) -> Self {
        Self { args: vec![arg] }
    }

    /// Invocation without arguments
    pub fn empty() -> Self {
        Self { args: Vec::new() }
    }

    pub fn args(&self) -> &[A] {
        &self.args
    }
}

/// One committed reversible operation
///
/// Records are immutable once created; the graph hands them out behind `Arc`.
#[derive(Debug, Clone)]
pub struct ActionRecord<N, A> {
    id: Uuid,
    action: N,
    forward: Invocation<A>,
    inverse: Invocation<A>,
    order: u64,
    recorded_at: DateTime<Utc>,
}

impl<N: Copy, A> ActionRecord<N, A> {
    pub(crate) fn new(action: N, forward: Invocation<A>, inverse: Invocation<A>, order: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            forward,
            inverse,
            order,
            recorded_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn action(&self) -> N {
        self.action
    }

    /// Arguments replayed by `apply` and `redo`
    pub fn do_invocation(&self) -> &Invocation<A> {
        &self.forward
    }

    /// Arguments passed to the inverse handler by `undo`
    pub fn undo_invocation(&self) -> &Invocation<A> {
        &self.inverse
    }

    /// Monotonic sequence number across the lifetime of the graph
    pub fn order(&self) -> u64 {
        self.order
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
