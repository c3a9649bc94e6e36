//! Command registry: reversible actions resolved by name and direction

use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::Arc;
use parking_lot::RwLock;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ProvenanceError;

/// Which half of a reversible action a handler implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Do,
    Undo,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Do => f.write_str("do"),
            Direction::Undo => f.write_str("undo"),
        }
    }
}

/// Names usable as action identifiers in the registry and history
pub trait ActionName: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> ActionName for T where T: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// Registry key: an action name plus a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey<N> {
    pub action: N,
    pub direction: Direction,
}

impl<N: ActionName> ActionKey<N> {
    pub fn new(action: N, direction: Direction) -> Self {
        Self { action, direction }
    }

    /// Key of the forward handler
    pub fn forward(action: N) -> Self {
        Self::new(action, Direction::Do)
    }

    /// Key of the inverse handler
    pub fn inverse(action: N) -> Self {
        Self::new(action, Direction::Undo)
    }
}

impl<N: ActionName> Display for ActionKey<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.direction, self.action)
    }
}

/// An executable handler receiving the captured argument snapshot
pub type Handler<A> = Arc<dyn Fn(&[A]) -> anyhow::Result<()> + Send + Sync>;

/// Maps action keys to handlers
///
/// Registering an existing key replaces the previous handler.
pub struct CommandRegistry<N: ActionName, A> {
    handlers: Arc<RwLock<AHashMap<ActionKey<N>, Handler<A>>>>,
}

impl<N: ActionName, A: 'static> CommandRegistry<N, A> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(AHashMap::new())),
        }
    }

    /// Register a handler, replacing any handler already under `key`
    pub fn register<F>(&self, key: ActionKey<N>, handler: F)
    where
        F: Fn(&[A]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let replaced = self.handlers.write().insert(key, Arc::new(handler));
        if replaced.is_some() {
            tracing::debug!("Replaced handler for {}", key);
        }
    }

    /// Look up the handler for a key
    pub fn resolve(&self, key: ActionKey<N>) -> Result<Handler<A>, ProvenanceError> {
        self.handlers
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| ProvenanceError::UnregisteredCommand {
                action: key.action.to_string(),
                direction: key.direction,
            })
    }

    /// Resolve and run a handler with the given arguments
    ///
    /// The registry lock is released before the handler runs.
    pub fn invoke(&self, key: ActionKey<N>, args: &[A]) -> Result<(), ProvenanceError> {
        let handler = self.resolve(key)?;
        handler(args).map_err(|source| ProvenanceError::Handler {
            action: key.action.to_string(),
            direction: key.direction,
            source,
        })
    }

    /// Whether a handler exists for a key
    pub fn is_registered(&self, key: ActionKey<N>) -> bool {
        self.handlers.read().contains_key(&key)
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl<N: ActionName, A> Clone for CommandRegistry<N, A> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<N: ActionName, A: 'static> Default for CommandRegistry<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Op {
        Bump,
        Reset,
    }

    impl Display for Op {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Op::Bump => f.write_str("bump"),
                Op::Reset => f.write_str("reset"),
            }
        }
    }

    #[test]
    fn test_key_display_uses_direction_prefix() {
        assert_eq!(ActionKey::forward(Op::Bump).to_string(), "do_bump");
        assert_eq!(ActionKey::inverse(Op::Reset).to_string(), "undo_reset");
    }

    #[test]
    fn test_invoke_unregistered_fails() {
        let registry = CommandRegistry::<Op, i64>::new();
        let err = registry.invoke(ActionKey::forward(Op::Bump), &[1]).unwrap_err();
        match err {
            ProvenanceError::UnregisteredCommand { action, direction } => {
                assert_eq!(action, "bump");
                assert_eq!(direction, Direction::Do);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = CommandRegistry::<Op, i64>::new();
        let total = Arc::new(Mutex::new(0));

        let t = total.clone();
        registry.register(ActionKey::forward(Op::Bump), move |args| {
            *t.lock() += args[0];
            Ok(())
        });
        let t = total.clone();
        registry.register(ActionKey::forward(Op::Bump), move |args| {
            *t.lock() += args[0] * 10;
            Ok(())
        });

        registry.invoke(ActionKey::forward(Op::Bump), &[2]).unwrap();
        assert_eq!(*total.lock(), 20);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_directions_are_independent() {
        let registry = CommandRegistry::<Op, i64>::new();
        registry.register(ActionKey::forward(Op::Reset), |_| Ok(()));

        assert!(registry.is_registered(ActionKey::forward(Op::Reset)));
        assert!(!registry.is_registered(ActionKey::inverse(Op::Reset)));
    }

    #[test]
    fn test_handler_failure_is_wrapped() {
        let registry = CommandRegistry::<Op, i64>::new();
        registry.register(ActionKey::inverse(Op::Bump), |_| anyhow::bail!("nope"));

        let err = registry.invoke(ActionKey::inverse(Op::Bump), &[]).unwrap_err();
        assert_eq!(err.handler_error().map(|e| e.to_string()), Some("nope".to_string()));
    }
}
