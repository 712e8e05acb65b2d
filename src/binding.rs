//! Declarative event bindings and their evaluator.
//!
//! A view attaches a [`BindingSet`] to an interaction point (for example a
//! `keyup` attribute). When the render surface reports a raw interaction
//! event, the set is evaluated against it: every entry whose trigger
//! matches fires, in declaration order, within the same tick. Each firing
//! entry either dispatches an action or sends outbound data through a
//! captured [`OutboundGate`](crate::OutboundGate); entries that do not
//! match are skipped with no effect.

use std::fmt;
use std::sync::Arc;

use crate::Dispatcher;

/// Raw view-level interaction event, as reported by the render surface.
///
/// `key` names the key for key events (`"Enter"`, `"a"`, ...); `value` is
/// the interaction point's current value (an input field's text).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputEvent {
    pub key: String,
    pub value: String,
}

impl InputEvent {
    pub fn key_up(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Condition deciding whether a binding fires for a given event.
#[derive(Clone)]
pub enum Trigger {
    /// Fires for every event.
    Always,
    /// Fires when the event's key matches the given name.
    Key(String),
    /// Fires when the predicate holds.
    When(Arc<dyn Fn(&InputEvent) -> bool + Send + Sync>),
}

impl Trigger {
    pub fn matches(&self, event: &InputEvent) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Key(key) => event.key == *key,
            Trigger::When(predicate) => predicate(event),
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Always => f.write_str("Always"),
            Trigger::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Trigger::When(_) => f.write_str("When(..)"),
        }
    }
}

/// Predicates compare by shape only.
impl PartialEq for Trigger {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Trigger::Always, Trigger::Always) => true,
            (Trigger::Key(a), Trigger::Key(b)) => a == b,
            (Trigger::When(_), Trigger::When(_)) => true,
            _ => false,
        }
    }
}

/// What a firing binding does.
///
/// The tagged variants replace runtime type inspection of heterogeneous
/// binding arrays: the evaluator matches on the variant instead of probing
/// what kind of value it was handed.
#[derive(Clone)]
pub enum ActionSpec<A> {
    /// Dispatch this action as-is.
    Literal(A),
    /// Dispatch an action derived from the interaction event.
    Derive(Arc<dyn Fn(&InputEvent) -> A + Send + Sync>),
    /// Send outbound data through a captured gate, bypassing the reducer.
    Emit(Arc<dyn Fn(&InputEvent) + Send + Sync>),
}

impl<A> ActionSpec<A> {
    pub fn literal(action: A) -> Self {
        Self::Literal(action)
    }

    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&InputEvent) -> A + Send + Sync + 'static,
    {
        Self::Derive(Arc::new(f))
    }

    pub fn emit<F>(f: F) -> Self
    where
        F: Fn(&InputEvent) + Send + Sync + 'static,
    {
        Self::Emit(Arc::new(f))
    }
}

impl<A: fmt::Debug> fmt::Debug for ActionSpec<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSpec::Literal(action) => f.debug_tuple("Literal").field(action).finish(),
            ActionSpec::Derive(_) => f.write_str("Derive(..)"),
            ActionSpec::Emit(_) => f.write_str("Emit(..)"),
        }
    }
}

/// Closures compare by variant only; literal actions compare by value.
impl<A: PartialEq> PartialEq for ActionSpec<A> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ActionSpec::Literal(a), ActionSpec::Literal(b)) => a == b,
            (ActionSpec::Derive(_), ActionSpec::Derive(_)) => true,
            (ActionSpec::Emit(_), ActionSpec::Emit(_)) => true,
            _ => false,
        }
    }
}

/// One `(trigger, spec)` pair of a binding set.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding<A> {
    pub trigger: Trigger,
    pub spec: ActionSpec<A>,
}

impl<A> Binding<A> {
    pub fn new(trigger: Trigger, spec: ActionSpec<A>) -> Self {
        Self { trigger, spec }
    }

    pub fn always(spec: ActionSpec<A>) -> Self {
        Self::new(Trigger::Always, spec)
    }

    pub fn on_key(key: impl Into<String>, spec: ActionSpec<A>) -> Self {
        Self::new(Trigger::Key(key.into()), spec)
    }

    pub fn when<F>(predicate: F, spec: ActionSpec<A>) -> Self
    where
        F: Fn(&InputEvent) -> bool + Send + Sync + 'static,
    {
        Self::new(Trigger::When(Arc::new(predicate)), spec)
    }
}

/// Ordered sequence of bindings attached to one interaction point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BindingSet<A>(Vec<Binding<A>>);

impl<A> From<Vec<Binding<A>>> for BindingSet<A> {
    fn from(bindings: Vec<Binding<A>>) -> Self {
        Self(bindings)
    }
}

impl<A> BindingSet<A> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, binding: Binding<A>) -> Self {
        self.0.push(binding);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A: Clone + Send + 'static> BindingSet<A> {
    /// Evaluate the set against one raw interaction event.
    ///
    /// Matching entries fire in declaration order within this call; each
    /// dispatching entry produces its own `dispatch`, so every fired
    /// action is individually subject to the runtime's FIFO ordering.
    pub fn evaluate(&self, event: &InputEvent, dispatcher: &Dispatcher<A>) {
        for binding in &self.0 {
            if !binding.trigger.matches(event) {
                continue;
            }
            match &binding.spec {
                ActionSpec::Literal(action) => dispatcher.dispatch(action.clone()),
                ActionSpec::Derive(f) => dispatcher.dispatch(f(event)),
                ActionSpec::Emit(f) => f(event),
            }
        }
    }
}
