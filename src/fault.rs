//! Fault taxonomy and the error-reporting collaborator.

use std::any::Any;

use thiserror::Error;

/// Non-fatal runtime faults.
///
/// Nothing in this taxonomy stops the runtime loop. A reducer fault leaves
/// state at its pre-fault value and the next action is processed normally;
/// a lost subscription keeps producing nothing but is also surfaced to the
/// application as the subscription's synthetic action.
#[derive(Debug, Error)]
pub enum Fault {
    /// The reducer panicked while processing an action. State is unchanged.
    #[error("reducer failed: {detail}")]
    Reducer { detail: String },

    /// A subscription's external source disconnected or ran dry.
    #[error("subscription `{name}` lost its source")]
    SubscriptionLost { name: String },
}

/// Error-reporting collaborator the runtime hands faults to.
///
/// The runtime never crashes the loop on a fault, but it also never
/// swallows one silently: every fault goes through this sink.
pub trait FaultSink: Send + Sync {
    fn report(&self, fault: &Fault);
}

/// Default sink, logs faults through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl FaultSink for TracingSink {
    fn report(&self, fault: &Fault) {
        tracing::error!(%fault, "runtime fault");
    }
}

/// Best-effort extraction of a panic message from a caught payload.
pub(crate) fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "reducer panicked".to_string()
    }
}
