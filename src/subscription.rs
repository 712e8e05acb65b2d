//! Subscription adapter bridging external event sources to the dispatcher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::fault::{Fault, FaultSink};
use crate::stream::{BoxFuture, InboundChannel};
use crate::Dispatcher;

pub(crate) type Pump<A> = Box<
    dyn FnOnce(Dispatcher<A>, Arc<AtomicBool>, Arc<dyn FaultSink>) -> BoxFuture<'static, ()>
        + Send,
>;

/// Named adapter from an external asynchronous event source to the
/// runtime's action queue.
///
/// Each subscription runs one pump task that awaits the channel and
/// dispatches one action per raw event, so every event reaches the queue
/// and a single source's events arrive in emission order. No ordering is
/// guaranteed across distinct subscriptions.
///
/// At most one subscription is active per name: registering a second
/// subscription under the same name replaces the first.
///
/// When the channel disconnects (`next` resolves to `None`), the pump
/// reports a [`Fault::SubscriptionLost`] and dispatches the `on_lost`
/// synthetic action, so the application can represent degraded
/// connectivity in state instead of silently losing the source.
///
/// # Example
///
/// ```rust
/// use uniflow::{MemoryStream, MessageStream, Subscription};
///
/// #[derive(Clone)]
/// enum Action {
///     Received(String),
///     ConnectionLost,
/// }
///
/// let stream = MemoryStream::<String>::new();
/// let subscription = Subscription::new(
///     "messages",
///     stream.on("message"),
///     Action::Received,
///     || Action::ConnectionLost,
/// );
/// assert_eq!(subscription.name(), "messages");
/// ```
pub struct Subscription<A: Send> {
    name: String,
    pump: Pump<A>,
}

impl<A: Send + 'static> Subscription<A> {
    /// Bind a channel to the dispatcher under `name`.
    ///
    /// `map` turns each raw payload into an action; `on_lost` builds the
    /// synthetic action dispatched when the channel disconnects.
    pub fn new<Raw, C, M, L>(name: impl Into<String>, channel: C, map: M, on_lost: L) -> Self
    where
        Raw: Send + 'static,
        C: InboundChannel<Raw> + 'static,
        M: Fn(Raw) -> A + Send + 'static,
        L: FnOnce() -> A + Send + 'static,
    {
        let name = name.into();
        let pump_name = name.clone();
        let pump: Pump<A> = Box::new(move |dispatcher, active, faults| {
            Box::pin(async move {
                let mut channel = channel;
                loop {
                    match channel.next().await {
                        Some(raw) => {
                            if !active.load(Ordering::Acquire) {
                                break;
                            }
                            dispatcher.dispatch(map(raw));
                        }
                        None => {
                            if active.load(Ordering::Acquire) {
                                faults.report(&Fault::SubscriptionLost {
                                    name: pump_name.clone(),
                                });
                                dispatcher.dispatch(on_lost());
                            }
                            break;
                        }
                    }
                }
            })
        });

        Self { name, pump }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Pump<A>) {
        (self.name, self.pump)
    }
}
