//! Message-stream capability interfaces and the in-memory implementation.
//!
//! The runtime never talks to a transport directly. It consumes these
//! capability traits: [`InboundChannel`] feeds raw payloads into a
//! [`Subscription`](crate::Subscription) pump, and [`OutboundGate`] is the
//! send half captured by emit bindings. [`MessageStream`] ties the two to a
//! named event on an endpoint, the way a socket exposes `on(event)` and
//! `emit(event)`.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;
#[cfg(any(test, feature = "testing"))]
use std::task::{Context, Poll};

/// Boxed future type used at the capability seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Receive half of a named event channel.
///
/// `next` resolves to `Some(payload)` for each event the source emits, in
/// the source's emission order, and to `None` once the source has
/// disconnected and will produce no further events. Returning `None` is
/// how a channel reports disconnection; the subscription pump turns it
/// into the subscription's synthetic action so the condition is never
/// silent.
pub trait InboundChannel<Raw>: Send {
    fn next(&mut self) -> BoxFuture<'_, Option<Raw>>;
}

impl<Raw, C> InboundChannel<Raw> for Box<C>
where
    C: InboundChannel<Raw> + ?Sized,
{
    fn next(&mut self) -> BoxFuture<'_, Option<Raw>> {
        (**self).next()
    }
}

/// Send half of a named event channel.
///
/// This is the one side channel allowed to push data outward without going
/// through the reducer; emit bindings capture a gate at construction time.
pub trait OutboundGate<Raw>: Send + Sync {
    fn send(&self, payload: Raw);
}

/// A message-stream endpoint exposing per-event send and receive
/// capabilities.
pub trait MessageStream {
    type Raw: Send + 'static;

    /// Send capability for the named event.
    fn emit(&self, event: &str) -> Box<dyn OutboundGate<Self::Raw>>;

    /// Receive capability for the named event.
    fn on(&self, event: &str) -> Box<dyn InboundChannel<Self::Raw>>;
}

/// In-memory loopback [`MessageStream`].
///
/// Payloads sent through `emit(event)` arrive on the channel returned by
/// `on(event)` for the same name. One queue exists per event name; a
/// second channel for the same name competes for payloads rather than
/// receiving copies. Useful for tests and demos where a transport would
/// be noise.
pub struct MemoryStream<Raw> {
    topics: Arc<Mutex<HashMap<String, (flume::Sender<Raw>, flume::Receiver<Raw>)>>>,
}

impl<Raw> Clone for MemoryStream<Raw> {
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
        }
    }
}

impl<Raw: Send + 'static> Default for MemoryStream<Raw> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Raw: Send + 'static> MemoryStream<Raw> {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn topic(&self, event: &str) -> (flume::Sender<Raw>, flume::Receiver<Raw>) {
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        topics
            .entry(event.to_string())
            .or_insert_with(flume::unbounded)
            .clone()
    }
}

impl<Raw: Send + 'static> MessageStream for MemoryStream<Raw> {
    type Raw = Raw;

    fn emit(&self, event: &str) -> Box<dyn OutboundGate<Raw>> {
        Box::new(MemoryGate(self.topic(event).0))
    }

    fn on(&self, event: &str) -> Box<dyn InboundChannel<Raw>> {
        Box::new(MemoryChannel(self.topic(event).1))
    }
}

struct MemoryGate<Raw>(flume::Sender<Raw>);

impl<Raw: Send> OutboundGate<Raw> for MemoryGate<Raw> {
    fn send(&self, payload: Raw) {
        self.0.send(payload).ok();
    }
}

struct MemoryChannel<Raw>(flume::Receiver<Raw>);

impl<Raw: Send + 'static> InboundChannel<Raw> for MemoryChannel<Raw> {
    fn next(&mut self) -> BoxFuture<'_, Option<Raw>> {
        Box::pin(async move { self.0.recv_async().await.ok() })
    }
}

/// Finite, preloaded [`InboundChannel`] for tests.
///
/// Only available with the `testing` feature.
///
/// Yields its items in order, then reports disconnection, so a pump driven
/// by a synchronous test spawner runs to completion. `stalled` inserts a
/// pending poll before each item to model a source that is slow relative
/// to its consumers without changing emission order.
#[cfg(any(test, feature = "testing"))]
pub struct ScriptedChannel<Raw> {
    items: VecDeque<Raw>,
    stall: bool,
}

#[cfg(any(test, feature = "testing"))]
impl<Raw: Send + 'static> ScriptedChannel<Raw> {
    pub fn new(items: Vec<Raw>) -> Self {
        Self {
            items: items.into(),
            stall: false,
        }
    }

    /// Yield to the executor once before each item.
    pub fn stalled(mut self) -> Self {
        self.stall = true;
        self
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Raw: Send + 'static> InboundChannel<Raw> for ScriptedChannel<Raw> {
    fn next(&mut self) -> BoxFuture<'_, Option<Raw>> {
        let stall = self.stall;
        Box::pin(async move {
            if stall {
                YieldOnce(false).await;
            }
            self.items.pop_front()
        })
    }
}

#[cfg(any(test, feature = "testing"))]
struct YieldOnce(bool);

#[cfg(any(test, feature = "testing"))]
impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
