//! Action dispatch handle backing the runtime's serialized queue.

use flume::Sender;

/// Internal queue message. `Stop` wakes the loop during shutdown.
pub(crate) enum Signal<A> {
    Action(A),
    Stop,
}

/// Cheap-to-clone handle for enqueuing actions into the runtime.
///
/// All clones feed the same FIFO queue, so actions are observed by the
/// reducer in the exact order `dispatch` calls were made, regardless of
/// which thread or task made them. Cloning wraps a lock-free channel
/// sender, so handles can be embedded in view callbacks and subscription
/// pumps freely.
///
/// # Example
///
/// ```rust
/// use uniflow::{RenderSurface, Runtime, RuntimeConfig, ViewNode, el};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Action { Ping }
///
/// #[derive(Clone, PartialEq)]
/// struct Model;
///
/// fn reduce(state: &Model, _action: &Action) -> Model { state.clone() }
/// fn view(_state: &Model) -> ViewNode<Action> { el("main", vec![], vec![]) }
///
/// struct NullSurface;
/// impl RenderSurface<Action> for NullSurface {
///     fn render(&mut self, _tree: ViewNode<Action>, _d: &uniflow::Dispatcher<Action>) {}
/// }
///
/// let spawner = |_fut: uniflow::BoxFuture<'static, ()>| {};
/// let runtime = Runtime::new(RuntimeConfig::new(Model, reduce), view, NullSurface, spawner);
/// let dispatcher = runtime.dispatcher();
/// dispatcher.dispatch(Action::Ping);
/// ```
pub struct Dispatcher<A: Send>(pub(crate) Sender<Signal<A>>);

impl<A: Send> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Send> Dispatcher<A> {
    pub(crate) fn new(sender: Sender<Signal<A>>) -> Self {
        Self(sender)
    }

    /// Enqueue an action for processing.
    ///
    /// Safe to call from any thread, including re-entrantly from view
    /// callbacks while a render is in progress. The action is processed
    /// after every action enqueued before it.
    pub fn dispatch(&self, action: A) {
        self.0.send(Signal::Action(action)).ok();
    }

    /// Wake the runtime loop so it can observe the shutdown flag.
    pub(crate) fn stop(&self) {
        self.0.send(Signal::Stop).ok();
    }
}
