//! The runtime loop that serializes all action processing.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::dispatch::Signal;
use crate::fault::{panic_detail, Fault, FaultSink, TracingSink};
use crate::stream::BoxFuture;
use crate::subscription::Subscription;
use crate::surface::RenderSurface;
use crate::view::View;
use crate::{Dispatcher, Reducer};

/// A spawner for executing futures on an async runtime.
///
/// Subscription pumps are handed to this abstraction, so the runtime works
/// with whatever concurrency model the application uses (tokio, async-std,
/// a thread per pump, ...).
///
/// Function pointers and closures of the matching signature implement this
/// trait via the blanket implementation.
pub trait Spawner {
    fn spawn(&self, future: BoxFuture<'static, ()>);
}

impl<F> Spawner for F
where
    F: Fn(BoxFuture<'static, ()>),
{
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self(future)
    }
}

type SubFlags = Arc<Mutex<HashMap<String, Arc<AtomicBool>>>>;

/// Everything the runtime needs to start, passed explicitly to
/// [`Runtime::new`]: the initial state, the reducer, the subscriptions to
/// register, and the fault sink (defaults to [`TracingSink`]).
pub struct RuntimeConfig<State, A, R>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
{
    pub initial_state: State,
    pub reducer: R,
    pub subscriptions: Vec<Subscription<A>>,
    pub fault_sink: Arc<dyn FaultSink>,
}

impl<State, A, R> RuntimeConfig<State, A, R>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
{
    pub fn new(initial_state: State, reducer: R) -> Self {
        Self {
            initial_state,
            reducer,
            subscriptions: Vec::new(),
            fault_sink: Arc::new(TracingSink),
        }
    }

    pub fn with_subscription(mut self, subscription: Subscription<A>) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub fn with_fault_sink(mut self, sink: impl FaultSink + 'static) -> Self {
        self.fault_sink = Arc::new(sink);
        self
    }
}

/// The runtime core: exclusive owner of the canonical state.
///
/// It consumes actions from one FIFO queue fed by every [`Dispatcher`]
/// clone and processes each action to completion (reduce, then render if
/// the state changed) before starting the next. Producers run concurrently
/// wherever the [`Spawner`] puts them; consumption is strictly serialized,
/// so the reducer never observes two actions at once.
///
/// Per processed action:
/// - `next = reducer.reduce(&state, &action)`, with panics caught: on a
///   reducer fault the state is left unchanged, the fault goes to the
///   fault sink, and the loop continues with the next action.
/// - If `next != state` (by the state's `PartialEq`), the state is
///   replaced and `view(state)` is handed to the render surface.
///   An equal result is a no-op: no replacement, no re-render.
///
/// See the [crate-level documentation](crate) for a complete example.
///
/// # Type Parameters
///
/// * `State` - The application state type
/// * `A` - The action type
/// * `R` - The reducer implementation (implements [`Reducer`])
/// * `V` - The view implementation (implements [`View`])
/// * `S` - The render surface (implements [`RenderSurface`])
/// * `Sp` - The spawner (implements [`Spawner`])
pub struct Runtime<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    reducer: R,
    view: V,
    surface: S,
    spawner: Sp,
    queue: flume::Receiver<Signal<A>>,
    dispatcher: Dispatcher<A>,
    state: State,
    subscriptions: Vec<Subscription<A>>,
    sub_flags: SubFlags,
    stopping: Arc<AtomicBool>,
    faults: Arc<dyn FaultSink>,
}

impl<State, A, R, V, S, Sp> Runtime<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    /// Create a new runtime from an explicit configuration.
    ///
    /// Nothing runs until [`run`](Self::run) is called.
    pub fn new(config: RuntimeConfig<State, A, R>, view: V, surface: S, spawner: Sp) -> Self {
        let (sender, queue) = flume::unbounded();
        let dispatcher = Dispatcher::new(sender);

        Runtime {
            reducer: config.reducer,
            view,
            surface,
            spawner,
            queue,
            dispatcher,
            state: config.initial_state,
            subscriptions: config.subscriptions,
            sub_flags: Arc::new(Mutex::new(HashMap::new())),
            stopping: Arc::new(AtomicBool::new(false)),
            faults: config.fault_sink,
        }
    }

    /// Handle for enqueuing actions from outside the runtime.
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// Control handle for stopping the runtime and tearing down
    /// subscriptions.
    pub fn handle(&self) -> RuntimeHandle<A> {
        RuntimeHandle {
            dispatcher: self.dispatcher.clone(),
            stopping: Arc::clone(&self.stopping),
            sub_flags: Arc::clone(&self.sub_flags),
        }
    }

    /// Render the initial view, register all subscriptions, then process
    /// actions until stopped.
    ///
    /// Actions can be dispatched from any thread, but are always processed
    /// sequentially where this future is polled. Once
    /// [`RuntimeHandle::stop`] is called, pending not-yet-processed
    /// actions are dropped.
    pub async fn run(&mut self) {
        tracing::debug!("runtime started");

        let tree = self.view.view(&self.state);
        self.surface.render(tree, &self.dispatcher);

        self.register_subscriptions();

        loop {
            if self.stopping.load(Ordering::Acquire) {
                break;
            }
            match self.queue.recv_async().await {
                Ok(Signal::Action(action)) => {
                    if self.stopping.load(Ordering::Acquire) {
                        break;
                    }
                    self.step(action);
                }
                Ok(Signal::Stop) | Err(_) => break,
            }
        }

        tracing::debug!("runtime stopped");
    }

    /// Spawn one pump task per subscription.
    ///
    /// At most one subscription stays active per name: a later
    /// registration under an already-used name replaces the earlier one
    /// before it ever pumps.
    fn register_subscriptions(&mut self) {
        let mut pending: Vec<Subscription<A>> = Vec::new();
        for subscription in self.subscriptions.drain(..) {
            if let Some(slot) = pending
                .iter_mut()
                .find(|existing| existing.name() == subscription.name())
            {
                *slot = subscription;
            } else {
                pending.push(subscription);
            }
        }

        for subscription in pending {
            let (name, pump) = subscription.into_parts();
            let active = Arc::new(AtomicBool::new(true));
            tracing::debug!(subscription = %name, "subscription registered");
            self.sub_flags
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(name, Arc::clone(&active));
            self.spawner.spawn(pump(
                self.dispatcher.clone(),
                active,
                Arc::clone(&self.faults),
            ));
        }
    }

    /// Process one action to completion.
    fn step(&mut self, action: A) {
        let reduced = catch_unwind(AssertUnwindSafe(|| {
            self.reducer.reduce(&self.state, &action)
        }));

        let next = match reduced {
            Ok(next) => next,
            Err(payload) => {
                self.faults.report(&Fault::Reducer {
                    detail: panic_detail(payload),
                });
                return;
            }
        };

        // No-op reductions skip the re-render entirely.
        if next == self.state {
            return;
        }

        self.state = next;
        let tree = self.view.view(&self.state);
        self.surface.render(tree, &self.dispatcher);
    }
}

/// Control handle returned by [`Runtime::handle`].
pub struct RuntimeHandle<A: Send> {
    dispatcher: Dispatcher<A>,
    stopping: Arc<AtomicBool>,
    sub_flags: SubFlags,
}

impl<A: Send> Clone for RuntimeHandle<A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            stopping: Arc::clone(&self.stopping),
            sub_flags: Arc::clone(&self.sub_flags),
        }
    }
}

impl<A: Send> RuntimeHandle<A> {
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// Stop the runtime: deactivate every subscription and drop pending,
    /// not-yet-processed actions.
    ///
    /// Best-effort teardown. An action already being reduced runs to
    /// completion; a pump suspended on its source exits at the next event.
    pub fn stop(&self) {
        tracing::debug!("runtime stop requested");
        self.stopping.store(true, Ordering::Release);
        for flag in self
            .sub_flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            flag.store(false, Ordering::Release);
        }
        self.dispatcher.stop();
    }

    /// Deactivate the named subscription. Returns `false` when no
    /// subscription was registered under that name.
    pub fn unsubscribe(&self, name: &str) -> bool {
        let flags = self
            .sub_flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match flags.get(name) {
            Some(flag) => {
                flag.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
pub fn test_spawner_fn(fut: BoxFuture<'static, ()>) {
    futures::executor::block_on(fut);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that executes futures synchronously.
///
/// This blocks on each spawned future immediately, so a subscription pump
/// backed by a finite channel (see
/// [`ScriptedChannel`](crate::ScriptedChannel)) runs to completion during
/// registration and its actions are queued deterministically.
pub fn create_test_spawner() -> fn(BoxFuture<'static, ()>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime with manual action processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`Runtime::run`], running this runtime does not loop: it renders
/// the initial view, registers subscriptions, and returns a [`TestDriver`]
/// whose [`process_events`](TestDriver::process_events) drains the queue
/// on demand, giving tests precise control over processing order.
pub struct TestRuntime<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    runtime: Runtime<State, A, R, V, S, Sp>,
}

#[cfg(any(test, feature = "testing"))]
impl<State, A, R, V, S, Sp> TestRuntime<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    pub fn new(config: RuntimeConfig<State, A, R>, view: V, surface: S, spawner: Sp) -> Self {
        Self {
            runtime: Runtime::new(config, view, surface, spawner),
        }
    }

    /// Render the initial view, register subscriptions, and return the
    /// driver for manual processing.
    pub fn run(mut self) -> TestDriver<State, A, R, V, S, Sp> {
        let tree = self.runtime.view.view(&self.runtime.state);
        self.runtime
            .surface
            .render(tree, &self.runtime.dispatcher);

        self.runtime.register_subscriptions();

        TestDriver {
            runtime: self.runtime,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Driver returned by [`TestRuntime::run`].
pub struct TestDriver<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    runtime: Runtime<State, A, R, V, S, Sp>,
}

#[cfg(any(test, feature = "testing"))]
impl<State, A, R, V, S, Sp> TestDriver<State, A, R, V, S, Sp>
where
    State: Clone + PartialEq + Send + 'static,
    A: Send + 'static,
    R: Reducer<State, A>,
    V: View<State, A>,
    S: RenderSurface<A>,
    Sp: Spawner,
{
    /// Process all queued actions, honoring the stop flag the way the
    /// real loop does.
    pub fn process_events(&mut self) {
        loop {
            if self.runtime.stopping.load(Ordering::Acquire) {
                break;
            }
            match self.runtime.queue.try_recv() {
                Ok(Signal::Action(action)) => {
                    if self.runtime.stopping.load(Ordering::Acquire) {
                        break;
                    }
                    self.runtime.step(action);
                }
                Ok(Signal::Stop) | Err(_) => break,
            }
        }
    }

    /// Current canonical state.
    pub fn state(&self) -> &State {
        &self.runtime.state
    }

    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.runtime.dispatcher()
    }

    pub fn handle(&self) -> RuntimeHandle<A> {
        self.runtime.handle()
    }
}
