//! A unidirectional-data-flow UI runtime.
//!
//! One mutable application state, updated exclusively through actions
//! processed by a pure reducer, driving a declarative view tree. Actions
//! arrive from two kinds of sources: [`Subscription`]s pumping external
//! asynchronous events, and [`BindingSet`]s evaluated when the rendered
//! view reports an interaction. Both feed the same serialized dispatch
//! queue, so the reducer observes one global FIFO order and never races on
//! state.
//!
//! ## Example
//!
//! ```rust
//! use uniflow::{
//!     el, on, text, ActionSpec, Binding, BindingSet, BoxFuture, Dispatcher, InputEvent,
//!     RenderSurface, Runtime, RuntimeConfig, ViewNode,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Action {
//!     Value(String),
//!     Clear,
//! }
//!
//! #[derive(Clone, PartialEq)]
//! struct Model {
//!     value: String,
//! }
//!
//! fn reduce(state: &Model, action: &Action) -> Model {
//!     match action {
//!         Action::Value(v) => Model { value: v.clone() },
//!         Action::Clear => Model { value: String::new() },
//!     }
//! }
//!
//! fn view(state: &Model) -> ViewNode<Action> {
//!     el(
//!         "input",
//!         vec![on(
//!             "keyup",
//!             BindingSet::from(vec![
//!                 Binding::always(ActionSpec::derive(|e: &InputEvent| {
//!                     Action::Value(e.value.clone())
//!                 })),
//!                 Binding::on_key("Enter", ActionSpec::literal(Action::Clear)),
//!             ]),
//!         )],
//!         vec![text(&state.value)],
//!     )
//! }
//!
//! struct NullSurface;
//! impl RenderSurface<Action> for NullSurface {
//!     fn render(&mut self, _tree: ViewNode<Action>, _dispatcher: &Dispatcher<Action>) {}
//! }
//!
//! // Hand spawned futures to your chosen executor
//! // e.g., tokio::spawn(fut); or a thread running a local executor.
//! let spawner = |_fut: BoxFuture<'static, ()>| {};
//!
//! let config = RuntimeConfig::new(Model { value: String::new() }, reduce);
//! let runtime = Runtime::new(config, view, NullSurface, spawner);
//! let handle = runtime.handle();
//!
//! // Await `runtime.run()` on your executor; stop it via `handle.stop()`.
//! # let _ = handle;
//! ```

// Module declarations
mod binding;
mod dispatch;
mod fault;
mod reducer;
mod runtime;
mod stream;
mod subscription;
mod surface;
mod view;

// Public re-exports
pub use binding::{ActionSpec, Binding, BindingSet, InputEvent, Trigger};
pub use dispatch::Dispatcher;
pub use fault::{Fault, FaultSink, TracingSink};
pub use reducer::Reducer;
pub use runtime::{Runtime, RuntimeConfig, RuntimeHandle, Spawner};
pub use stream::{BoxFuture, InboundChannel, MemoryStream, MessageStream, OutboundGate};
pub use subscription::Subscription;
pub use surface::RenderSurface;
pub use view::{attr, el, on, text, Attr, View, ViewNode};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, TestDriver, TestRuntime};
#[cfg(any(test, feature = "testing"))]
pub use stream::ScriptedChannel;
#[cfg(any(test, feature = "testing"))]
pub use surface::TestSurface;
