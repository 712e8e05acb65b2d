//! Render surface abstraction consuming view trees.

#[cfg(any(test, feature = "testing"))]
use std::sync::{Arc, Mutex};

#[cfg(any(test, feature = "testing"))]
use crate::binding::InputEvent;
#[cfg(any(test, feature = "testing"))]
use crate::view::Attr;
use crate::view::ViewNode;
use crate::Dispatcher;

/// External collaborator that puts view trees on a display surface.
///
/// `render` is called with the tree derived from the latest state after
/// every state change, plus a dispatcher handle the surface uses to
/// evaluate the tree's event bindings when the user interacts with a
/// rendered interaction point. Rendering and diffing semantics are
/// entirely the surface's business.
pub trait RenderSurface<A: Send>: Send {
    fn render(&mut self, tree: ViewNode<A>, dispatcher: &Dispatcher<A>);
}

/// Test surface that captures rendered trees and can replay interactions.
///
/// Only available with the `testing` feature.
///
/// Clones share the same capture storage, so keep one clone and hand the
/// other to the runtime:
///
/// ```rust
/// use uniflow::{create_test_spawner, el, RuntimeConfig, TestRuntime, TestSurface, ViewNode};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Action { Noop }
///
/// #[derive(Clone, PartialEq)]
/// struct Model;
///
/// fn reduce(state: &Model, _action: &Action) -> Model { state.clone() }
/// fn view(_state: &Model) -> ViewNode<Action> { el("main", vec![], vec![]) }
///
/// let surface = TestSurface::new();
/// let runtime = TestRuntime::new(
///     RuntimeConfig::new(Model, reduce),
///     view,
///     surface.clone(),
///     create_test_spawner(),
/// );
/// let _driver = runtime.run();
///
/// assert_eq!(surface.count(), 1);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct TestSurface<A: Send> {
    renders: Arc<Mutex<Vec<ViewNode<A>>>>,
    dispatcher: Arc<Mutex<Option<Dispatcher<A>>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<A: Send> Clone for TestSurface<A> {
    fn clone(&self) -> Self {
        Self {
            renders: Arc::clone(&self.renders),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<A: Send + 'static> Default for TestSurface<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<A: Send> RenderSurface<A> for TestSurface<A> {
    fn render(&mut self, tree: ViewNode<A>, dispatcher: &Dispatcher<A>) {
        *self.dispatcher.lock().unwrap() = Some(dispatcher.clone());
        self.renders.lock().unwrap().push(tree);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<A: Send + 'static> TestSurface<A> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
            dispatcher: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of renders that have occurred.
    pub fn count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }

    /// Access the captured trees with a closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[ViewNode<A>]) -> R,
    {
        let renders = self.renders.lock().unwrap();
        f(&renders)
    }

    /// Replay a raw interaction event against the latest rendered tree.
    ///
    /// Evaluates every binding set attached under `interaction` anywhere
    /// in the tree, in tree order, the way a real surface would route a
    /// key event to the bindings of the focused element.
    pub fn fire(&self, interaction: &str, event: &InputEvent)
    where
        A: Clone,
    {
        let dispatcher = self.dispatcher.lock().unwrap().clone();
        let Some(dispatcher) = dispatcher else { return };
        let renders = self.renders.lock().unwrap();
        let Some(tree) = renders.last() else { return };
        fire_node(tree, interaction, event, &dispatcher);
    }
}

#[cfg(any(test, feature = "testing"))]
fn fire_node<A: Clone + Send + 'static>(
    node: &ViewNode<A>,
    interaction: &str,
    event: &InputEvent,
    dispatcher: &Dispatcher<A>,
) {
    if let ViewNode::Element {
        attrs, children, ..
    } = node
    {
        for attr in attrs {
            if let Attr::On(name, bindings) = attr {
                if name == interaction {
                    bindings.evaluate(event, dispatcher);
                }
            }
        }
        for child in children {
            fire_node(child, interaction, event, dispatcher);
        }
    }
}
