//! Declarative view trees and the view contract.

use crate::BindingSet;

/// Pure function deriving a view tree from the current state.
///
/// Must be idempotent: calling it twice with an unchanged state yields
/// structurally equal trees. The runtime only calls it after a state
/// change (plus once for the initial render), so views never need to
/// cache.
///
/// Closures and function pointers of the matching shape implement this
/// trait directly.
pub trait View<State, A>: Send {
    fn view(&self, state: &State) -> ViewNode<A>;
}

impl<State, A, F> View<State, A> for F
where
    F: Fn(&State) -> ViewNode<A> + Send,
{
    fn view(&self, state: &State) -> ViewNode<A> {
        self(state)
    }
}

/// Renderer-agnostic description of UI structure.
///
/// The `[tag, attributes, children]` shape of the tree is what the render
/// surface consumes; the runtime defines no rendering or diffing
/// semantics. Structural equality compares binding attributes by shape
/// (trigger plus spec variant), since bound closures are not comparable.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewNode<A> {
    Element {
        tag: String,
        attrs: Vec<Attr<A>>,
        children: Vec<ViewNode<A>>,
    },
    Text(String),
}

/// Element attribute: a plain key/value pair, or an interaction point
/// carrying event bindings keyed by interaction name.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr<A> {
    Plain(String, String),
    On(String, BindingSet<A>),
}

/// Element node shorthand.
///
/// ```rust
/// use uniflow::{el, text, ViewNode};
///
/// let tree: ViewNode<()> = el(
///     "ul",
///     vec![],
///     ["hi", "there"].iter().map(|m| el("li", vec![], vec![text(*m)])).collect(),
/// );
/// ```
pub fn el<A>(tag: impl Into<String>, attrs: Vec<Attr<A>>, children: Vec<ViewNode<A>>) -> ViewNode<A> {
    ViewNode::Element {
        tag: tag.into(),
        attrs,
        children,
    }
}

/// Text node shorthand.
pub fn text<A>(content: impl Into<String>) -> ViewNode<A> {
    ViewNode::Text(content.into())
}

/// Plain attribute shorthand.
pub fn attr<A>(name: impl Into<String>, value: impl Into<String>) -> Attr<A> {
    Attr::Plain(name.into(), value.into())
}

/// Interaction attribute shorthand.
pub fn on<A>(interaction: impl Into<String>, bindings: BindingSet<A>) -> Attr<A> {
    Attr::On(interaction.into(), bindings)
}
