//! The pure state-transition contract.

/// Pure function computing the next state from the current state and an
/// action.
///
/// Implementations must be total over the application's action vocabulary:
/// an action the reducer does not recognize returns a state equal to its
/// input (a wildcard match arm returning `state.clone()`), never an error.
/// The runtime treats an equal result as a no-op and skips the re-render,
/// so an unrecognized action costs one clone and nothing else.
///
/// The `&State` argument makes non-mutation structural: a reducer builds a
/// new value for the fields the matched action changes and clones the rest.
///
/// Closures and function pointers of the matching shape implement this
/// trait directly:
///
/// ```rust
/// use uniflow::Reducer;
///
/// #[derive(Clone, PartialEq)]
/// struct Model { value: String }
///
/// #[derive(Clone)]
/// enum Action { Value(String), Clear }
///
/// fn reduce(state: &Model, action: &Action) -> Model {
///     match action {
///         Action::Value(v) => Model { value: v.clone() },
///         Action::Clear => Model { value: String::new() },
///     }
/// }
///
/// fn assert_reducer<R: Reducer<Model, Action>>(_r: R) {}
/// assert_reducer(reduce);
/// ```
pub trait Reducer<State, A>: Send {
    fn reduce(&self, state: &State, action: &A) -> State;
}

impl<State, A, F> Reducer<State, A> for F
where
    F: Fn(&State, &A) -> State + Send,
{
    fn reduce(&self, state: &State, action: &A) -> State {
        self(state, action)
    }
}
