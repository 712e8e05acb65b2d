//! The chat example: two action sources feeding one reducer.
//!
//! A `MemoryStream` stands in for a socket. Key-up bindings send the typed
//! line outbound on Enter, and a subscription maps everything arriving on
//! the same topic back into the message list, so sent lines loop straight
//! back into the view.
//!
//! Run with `cargo run --example chat`.

use std::thread;
use std::time::Duration;

use uniflow::{
    attr, el, on, text, ActionSpec, Attr, Binding, BindingSet, BoxFuture, Dispatcher, InputEvent,
    MemoryStream, MessageStream, RenderSurface, Runtime, RuntimeConfig, Subscription, ViewNode,
};

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Received(String),
    Value(String),
    Clear,
    ConnectionLost,
}

#[derive(Clone, Debug, PartialEq)]
struct Model {
    messages: Vec<String>,
    value: String,
    connected: bool,
}

fn reduce(state: &Model, action: &Action) -> Model {
    match action {
        Action::Received(message) => {
            let mut messages = state.messages.clone();
            messages.push(message.clone());
            Model {
                messages,
                ..state.clone()
            }
        }
        Action::Value(value) => Model {
            value: value.clone(),
            ..state.clone()
        },
        Action::Clear => Model {
            value: String::new(),
            ..state.clone()
        },
        Action::ConnectionLost => Model {
            connected: false,
            ..state.clone()
        },
    }
}

fn keyup_bindings(stream: &MemoryStream<String>) -> BindingSet<Action> {
    let send = stream.emit("message");
    BindingSet::from(vec![
        Binding::on_key(
            "Enter",
            ActionSpec::emit(move |e: &InputEvent| send.send(e.value.clone())),
        ),
        Binding::always(ActionSpec::derive(|e: &InputEvent| {
            Action::Value(e.value.clone())
        })),
        Binding::on_key("Enter", ActionSpec::literal(Action::Clear)),
    ])
}

fn chat_view(stream: MemoryStream<String>) -> impl Fn(&Model) -> ViewNode<Action> + Send {
    move |state| {
        el(
            "main",
            vec![],
            vec![
                el(
                    "header",
                    vec![],
                    vec![
                        el("h1", vec![], vec![text("uniflow chat")]),
                        el(
                            "small",
                            vec![],
                            vec![text(if state.connected { "online" } else { "offline" })],
                        ),
                        el(
                            "input",
                            vec![
                                attr("placeholder", "Say something"),
                                attr("value", &state.value),
                                on("keyup", keyup_bindings(&stream)),
                            ],
                            vec![],
                        ),
                    ],
                ),
                el(
                    "ul",
                    vec![],
                    state
                        .messages
                        .iter()
                        .map(|message| el("li", vec![], vec![text(message)]))
                        .collect(),
                ),
            ],
        )
    }
}

struct StdoutSurface;

impl RenderSurface<Action> for StdoutSurface {
    fn render(&mut self, tree: ViewNode<Action>, _dispatcher: &Dispatcher<Action>) {
        let mut out = String::new();
        write_node(&mut out, &tree, 0);
        println!("{out}");
    }
}

fn write_node(out: &mut String, node: &ViewNode<Action>, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        ViewNode::Text(content) => out.push_str(&format!("{pad}{content}\n")),
        ViewNode::Element {
            tag,
            attrs,
            children,
        } => {
            out.push_str(&format!("{pad}<{tag}"));
            for a in attrs {
                match a {
                    Attr::Plain(name, value) => out.push_str(&format!(" {name}={value:?}")),
                    Attr::On(name, bindings) => {
                        out.push_str(&format!(" @{name}[{}]", bindings.len()))
                    }
                }
            }
            out.push_str(">\n");
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let stream = MemoryStream::<String>::new();

    let subscription = Subscription::new(
        "messages",
        stream.on("message"),
        Action::Received,
        || Action::ConnectionLost,
    );

    let config = RuntimeConfig::new(
        Model {
            messages: Vec::new(),
            value: String::new(),
            connected: true,
        },
        reduce,
    )
    .with_subscription(subscription);

    // One thread per spawned future keeps the demo free of an async runtime.
    let spawner = |fut: BoxFuture<'static, ()>| {
        thread::spawn(move || futures::executor::block_on(fut));
    };

    let mut runtime = Runtime::new(config, chat_view(stream.clone()), StdoutSurface, spawner);
    let handle = runtime.handle();
    let dispatcher = runtime.dispatcher();

    let loop_thread = thread::spawn(move || futures::executor::block_on(runtime.run()));

    // Simulate typing "hi" and pressing Enter against the keyup bindings.
    let bindings = keyup_bindings(&stream);
    bindings.evaluate(&InputEvent::key_up("h", "h"), &dispatcher);
    bindings.evaluate(&InputEvent::key_up("i", "hi"), &dispatcher);
    bindings.evaluate(&InputEvent::key_up("Enter", "hi"), &dispatcher);

    thread::sleep(Duration::from_millis(200));
    handle.stop();
    loop_thread.join().ok();
}
