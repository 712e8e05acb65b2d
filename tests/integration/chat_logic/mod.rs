use uniflow::{attr, el, on, text, ActionSpec, Attr, Binding, BindingSet, InputEvent, ViewNode};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ChatAction {
    Messages(Vec<String>),
    Value(String),
    Clear,
    ConnectionLost,
    Unknown,
    Boom,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChatModel {
    pub(crate) messages: Vec<String>,
    pub(crate) value: String,
    pub(crate) connected: bool,
}

impl ChatModel {
    pub(crate) fn initial() -> Self {
        Self {
            messages: Vec::new(),
            value: String::new(),
            connected: true,
        }
    }
}

pub(crate) fn chat_reducer(state: &ChatModel, action: &ChatAction) -> ChatModel {
    match action {
        ChatAction::Messages(messages) => ChatModel {
            messages: messages.clone(),
            ..state.clone()
        },
        ChatAction::Value(value) => ChatModel {
            value: value.clone(),
            ..state.clone()
        },
        ChatAction::Clear => ChatModel {
            value: String::new(),
            ..state.clone()
        },
        ChatAction::ConnectionLost => ChatModel {
            connected: false,
            ..state.clone()
        },
        ChatAction::Boom => panic!("boom"),
        _ => state.clone(),
    }
}

pub(crate) fn chat_view(state: &ChatModel) -> ViewNode<ChatAction> {
    el(
        "main",
        vec![],
        vec![
            el(
                "header",
                vec![],
                vec![
                    el("h1", vec![], vec![text("chat")]),
                    el(
                        "input",
                        vec![
                            attr("placeholder", "Say something"),
                            attr("value", &state.value),
                            on(
                                "keyup",
                                BindingSet::from(vec![
                                    Binding::always(ActionSpec::derive(|e: &InputEvent| {
                                        ChatAction::Value(e.value.clone())
                                    })),
                                    Binding::on_key(
                                        "Enter",
                                        ActionSpec::literal(ChatAction::Clear),
                                    ),
                                ]),
                            ),
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

pub(crate) fn msgs(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// The rendered input's `value` attribute, wherever the input sits.
pub(crate) fn input_value(tree: &ViewNode<ChatAction>) -> Option<String> {
    match tree {
        ViewNode::Element {
            tag,
            attrs,
            children,
        } => {
            if tag == "input" {
                for a in attrs {
                    if let Attr::Plain(name, value) = a {
                        if name == "value" {
                            return Some(value.clone());
                        }
                    }
                }
            }
            children.iter().find_map(input_value)
        }
        ViewNode::Text(_) => None,
    }
}

/// All rendered `li` texts, in tree order.
pub(crate) fn message_items(tree: &ViewNode<ChatAction>) -> Vec<String> {
    let mut items = Vec::new();
    collect_items(tree, &mut items);
    items
}

fn collect_items(node: &ViewNode<ChatAction>, items: &mut Vec<String>) {
    if let ViewNode::Element { tag, children, .. } = node {
        if tag == "li" {
            for child in children {
                if let ViewNode::Text(content) = child {
                    items.push(content.clone());
                }
            }
        }
        for child in children {
            collect_items(child, items);
        }
    }
}
