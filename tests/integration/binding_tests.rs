use super::{chat_config, given_a_chat_runtime, input_value, ChatAction, ChatModel};
use uniflow::{
    attr, create_test_spawner, el, on, ActionSpec, Binding, BindingSet, InboundChannel,
    InputEvent, MemoryStream, MessageStream, TestRuntime, TestSurface, ViewNode,
};

#[test]
fn given_a_plain_key_only_the_matching_binding_should_fire() {
    let (mut driver, surface) = given_a_chat_runtime();

    surface.fire("keyup", &InputEvent::key_up("h", "h"));
    driver.process_events();

    // The always-binding updated the value; the Enter-binding was skipped.
    assert_eq!(driver.state().value, "h");
    assert_eq!(surface.count(), 2);
}

#[test]
fn given_an_unbound_interaction_nothing_should_fire() {
    let (mut driver, surface) = given_a_chat_runtime();

    surface.fire("click", &InputEvent::default());
    driver.process_events();

    assert_eq!(driver.state(), &ChatModel::initial());
    assert_eq!(surface.count(), 1);
}

#[test]
fn given_enter_all_matching_bindings_should_fire_in_declaration_order() {
    let (mut driver, surface) = given_a_chat_runtime();

    surface.fire("keyup", &InputEvent::key_up("Enter", "hi"));
    driver.process_events();

    // Two dispatches in one tick: value update first, then clear. Each is
    // its own dispatch, so both renders are observable.
    assert_eq!(surface.count(), 3);
    surface.with_renders(|renders| {
        assert_eq!(input_value(&renders[1]), Some("hi".to_string()));
        assert_eq!(input_value(&renders[2]), Some(String::new()));
    });
    assert_eq!(driver.state().value, "");
}

#[test]
fn given_a_predicate_trigger_the_binding_should_gate_on_the_event_value() {
    let view = |_state: &ChatModel| -> ViewNode<ChatAction> {
        el(
            "input",
            vec![on(
                "keyup",
                BindingSet::new().with(Binding::when(
                    |e: &InputEvent| !e.value.is_empty(),
                    ActionSpec::derive(|e: &InputEvent| ChatAction::Value(e.value.clone())),
                )),
            )],
            vec![],
        )
    };

    let surface = TestSurface::new();
    let runtime = TestRuntime::new(chat_config(), view, surface.clone(), create_test_spawner());
    let mut driver = runtime.run();

    surface.fire("keyup", &InputEvent::key_up("Backspace", ""));
    surface.fire("keyup", &InputEvent::key_up("x", "x"));
    driver.process_events();

    assert_eq!(driver.state().value, "x");
    assert_eq!(surface.count(), 2);
}

#[test]
fn given_an_emit_binding_enter_should_send_outbound_and_update_state_in_one_tick() {
    let stream = MemoryStream::<String>::new();
    let mut inbound = stream.on("message");

    let view_stream = stream.clone();
    let view = move |state: &ChatModel| -> ViewNode<ChatAction> {
        let send = view_stream.emit("message");
        el(
            "input",
            vec![
                attr("value", &state.value),
                on(
                    "keyup",
                    BindingSet::from(vec![
                        Binding::on_key(
                            "Enter",
                            ActionSpec::emit(move |e: &InputEvent| send.send(e.value.clone())),
                        ),
                        Binding::always(ActionSpec::derive(|e: &InputEvent| {
                            ChatAction::Value(e.value.clone())
                        })),
                        Binding::on_key("Enter", ActionSpec::literal(ChatAction::Clear)),
                    ]),
                ),
            ],
            vec![],
        )
    };

    let surface = TestSurface::new();
    let runtime = TestRuntime::new(chat_config(), view, surface.clone(), create_test_spawner());
    let mut driver = runtime.run();

    surface.fire("keyup", &InputEvent::key_up("Enter", "hi"));

    // The outbound send bypassed the reducer and hit the stream directly.
    assert_eq!(
        futures::executor::block_on(inbound.next()),
        Some("hi".to_string())
    );

    driver.process_events();
    assert_eq!(driver.state().value, "");
    assert_eq!(surface.count(), 3);
}
