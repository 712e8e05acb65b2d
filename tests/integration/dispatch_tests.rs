use super::{
    chat_config, chat_reducer, chat_view, given_a_chat_runtime, given_a_chat_runtime_with,
    input_value, message_items, ChatAction, ChatModel,
};
use uniflow::{Fault, FaultSink};

mockall::mock! {
    Sink {}
    impl FaultSink for Sink {
        fn report(&self, fault: &Fault);
    }
}

#[test]
fn given_no_dispatched_actions_should_render_the_initial_view() {
    let (_driver, surface) = given_a_chat_runtime();

    assert_eq!(surface.count(), 1);
    surface.with_renders(|renders| {
        assert_eq!(input_value(&renders[0]), Some(String::new()));
        assert!(message_items(&renders[0]).is_empty());
    });
}

#[test]
fn given_the_chat_scenario_each_action_should_shape_the_state() {
    let (mut driver, _surface) = given_a_chat_runtime();
    let dispatcher = driver.dispatcher();

    dispatcher.dispatch(ChatAction::Value("hi".into()));
    driver.process_events();
    assert_eq!(driver.state().value, "hi");
    assert!(driver.state().messages.is_empty());

    dispatcher.dispatch(ChatAction::Clear);
    driver.process_events();
    assert_eq!(driver.state().value, "");

    dispatcher.dispatch(ChatAction::Messages(vec!["hi".into()]));
    driver.process_events();
    assert_eq!(driver.state().messages, vec!["hi".to_string()]);
    assert_eq!(driver.state().value, "");
}

#[test]
fn given_a_sequence_of_actions_the_final_state_should_equal_the_left_fold() {
    let actions = vec![
        ChatAction::Value("hi".into()),
        ChatAction::Unknown,
        ChatAction::Messages(vec!["hi".into(), "there".into()]),
        ChatAction::Value("yo".into()),
        ChatAction::Clear,
    ];

    let (mut driver, _surface) = given_a_chat_runtime();
    for action in &actions {
        driver.dispatcher().dispatch(action.clone());
    }
    driver.process_events();

    let expected = actions
        .iter()
        .fold(ChatModel::initial(), |state, action| {
            chat_reducer(&state, action)
        });
    assert_eq!(driver.state(), &expected);
}

#[test]
fn given_an_unrecognized_action_state_should_be_unchanged_and_nothing_rendered() {
    let (mut driver, surface) = given_a_chat_runtime();

    driver.dispatcher().dispatch(ChatAction::Unknown);
    driver.process_events();

    assert_eq!(driver.state(), &ChatModel::initial());
    assert_eq!(surface.count(), 1);
}

#[test]
fn given_an_equal_reduction_the_rerender_should_be_skipped() {
    let (mut driver, surface) = given_a_chat_runtime();

    // Clearing an already-empty value reduces to an equal state.
    driver.dispatcher().dispatch(ChatAction::Clear);
    driver.process_events();

    assert_eq!(surface.count(), 1);
}

#[test]
fn given_an_unchanged_state_the_view_should_be_idempotent() {
    let state = ChatModel {
        messages: vec!["hi".into()],
        value: "typing".into(),
        connected: true,
    };

    assert_eq!(chat_view(&state), chat_view(&state));
}

#[test]
fn given_a_panicking_reduction_state_should_survive_and_processing_continue() {
    let mut sink = MockSink::new();
    sink.expect_report()
        .withf(|fault| matches!(fault, Fault::Reducer { .. }))
        .times(1)
        .return_const(());

    let (mut driver, surface) =
        given_a_chat_runtime_with(chat_config().with_fault_sink(sink));
    let dispatcher = driver.dispatcher();

    dispatcher.dispatch(ChatAction::Value("before".into()));
    driver.process_events();

    dispatcher.dispatch(ChatAction::Boom);
    dispatcher.dispatch(ChatAction::Value("after".into()));
    driver.process_events();

    assert_eq!(driver.state().value, "after");
    // Renders: initial, "before", "after". The fault produced none.
    assert_eq!(surface.count(), 3);
    surface.with_renders(|renders| {
        assert_eq!(input_value(&renders[1]), Some("before".to_string()));
        assert_eq!(input_value(&renders[2]), Some("after".to_string()));
    });
}

#[test]
fn given_stop_pending_actions_should_be_dropped() {
    let (mut driver, surface) = given_a_chat_runtime();

    driver.dispatcher().dispatch(ChatAction::Value("pending".into()));
    driver.handle().stop();
    driver.process_events();

    assert_eq!(driver.state(), &ChatModel::initial());
    assert_eq!(surface.count(), 1);
}
