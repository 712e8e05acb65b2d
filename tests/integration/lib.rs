mod chat_logic;

pub(crate) use chat_logic::*;

mod binding_tests;
mod dispatch_tests;

use uniflow::{
    create_test_spawner, BoxFuture, RuntimeConfig, Subscription, TestDriver, TestRuntime,
    TestSurface, ViewNode,
};

pub(crate) type ChatReducerFn = fn(&ChatModel, &ChatAction) -> ChatModel;
pub(crate) type ChatViewFn = fn(&ChatModel) -> ViewNode<ChatAction>;
pub(crate) type TestSpawnerFn = fn(BoxFuture<'static, ()>);
pub(crate) type ChatConfig = RuntimeConfig<ChatModel, ChatAction, ChatReducerFn>;
pub(crate) type ChatDriver = TestDriver<
    ChatModel,
    ChatAction,
    ChatReducerFn,
    ChatViewFn,
    TestSurface<ChatAction>,
    TestSpawnerFn,
>;

pub(crate) fn chat_config() -> ChatConfig {
    RuntimeConfig::new(ChatModel::initial(), chat_reducer as ChatReducerFn)
}

pub(crate) fn given_a_chat_runtime() -> (ChatDriver, TestSurface<ChatAction>) {
    given_a_chat_runtime_with(chat_config())
}

pub(crate) fn given_a_subscribed_chat_runtime(
    subscription: Subscription<ChatAction>,
) -> (ChatDriver, TestSurface<ChatAction>) {
    given_a_chat_runtime_with(chat_config().with_subscription(subscription))
}

pub(crate) fn given_a_chat_runtime_with(
    config: ChatConfig,
) -> (ChatDriver, TestSurface<ChatAction>) {
    let surface = TestSurface::new();
    let runtime = TestRuntime::new(
        config,
        chat_view as ChatViewFn,
        surface.clone(),
        create_test_spawner(),
    );
    (runtime.run(), surface)
}
