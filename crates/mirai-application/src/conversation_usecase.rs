//! Conversation use case.
//!
//! Drives one request/response cycle against the model gateway and manages
//! the "awaiting response" state. Per cycle:
//! `Idle → Sending → (Succeeded | Failed) → Idle`.

use mirai_core::gateway::{GatewayReply, ModelGateway, Turn};
use mirai_core::project::{Message, Project, ProjectRepository, ProjectStore};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fixed reply substituted when the model returns empty text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "ごめんね、うまくお返事できなかったよ。もう一度聞いてくれるかな？";

/// Where the current request/response cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// No cycle in flight; sends are accepted.
    Idle,
    /// A gateway call is in flight; further sends are rejected.
    Sending,
}

/// Outcome of a send attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The assistant replied; carries the appended message for display.
    Answered(Message),
    /// The gateway failed. The user's message stays in the history
    /// unanswered so the child can simply send again.
    NoReply,
    /// Empty or whitespace-only input; nothing happened.
    RejectedEmpty,
    /// A prior cycle is still in flight; nothing happened.
    RejectedBusy,
}

/// Sequences a user turn, the external model call, and the assistant turn.
///
/// At most one cycle is in flight at a time; the `Sending` guard rejects a
/// second send rather than queueing it. There is no cancellation and no
/// timeout: a hung gateway call keeps the cycle in `Sending` until it
/// resolves.
pub struct ConversationUseCase {
    store: Arc<RwLock<ProjectStore>>,
    repository: Arc<dyn ProjectRepository>,
    gateway: Arc<dyn ModelGateway>,
    cycle_state: RwLock<CycleState>,
}

impl ConversationUseCase {
    /// Creates a new `ConversationUseCase`.
    ///
    /// # Arguments
    ///
    /// * `store` - Shared store owning the in-memory project
    /// * `repository` - Persistence backend, written after every transition
    /// * `gateway` - The hosted language model
    pub fn new(
        store: Arc<RwLock<ProjectStore>>,
        repository: Arc<dyn ProjectRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            store,
            repository,
            gateway,
            cycle_state: RwLock::new(CycleState::Idle),
        }
    }

    /// The current cycle state.
    pub async fn cycle_state(&self) -> CycleState {
        *self.cycle_state.read().await
    }

    /// Runs one conversation cycle.
    ///
    /// Empty input and a busy cycle are rejected as silent no-ops: no user
    /// message is appended and no request is issued. Otherwise the trimmed
    /// input is appended to the transcript, sent to the gateway together
    /// with the history as it stood before this turn, and the reply (if
    /// any) is appended with its citations.
    pub async fn send(&self, input: &str) -> SendOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return SendOutcome::RejectedEmpty;
        }

        {
            let mut state = self.cycle_state.write().await;
            if *state == CycleState::Sending {
                return SendOutcome::RejectedBusy;
            }
            *state = CycleState::Sending;
        }

        let outcome = self.run_cycle(trimmed).await;

        *self.cycle_state.write().await = CycleState::Idle;
        outcome
    }

    async fn run_cycle(&self, input: &str) -> SendOutcome {
        // Capture the transcript as it stood before this turn; citations
        // are not resent to the provider.
        let (prior_turns, snapshot) = {
            let mut store = self.store.write().await;
            let turns: Vec<Turn> = store.project().chat_history.iter().map(Turn::from).collect();
            store.append_message(Message::user(input));
            (turns, store.snapshot())
        };
        self.persist(&snapshot).await;

        match self.gateway.send(&prior_turns, input).await {
            Ok(reply) => {
                let message = assistant_message(reply);
                let snapshot = {
                    let mut store = self.store.write().await;
                    store.append_message(message.clone());
                    store.snapshot()
                };
                self.persist(&snapshot).await;
                SendOutcome::Answered(message)
            }
            Err(err) => {
                // Deliberate product behavior: the child sees their message
                // with no reply and no error banner, and may retry.
                tracing::warn!("Model gateway call failed: {}", err);
                SendOutcome::NoReply
            }
        }
    }

    async fn persist(&self, project: &Project) {
        if let Err(err) = self.repository.save(project).await {
            tracing::warn!("Failed to persist project: {}", err);
        }
    }
}

fn assistant_message(reply: GatewayReply) -> Message {
    let text = if reply.text.is_empty() {
        EMPTY_REPLY_FALLBACK.to_string()
    } else {
        reply.text
    };
    Message::assistant_with_sources(text, reply.citations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mirai_core::MiraiError;
    use mirai_core::error::Result;
    use mirai_core::project::{Citation, MessageRole};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Notify, Semaphore};

    // Mock ModelGateway for testing
    struct MockGateway {
        reply: Result<GatewayReply>,
        calls: AtomicUsize,
        entered: Notify,
        gate: Option<Semaphore>,
    }

    impl MockGateway {
        fn answering(text: &str, citations: Vec<Citation>) -> Self {
            Self {
                reply: Ok(GatewayReply {
                    text: text.to_string(),
                    citations,
                }),
                calls: AtomicUsize::new(0),
                entered: Notify::new(),
                gate: None,
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(MiraiError::gateway("connection refused")),
                calls: AtomicUsize::new(0),
                entered: Notify::new(),
                gate: None,
            }
        }

        /// A gateway that blocks inside `send` until a permit is added.
        fn gated(text: &str) -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Self::answering(text, Vec::new())
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelGateway for MockGateway {
        async fn send(&self, _history: &[Turn], _input: &str) -> Result<GatewayReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(_) => Err(MiraiError::gateway("connection refused")),
            }
        }
    }

    // Mock ProjectRepository for testing
    struct MockRepository {
        stored: Mutex<Option<Project>>,
        fail_saves: bool,
    }

    impl MockRepository {
        fn new() -> Self {
            Self {
                stored: Mutex::new(None),
                fail_saves: false,
            }
        }

        fn failing() -> Self {
            Self {
                stored: Mutex::new(None),
                fail_saves: true,
            }
        }

        fn stored(&self) -> Option<Project> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectRepository for MockRepository {
        async fn load(&self) -> Option<Project> {
            self.stored()
        }

        async fn save(&self, project: &Project) -> Result<()> {
            if self.fail_saves {
                return Err(MiraiError::io("quota exceeded"));
            }
            *self.stored.lock().unwrap() = Some(project.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn usecase(
        gateway: Arc<MockGateway>,
        repository: Arc<MockRepository>,
    ) -> (ConversationUseCase, Arc<RwLock<ProjectStore>>) {
        let store = Arc::new(RwLock::new(ProjectStore::new(Project::reset())));
        let conversation = ConversationUseCase::new(store.clone(), repository, gateway);
        (conversation, store)
    }

    #[tokio::test]
    async fn test_successful_cycle_appends_user_and_assistant() {
        let gateway = Arc::new(MockGateway::answering(
            "どうしてカブトムシに興味を持ったの？",
            Vec::new(),
        ));
        let repository = Arc::new(MockRepository::new());
        let (conversation, store) = usecase(gateway.clone(), repository.clone());

        let outcome = conversation.send("カブトムシについて調べたい").await;

        let SendOutcome::Answered(message) = outcome else {
            panic!("expected an answer, got {:?}", outcome);
        };
        assert_eq!(message.content, "どうしてカブトムシに興味を持ったの？");
        assert_eq!(message.sources, Some(Vec::new()));

        let store = store.read().await;
        let history = &store.project().chat_history;
        // greeting + user + assistant
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, MessageRole::User);
        assert_eq!(history[1].content, "カブトムシについて調べたい");
        assert_eq!(history[2].role, MessageRole::Assistant);
        assert_eq!(conversation.cycle_state().await, CycleState::Idle);

        // The full project was persisted after the assistant turn.
        assert_eq!(repository.stored().unwrap().chat_history.len(), 3);
    }

    #[tokio::test]
    async fn test_gateway_sees_history_without_the_new_message() {
        struct CapturingGateway {
            seen: Mutex<Vec<Turn>>,
        }

        #[async_trait]
        impl ModelGateway for CapturingGateway {
            async fn send(&self, history: &[Turn], _input: &str) -> Result<GatewayReply> {
                *self.seen.lock().unwrap() = history.to_vec();
                Ok(GatewayReply::default())
            }
        }

        let gateway = Arc::new(CapturingGateway {
            seen: Mutex::new(Vec::new()),
        });
        let repository = Arc::new(MockRepository::new());
        let store = Arc::new(RwLock::new(ProjectStore::new(Project::reset())));
        let conversation = ConversationUseCase::new(store, repository, gateway.clone());

        conversation.send("カブトムシについて調べたい").await;

        let seen = gateway.seen.lock().unwrap();
        // Only the greeting; the new user message travels separately.
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_failed_cycle_leaves_message_unanswered() {
        let gateway = Arc::new(MockGateway::failing());
        let repository = Arc::new(MockRepository::new());
        let (conversation, store) = usecase(gateway, repository.clone());

        let outcome = conversation.send("カブトムシについて調べたい").await;

        assert_eq!(outcome, SendOutcome::NoReply);
        let store = store.read().await;
        let history = &store.project().chat_history;
        // The user message only; no assistant reply, no error message.
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, MessageRole::User);
        assert_eq!(conversation.cycle_state().await, CycleState::Idle);
        // The user message still got persisted before the failure.
        assert_eq!(repository.stored().unwrap().chat_history.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let gateway = Arc::new(MockGateway::answering("ok", Vec::new()));
        let repository = Arc::new(MockRepository::new());
        let (conversation, store) = usecase(gateway.clone(), repository);

        assert_eq!(conversation.send("").await, SendOutcome::RejectedEmpty);
        assert_eq!(conversation.send("   \n ").await, SendOutcome::RejectedEmpty);

        assert_eq!(gateway.call_count(), 0);
        assert_eq!(store.read().await.project().chat_history.len(), 1);
    }

    #[tokio::test]
    async fn test_second_send_while_sending_is_rejected() {
        let gateway = Arc::new(MockGateway::gated("やっと返事できたよ"));
        let repository = Arc::new(MockRepository::new());
        let (conversation, store) = usecase(gateway.clone(), repository);
        let conversation = Arc::new(conversation);

        let first = {
            let conversation = conversation.clone();
            tokio::spawn(async move { conversation.send("一つ目のしつもん").await })
        };

        // Wait until the first cycle is inside the gateway call.
        gateway.entered.notified().await;
        assert_eq!(conversation.cycle_state().await, CycleState::Sending);

        let second = conversation.send("二つ目のしつもん").await;
        assert_eq!(second, SendOutcome::RejectedBusy);
        // No second request, no duplicate user message.
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(store.read().await.project().chat_history.len(), 2);

        gateway.gate.as_ref().unwrap().add_permits(1);
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, SendOutcome::Answered(_)));
        assert_eq!(conversation.cycle_state().await, CycleState::Idle);
        assert_eq!(store.read().await.project().chat_history.len(), 3);
    }

    #[tokio::test]
    async fn test_transcript_is_append_only_across_cycles() {
        let gateway = Arc::new(MockGateway::answering("つぎは何がしりたい？", Vec::new()));
        let repository = Arc::new(MockRepository::new());
        let (conversation, store) = usecase(gateway, repository);

        conversation.send("一つ目").await;
        let after_first = store.read().await.project().chat_history.clone();

        conversation.send("二つ目").await;
        let after_second = store.read().await.project().chat_history.clone();

        assert!(after_second.len() > after_first.len());
        assert_eq!(&after_second[..after_first.len()], &after_first[..]);
    }

    #[tokio::test]
    async fn test_empty_reply_text_falls_back_to_apology() {
        let gateway = Arc::new(MockGateway::answering("", Vec::new()));
        let repository = Arc::new(MockRepository::new());
        let (conversation, _store) = usecase(gateway, repository);

        let SendOutcome::Answered(message) = conversation.send("ねえ").await else {
            panic!("expected an answer");
        };
        assert_eq!(message.content, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_citations_are_carried_onto_the_reply() {
        let citation = Citation::Web {
            uri: "https://example.com/beetles".to_string(),
            title: Some("カブトムシ図鑑".to_string()),
        };
        let gateway = Arc::new(MockGateway::answering(
            "この発見はすごいね！",
            vec![citation.clone()],
        ));
        let repository = Arc::new(MockRepository::new());
        let (conversation, _store) = usecase(gateway, repository);

        let SendOutcome::Answered(message) = conversation.send("みつけたよ").await else {
            panic!("expected an answer");
        };
        assert_eq!(message.sources, Some(vec![citation]));
    }

    #[tokio::test]
    async fn test_save_failure_does_not_break_the_session() {
        let gateway = Arc::new(MockGateway::answering("だいじょうぶだよ", Vec::new()));
        let repository = Arc::new(MockRepository::failing());
        let (conversation, store) = usecase(gateway, repository);

        let outcome = conversation.send("きこえてる？").await;

        // In-memory state stays authoritative even though persistence failed.
        assert!(matches!(outcome, SendOutcome::Answered(_)));
        assert_eq!(store.read().await.project().chat_history.len(), 3);
        assert_eq!(conversation.cycle_state().await, CycleState::Idle);
    }
}
