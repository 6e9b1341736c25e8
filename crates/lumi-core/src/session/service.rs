//! Session service orchestrating one active conversation.
//!
//! The explicit session context object: constructed at persona selection,
//! torn down when the user returns to selection. Wires the history store,
//! trial gate, responder boundary, and expressive suggester around the
//! in-memory conversation.
//!
//! Data flow per turn: user input -> appended to the conversation ->
//! transcript handed to the responder -> reply appended -> conversation
//! persisted. The greeting selector runs once at session start; the trial
//! gate runs on every send.

use std::time::Duration;

use tracing::warn;

use lumi_types::chat::{Attachment, ExpressiveSuggestions, Message};
use lumi_types::model::ModelId;
use lumi_types::persona::Persona;

use crate::greeting::{self, GreetingSource};
use crate::responder::{CompanionResponder, ExpressiveSuggester, FALLBACK_REPLY};
use crate::trial::{SendDecision, TrialGate, UPGRADE_REPLY, warning_suffix};

use super::conversation::Conversation;
use super::key::SessionKey;
use super::store::HistoryStore;

/// Pause before the blocked-send upgrade reply appears, so it reads like a
/// companion message rather than an instant error.
const BLOCK_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Result of one send attempt.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The companion reply appended to the conversation (the fixed upgrade
    /// reply on blocked sends).
    pub reply: String,
    /// True when the gate intercepted the send and the responder was not
    /// invoked.
    pub blocked: bool,
    /// True when the caller should surface the upgrade prompt.
    pub upgrade_required: bool,
    /// Set when the reply carries the soft trial warning suffix.
    pub warning_remaining: Option<u32>,
    /// Free messages left after this turn; `None` when the count check does
    /// not apply.
    pub remaining_messages: Option<u32>,
    /// Expressive suggestions for the reply (empty on fallback replies).
    pub suggestions: ExpressiveSuggestions,
    /// True when the resolved reply was discarded because the session
    /// switched while the request was in flight.
    pub discarded: bool,
}

/// One active conversation with one persona.
pub struct SessionService<H, R, E> {
    history: H,
    responder: R,
    suggester: E,
    gate: TrialGate,
    persona: Persona,
    model: ModelId,
    conversation: Conversation,
    block_reply_delay: Duration,
}

impl<H, R, E> SessionService<H, R, E>
where
    H: HistoryStore,
    R: CompanionResponder,
    E: ExpressiveSuggester,
{
    /// Start a session for a persona.
    ///
    /// Loads stored history for the derived session key; when none exists
    /// (or the stored value is unreadable) a single greeting message is
    /// synthesized and persisted, so the conversation is never empty once a
    /// persona is chosen.
    pub async fn start(
        history: H,
        responder: R,
        suggester: E,
        gate: TrialGate,
        persona: Persona,
        model: ModelId,
        greeting: GreetingSource,
    ) -> Self {
        let conversation = load_or_greet(&history, &persona, greeting).await;
        Self {
            history,
            responder,
            suggester,
            gate,
            persona,
            model,
            conversation,
            block_reply_delay: BLOCK_REPLY_DELAY,
        }
    }

    /// Override the blocked-send reply delay (used by tests).
    pub fn with_block_reply_delay(mut self, delay: Duration) -> Self {
        self.block_reply_delay = delay;
        self
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn key(&self) -> &SessionKey {
        self.conversation.key()
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn user_message_count(&self) -> u32 {
        self.conversation.user_message_count()
    }

    /// Free messages left, or `None` when the count check does not apply.
    pub fn remaining_messages(&self) -> Option<u32> {
        self.gate
            .remaining(self.conversation.user_message_count(), self.model)
    }

    /// Change the selected model mid-session.
    pub fn set_model(&mut self, model: ModelId) {
        self.model = model;
    }

    /// Upgrade-completed signal from the payment collaborator.
    pub fn subscribe(&mut self) {
        self.gate.subscribe();
    }

    /// Send one user message through the full turn pipeline.
    pub async fn send(&mut self, user_input: &str, attachment: Option<Attachment>) -> TurnOutcome {
        let dispatched_key = self.conversation.key().clone();

        let mut message = Message::user(user_input);
        if let Some(attachment) = attachment {
            message = message.with_attachment(attachment);
        }
        let attachment_url = message.attachment.as_ref().map(|a| a.url.clone());
        self.conversation.push(message);
        self.persist().await;

        let count = self.conversation.user_message_count();
        match self.gate.evaluate(count, self.model) {
            SendDecision::Block => {
                tokio::time::sleep(self.block_reply_delay).await;
                self.conversation.push(Message::companion(UPGRADE_REPLY));
                self.persist().await;
                TurnOutcome {
                    reply: UPGRADE_REPLY.to_string(),
                    blocked: true,
                    upgrade_required: true,
                    warning_remaining: None,
                    remaining_messages: self.remaining_messages(),
                    suggestions: ExpressiveSuggestions::default(),
                    discarded: false,
                }
            }
            decision => {
                let warning = match decision {
                    SendDecision::ForwardWithWarning { remaining } => Some(remaining),
                    _ => None,
                };

                let transcript = self.conversation.transcript();
                let reply = self
                    .responder
                    .respond(
                        &self.persona,
                        &transcript,
                        user_input,
                        self.model,
                        attachment_url.as_deref(),
                    )
                    .await;

                let full_reply = match warning {
                    Some(remaining) => format!("{reply}{}", warning_suffix(remaining)),
                    None => reply.clone(),
                };

                if !self.apply_reply(&dispatched_key, &full_reply).await {
                    return TurnOutcome {
                        reply: full_reply,
                        blocked: false,
                        upgrade_required: false,
                        warning_remaining: warning,
                        remaining_messages: self.remaining_messages(),
                        suggestions: ExpressiveSuggestions::default(),
                        discarded: true,
                    };
                }

                // The fallback apology is not an emotional state worth
                // decorating; skip the suggestion call for it.
                let suggestions = if reply == FALLBACK_REPLY {
                    ExpressiveSuggestions::default()
                } else {
                    self.suggester.suggest(&reply).await
                };

                TurnOutcome {
                    reply: full_reply,
                    blocked: false,
                    upgrade_required: false,
                    warning_remaining: warning,
                    remaining_messages: self.remaining_messages(),
                    suggestions,
                    discarded: false,
                }
            }
        }
    }

    /// Append a resolved companion reply, unless the session switched while
    /// the request was in flight.
    ///
    /// Each responder dispatch is tagged with the session key at dispatch
    /// time; a reply resolving against a different active key is discarded.
    pub async fn apply_reply(&mut self, dispatched_key: &SessionKey, reply: &str) -> bool {
        if self.conversation.key() != dispatched_key {
            warn!(
                dispatched = %dispatched_key,
                active = %self.conversation.key(),
                "discarding stale reply resolved after session switch"
            );
            return false;
        }
        self.conversation.push(Message::companion(reply));
        self.persist().await;
        true
    }

    /// Switch to a different persona (or the same one with a fresh model).
    ///
    /// The previous conversation is already persisted after every append;
    /// its in-memory state is dropped. The new conversation loads stored
    /// history or synthesizes a greeting.
    pub async fn switch(&mut self, persona: Persona, model: ModelId, greeting: GreetingSource) {
        self.conversation = load_or_greet(&self.history, &persona, greeting).await;
        self.persona = persona;
        self.model = model;
    }

    /// Clear the stored history for the active persona and start over with a
    /// fresh greeting.
    pub async fn reset(&mut self, greeting: GreetingSource) {
        if let Err(err) = self.history.clear(self.conversation.key()).await {
            warn!(key = %self.conversation.key(), error = %err, "failed to clear stored history");
        }
        self.conversation = load_or_greet(&self.history, &self.persona, greeting).await;
    }

    async fn persist(&self) {
        if let Err(err) = self
            .history
            .save(self.conversation.key(), self.conversation.messages())
            .await
        {
            warn!(
                key = %self.conversation.key(),
                error = %err,
                "failed to persist conversation; continuing in-memory"
            );
        }
    }
}

/// Load stored history for a persona, or synthesize (and persist) a greeting.
async fn load_or_greet<H: HistoryStore>(
    history: &H,
    persona: &Persona,
    greeting: GreetingSource,
) -> Conversation {
    let key = SessionKey::for_persona(persona);

    let stored = match history.load(&key).await {
        Ok(stored) => stored,
        Err(err) => {
            warn!(key = %key, error = %err, "failed to load stored history; starting fresh");
            None
        }
    };

    match stored {
        Some(messages) if !messages.is_empty() => Conversation::new(key, messages),
        _ => {
            let opener = Message::companion(greeting::greet(persona, greeting));
            let conversation = Conversation::new(key, vec![opener]);
            if let Err(err) = history.save(conversation.key(), conversation.messages()).await {
                warn!(key = %conversation.key(), error = %err, "failed to persist greeting");
            }
            conversation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeting::candidates;
    use lumi_types::billing::SubscriptionStatus;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory history store shared across service instances.
    #[derive(Clone, Default)]
    struct MemoryStore {
        entries: Arc<Mutex<HashMap<String, Vec<Message>>>>,
    }

    impl HistoryStore for MemoryStore {
        async fn load(
            &self,
            key: &SessionKey,
        ) -> Result<Option<Vec<Message>>, lumi_types::error::StoreError> {
            Ok(self.entries.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn save(
            &self,
            key: &SessionKey,
            messages: &[Message],
        ) -> Result<(), lumi_types::error::StoreError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.as_str().to_string(), messages.to_vec());
            Ok(())
        }

        async fn clear(&self, key: &SessionKey) -> Result<(), lumi_types::error::StoreError> {
            self.entries.lock().unwrap().remove(key.as_str());
            Ok(())
        }
    }

    /// Store whose writes always fail.
    #[derive(Clone, Default)]
    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        async fn load(
            &self,
            _key: &SessionKey,
        ) -> Result<Option<Vec<Message>>, lumi_types::error::StoreError> {
            Ok(None)
        }

        async fn save(
            &self,
            _key: &SessionKey,
            _messages: &[Message],
        ) -> Result<(), lumi_types::error::StoreError> {
            Err(lumi_types::error::StoreError::Query("disk full".to_string()))
        }

        async fn clear(&self, _key: &SessionKey) -> Result<(), lumi_types::error::StoreError> {
            Ok(())
        }
    }

    /// Responder returning a fixed reply and counting invocations.
    #[derive(Clone)]
    struct ScriptedResponder {
        reply: String,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedResponder {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompanionResponder for ScriptedResponder {
        async fn respond(
            &self,
            _persona: &Persona,
            _transcript: &str,
            _user_input: &str,
            _model: ModelId,
            _attachment_url: Option<&str>,
        ) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    /// Suggester returning fixed emojis and counting invocations.
    #[derive(Clone)]
    struct CountingSuggester {
        calls: Arc<AtomicU32>,
    }

    impl CountingSuggester {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ExpressiveSuggester for CountingSuggester {
        async fn suggest(&self, _emotional_state: &str) -> ExpressiveSuggestions {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ExpressiveSuggestions {
                emoji_suggestions: vec!["💖".to_string(), "🥰".to_string()],
                image_suggestion: None,
            }
        }
    }

    fn trial_gate(limit: u32) -> TrialGate {
        TrialGate::new(SubscriptionStatus::Trial, limit, 5)
    }

    async fn start_service(
        store: MemoryStore,
        responder: ScriptedResponder,
        suggester: CountingSuggester,
        gate: TrialGate,
        persona: Persona,
    ) -> SessionService<MemoryStore, ScriptedResponder, CountingSuggester> {
        SessionService::start(
            store,
            responder,
            suggester,
            gate,
            persona,
            ModelId::VanshMeta,
            GreetingSource::FirstCandidate,
        )
        .await
        .with_block_reply_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_fresh_session_has_one_greeting_from_set() {
        let service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("hi!"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;

        assert_eq!(service.messages().len(), 1);
        let greeting = &service.messages()[0];
        assert_eq!(greeting.role, lumi_types::chat::MessageRole::Companion);
        assert!(candidates(&Persona::Girlfriend).contains(&greeting.content.as_str()));
    }

    #[tokio::test]
    async fn test_unknown_persona_greets_from_default_set() {
        let persona = Persona::Other("Space Pirate".to_string());
        let service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("arr"),
            CountingSuggester::new(),
            trial_gate(50),
            persona.clone(),
        )
        .await;

        assert_eq!(service.messages().len(), 1);
        assert!(candidates(&persona).contains(&service.messages()[0].content.as_str()));
    }

    #[tokio::test]
    async fn test_send_adds_two_messages_and_persists() {
        let store = MemoryStore::default();
        let mut service = start_service(
            store.clone(),
            ScriptedResponder::new("I hear you 💖"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;

        for turn in 1..=3u32 {
            let before = service.messages().len();
            let outcome = service.send("hi", None).await;
            assert!(!outcome.blocked);
            assert_eq!(service.messages().len(), before + 2);

            // Stored state matches in-memory state after every append.
            let stored = store.load(service.key()).await.unwrap().unwrap();
            assert_eq!(stored, service.messages());
            assert_eq!(service.user_message_count(), turn);
        }
    }

    #[tokio::test]
    async fn test_trial_warning_boundaries() {
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("reply"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Mentor,
        )
        .await;

        for _ in 0..43 {
            let outcome = service.send("msg", None).await;
            assert!(outcome.warning_remaining.is_none());
        }

        // 44th user message: 6 remaining, no suffix.
        let outcome = service.send("msg", None).await;
        assert!(outcome.warning_remaining.is_none());
        assert!(!outcome.reply.contains("free messages left"));

        // 45th user message: 5 remaining, suffix attached.
        let outcome = service.send("msg", None).await;
        assert_eq!(outcome.warning_remaining, Some(5));
        assert!(outcome.reply.contains("5 free messages left"));
    }

    #[tokio::test]
    async fn test_trial_block_at_limit_skips_responder() {
        let responder = ScriptedResponder::new("reply");
        let mut service = start_service(
            MemoryStore::default(),
            responder.clone(),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Mentor,
        )
        .await;

        for _ in 0..49 {
            service.send("msg", None).await;
        }
        assert_eq!(responder.calls(), 49);

        let before = service.messages().len();
        let outcome = service.send("msg", None).await;

        // Responder not invoked; user message plus the upgrade reply appended.
        assert_eq!(responder.calls(), 49);
        assert!(outcome.blocked);
        assert!(outcome.upgrade_required);
        assert_eq!(outcome.reply, UPGRADE_REPLY);
        assert_eq!(service.messages().len(), before + 2);
        assert_eq!(outcome.remaining_messages, Some(0));
    }

    #[tokio::test]
    async fn test_premium_model_bypasses_gate() {
        let responder = ScriptedResponder::new("reply");
        let mut service = start_service(
            MemoryStore::default(),
            responder.clone(),
            CountingSuggester::new(),
            trial_gate(1),
            Persona::Coach,
        )
        .await;
        service.set_model(ModelId::VanshPhantom);

        for _ in 0..3 {
            let outcome = service.send("msg", None).await;
            assert!(!outcome.blocked);
            assert!(outcome.remaining_messages.is_none());
        }
        assert_eq!(responder.calls(), 3);
    }

    #[tokio::test]
    async fn test_subscribed_session_never_blocks() {
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("reply"),
            CountingSuggester::new(),
            trial_gate(1),
            Persona::Coach,
        )
        .await;
        service.subscribe();

        for _ in 0..3 {
            let outcome = service.send("msg", None).await;
            assert!(!outcome.blocked);
        }
    }

    #[tokio::test]
    async fn test_fallback_reply_skips_suggestions() {
        let suggester = CountingSuggester::new();
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new(FALLBACK_REPLY),
            suggester.clone(),
            trial_gate(50),
            Persona::Therapist,
        )
        .await;

        let outcome = service.send("hi", None).await;
        assert_eq!(outcome.reply, FALLBACK_REPLY);
        assert!(outcome.suggestions.emoji_suggestions.is_empty());
        assert_eq!(suggester.calls(), 0);
    }

    #[tokio::test]
    async fn test_normal_reply_fetches_suggestions() {
        let suggester = CountingSuggester::new();
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("I missed you"),
            suggester.clone(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;

        let outcome = service.send("hi", None).await;
        assert_eq!(outcome.suggestions.emoji_suggestions.len(), 2);
        assert_eq!(suggester.calls(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_is_non_fatal() {
        let mut service = SessionService::start(
            BrokenStore,
            ScriptedResponder::new("still here"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
            ModelId::VanshMeta,
            GreetingSource::FirstCandidate,
        )
        .await
        .with_block_reply_delay(Duration::ZERO);

        let outcome = service.send("hi", None).await;
        assert_eq!(outcome.reply, "still here");
        // Greeting + user + reply all live in memory despite failed writes.
        assert_eq!(service.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_reply_discarded_after_switch() {
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("reply"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;

        let dispatched_key = service.key().clone();
        service
            .switch(
                Persona::Boyfriend,
                ModelId::VanshMeta,
                GreetingSource::FirstCandidate,
            )
            .await;

        let before = service.messages().len();
        let applied = service.apply_reply(&dispatched_key, "late reply").await;
        assert!(!applied);
        assert_eq!(service.messages().len(), before);
    }

    #[tokio::test]
    async fn test_transcript_includes_attachment_turns() {
        let mut service = start_service(
            MemoryStore::default(),
            ScriptedResponder::new("cute!"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;

        let attachment = Attachment {
            url: "https://files.example/cat.png".to_string(),
            media_type: "image/png".to_string(),
        };
        let outcome = service.send("look", Some(attachment.clone())).await;
        assert!(!outcome.blocked);

        let user_msg = &service.messages()[1];
        assert_eq!(user_msg.attachment.as_ref(), Some(&attachment));
    }

    #[tokio::test]
    async fn test_reload_scenario_round_trip() {
        let store = MemoryStore::default();
        let responder = ScriptedResponder::new("I hear you 💖");

        let mut service = start_service(
            store.clone(),
            responder.clone(),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;
        let greeting = service.messages()[0].content.clone();
        assert!(candidates(&Persona::Girlfriend).contains(&greeting.as_str()));

        service.send("hi", None).await;
        let snapshot: Vec<Message> = service.messages().to_vec();
        assert_eq!(snapshot.len(), 3);
        drop(service);

        // Back to persona selection and into the same persona: the stored
        // conversation is reloaded as-is (greeting selection does not rerun).
        let service = start_service(
            store,
            responder,
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Girlfriend,
        )
        .await;
        assert_eq!(service.messages(), snapshot);
    }

    #[tokio::test]
    async fn test_reset_clears_history_and_regreets() {
        let store = MemoryStore::default();
        let mut service = start_service(
            store.clone(),
            ScriptedResponder::new("reply"),
            CountingSuggester::new(),
            trial_gate(50),
            Persona::Teacher,
        )
        .await;

        service.send("hi", None).await;
        assert_eq!(service.messages().len(), 3);

        service.reset(GreetingSource::FirstCandidate).await;
        assert_eq!(service.messages().len(), 1);
        assert_eq!(service.user_message_count(), 0);

        let stored = store.load(service.key()).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
    }
}
