//! # Chat Session Controller
//!
//! Owns the on-screen chat: the active conversation, its messages, the typing
//! indicator and the simulated stream of the latest answer.
//!
//! ## One turn
//!
//! ```text
//! send(text)
//!   ├─ append user message (optimistic), typing = true
//!   ├─ create conversation if none is active, adopt its id
//!   ├─ persist user message
//!   ├─ AI call with the last N prior messages      → typing = false
//!   ├─ persist answer, then the sentinel row if flagged
//!   └─ reveal answer tick by tick (spawned task)
//!        └─ done: affordance if flagged, refresh sidebar, navigate, guard released
//! ```
//!
//! Every `send`, `load` and `reset` bumps a generation counter. A turn whose
//! generation is no longer current keeps its network steps but stops touching
//! the state, so a late reply never lands in a different conversation.

mod events;
mod history;
mod reveal;
mod state;

pub use events::SessionEvent;
pub use history::build_history;
pub use state::{
    MessageBody, SessionState, TurnPhase, UiMessage, EMERGENCY_ACTION_LABEL, EMERGENCY_NOTICE,
    HOSPITALS_ROUTE,
};

use crate::backend::{ChatBackend, Identity};
use crate::config::{LoadFailurePolicy, SessionConfig};
use crate::refresh::RefreshToken;
use crate::sidebar::ConversationObserver;
use crate::{ClientError, Result};
use async_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use reveal::Reveal;
use shared::{
    derive_title, ChatRequest, ChatResponse, CreateMessageRequest, HistoryEntry, Role,
    EMERGENCY_SENTINEL_CONTENT,
};
use state::ActiveTurn;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Floor for the reveal interval; tokio rejects a zero period.
const MIN_REVEAL_TICK: Duration = Duration::from_millis(1);

/// Outcome of a completed `send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub conversation_id: String,
    pub created: bool,
    pub emergency: bool,
    /// Number of prior messages forwarded to the AI.
    pub history_len: usize,
    /// A newer send, load or reset took over before the reply was shown.
    pub superseded: bool,
}

/// Cheap to clone; clones drive the same session.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    backend: Arc<dyn ChatBackend>,
    identity: Option<Identity>,
    config: SessionConfig,
    state: RwLock<SessionState>,
    events: Sender<SessionEvent>,
    refresh: RefreshToken,
    reveal_task: Mutex<Option<JoinHandle<()>>>,
}

impl ChatSession {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        identity: Option<Identity>,
        config: SessionConfig,
        refresh: RefreshToken,
    ) -> (Self, Receiver<SessionEvent>) {
        let (events, receiver) = async_channel::unbounded();

        let session = Self {
            inner: Arc::new(SessionInner {
                backend,
                identity,
                config,
                state: RwLock::new(SessionState::default()),
                events,
                refresh,
                reveal_task: Mutex::new(None),
            }),
        };
        (session, receiver)
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.inner.state.read().active_id.clone()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.inner.identity.as_ref()
    }

    /// Wait for the running reveal, if any, to finish or be cancelled.
    pub async fn wait_reveal(&self) {
        let handle = self.inner.reveal_task.lock().take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "Reveal task failed");
                }
            }
        }
    }

    // region:    --- Load / Reset

    /// Show a stored conversation, or a fresh chat for `None`.
    ///
    /// Loading the conversation an in-flight turn is writing to is a no-op.
    /// A result that arrives after a newer operation returns
    /// [`ClientError::Cancelled`] and leaves the state alone.
    pub async fn load(&self, conversation_id: Option<&str>) -> Result<()> {
        let Some(id) = conversation_id else {
            self.reset();
            return Ok(());
        };

        let generation = {
            let mut state = self.inner.state.write();
            if state.turn_conversation() == Some(id) {
                debug!(conversation_id = %id, "Turn in flight for this conversation, load skipped");
                return Ok(());
            }

            self.abort_reveal(&mut state);
            state.generation += 1;
            state.turn = None;
            state.phase = TurnPhase::Idle;
            state.typing = true;
            state.generation
        };
        self.emit(SessionEvent::Typing(true));

        let result = match &self.inner.identity {
            Some(identity) => self.inner.backend.history(identity, id).await,
            None => Err(ClientError::Unauthorized("Sign in to open conversations".to_string())),
        };

        match result {
            Ok(rows) => {
                let messages: Vec<UiMessage> = rows.into_iter().map(UiMessage::from).collect();
                let count = messages.len();
                let applied = self.with_current(generation, |state| {
                    state.messages = messages;
                    state.active_id = Some(id.to_string());
                    state.typing = false;
                });
                if applied.is_none() {
                    debug!(conversation_id = %id, "Load superseded, result dropped");
                    return Err(ClientError::Cancelled);
                }

                debug!(conversation_id = %id, count, "Conversation loaded");
                self.emit(SessionEvent::MessagesChanged);
                self.emit(SessionEvent::Typing(false));
                Ok(())
            }
            Err(err) => {
                self.with_current(generation, |state| state.clear())
                    .ok_or(ClientError::Cancelled)?;

                warn!(conversation_id = %id, error = %err, "Failed to load conversation, starting a new chat");
                self.emit(SessionEvent::Reset);
                self.emit(SessionEvent::Typing(false));

                match self.inner.config.load_failure {
                    LoadFailurePolicy::ResetSilently => Ok(()),
                    LoadFailurePolicy::Surface => {
                        self.emit(SessionEvent::LoadFailed(err.to_string()));
                        Err(err)
                    }
                }
            }
        }
    }

    /// Drop the current chat and any in-flight turn's claim on the state.
    pub fn reset(&self) {
        {
            let mut state = self.inner.state.write();
            self.abort_reveal(&mut state);
            state.generation += 1;
            state.clear();
        }
        self.emit(SessionEvent::Reset);
    }

    // endregion: --- Load / Reset

    // region:    --- Send

    /// Run one chat turn.
    ///
    /// Returns once the answer is persisted and its reveal has started; use
    /// [`ChatSession::wait_reveal`] to wait for the stream to finish.
    pub async fn send(&self, text: &str) -> Result<TurnReport> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::Validation("Message cannot be empty".to_string()));
        }

        let (generation, history, active) = {
            let mut state = self.inner.state.write();
            if state.phase.is_awaiting() {
                return Err(ClientError::Busy);
            }
            if let Some(reveal) = state.reveal.take() {
                self.finish_reveal(&mut state, reveal);
            }

            state.generation += 1;
            let history = build_history(&state.messages, self.inner.config.history_window);
            state.messages.push(UiMessage::text(Role::User, text));
            state.typing = true;

            let active = state.active_id.clone();
            state.phase = if active.is_some() {
                TurnPhase::PersistingMessage
            } else {
                TurnPhase::AwaitingConversationId
            };
            state.turn = Some(ActiveTurn {
                conversation_id: active.clone(),
                created: false,
            });
            (state.generation, history, active)
        };
        self.emit(SessionEvent::MessagesChanged);
        self.emit(SessionEvent::Typing(true));

        match self.run_turn(generation, text, history, active).await {
            Ok(report) => Ok(report),
            Err(err) => {
                self.fail_turn(generation, &err);
                Err(err)
            }
        }
    }

    async fn run_turn(
        &self,
        generation: u64,
        text: &str,
        history: Vec<HistoryEntry>,
        active: Option<String>,
    ) -> Result<TurnReport> {
        let identity = self
            .inner
            .identity
            .as_ref()
            .ok_or_else(|| ClientError::Unauthorized("Sign in to save conversations".to_string()))?;
        let backend = self.inner.backend.as_ref();

        let (conversation_id, created) = match active {
            Some(id) => (id, false),
            None => {
                let title = derive_title(
                    text,
                    self.inner.config.title_words,
                    self.inner.config.title_chars,
                );
                let summary = backend.create_conversation(identity, &title).await?;
                info!(conversation_id = %summary.id, title = %summary.title, "Conversation created");

                self.with_current(generation, |state| {
                    state.active_id = Some(summary.id.clone());
                    state.phase = TurnPhase::PersistingMessage;
                    if let Some(turn) = state.turn.as_mut() {
                        turn.conversation_id = Some(summary.id.clone());
                        turn.created = true;
                    }
                });
                (summary.id, true)
            }
        };

        backend
            .append_message(
                identity,
                &CreateMessageRequest {
                    conversation_id: conversation_id.clone(),
                    content: text.to_string(),
                    role: Role::User,
                    is_emergency_prompt: None,
                },
            )
            .await?;
        self.set_phase(generation, TurnPhase::MessagePersisted);

        let history_len = history.len();
        self.set_phase(generation, TurnPhase::AwaitingAiResponse);
        let reply = backend
            .chat(
                Some(identity),
                &ChatRequest {
                    message: text.to_string(),
                    history,
                },
            )
            .await?;

        let current = self
            .with_current(generation, |state| {
                state.typing = false;
                state.phase = TurnPhase::AiResponseReceived;
            })
            .is_some();
        if current {
            self.emit(SessionEvent::Typing(false));
        }

        self.persist_reply(identity, &conversation_id, &reply).await;

        let navigate_to = created.then(|| conversation_id.clone());
        let superseded = !self.start_reveal(generation, &reply, navigate_to);
        if superseded {
            debug!(conversation_id = %conversation_id, "Turn superseded, reply not shown");
            if created {
                let token = self.inner.refresh.bump();
                self.emit(SessionEvent::RefreshSidebar(token));
            }
        }

        Ok(TurnReport {
            conversation_id,
            created,
            emergency: reply.emergency_flag,
            history_len,
            superseded,
        })
    }

    /// Store the answer, then the sentinel row when flagged.
    ///
    /// The reply is already in hand, so a failed write is logged and the turn goes on.
    async fn persist_reply(&self, identity: &Identity, conversation_id: &str, reply: &ChatResponse) {
        let mut rows = vec![CreateMessageRequest {
            conversation_id: conversation_id.to_string(),
            content: reply.answer.clone(),
            role: Role::Assistant,
            is_emergency_prompt: None,
        }];
        if reply.emergency_flag {
            rows.push(CreateMessageRequest {
                conversation_id: conversation_id.to_string(),
                content: EMERGENCY_SENTINEL_CONTENT.to_string(),
                role: Role::Assistant,
                is_emergency_prompt: Some(true),
            });
        }

        for row in rows {
            if let Err(err) = self.inner.backend.append_message(identity, &row).await {
                warn!(
                    conversation_id = %conversation_id,
                    emergency = row.is_emergency_prompt.unwrap_or(false),
                    error = %err,
                    "Failed to persist assistant message"
                );
            }
        }
    }

    fn fail_turn(&self, generation: u64, err: &ClientError) {
        warn!(error = %err, "Chat turn failed");

        let created = self.with_current(generation, |state| {
            state.typing = false;
            state.phase = TurnPhase::Idle;
            state.turn.take().map(|t| t.created).unwrap_or(false)
        });

        if let Some(created) = created {
            self.emit(SessionEvent::Typing(false));
            self.emit(SessionEvent::TurnFailed(err.to_string()));
            if created {
                let token = self.inner.refresh.bump();
                self.emit(SessionEvent::RefreshSidebar(token));
            }
        }
    }

    // endregion: --- Send

    // region:    --- Reveal

    /// Append the empty assistant message and start revealing into it.
    /// Returns `false` when the turn was superseded.
    fn start_reveal(&self, generation: u64, reply: &ChatResponse, navigate_to: Option<String>) -> bool {
        let cancel = CancellationToken::new();

        let started = self
            .with_current(generation, |state| {
                let message = UiMessage::text(Role::Assistant, String::new());
                let reveal = Reveal::new(
                    message.id,
                    reply.answer.clone(),
                    reply.emergency_flag,
                    navigate_to,
                    cancel.clone(),
                );
                state.messages.push(message);
                state.phase = TurnPhase::Streaming;
                state.reveal = Some(reveal);
            })
            .is_some();

        if started {
            self.emit(SessionEvent::MessagesChanged);
            self.spawn_reveal(cancel);
        }
        started
    }

    fn spawn_reveal(&self, cancel: CancellationToken) {
        let session = self.clone();
        let tick = self.inner.config.reveal_tick.max(MIN_REVEAL_TICK);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        if session.reveal_step() {
                            break;
                        }
                    }
                }
            }
        });

        let previous = self.inner.reveal_task.lock().replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// One tick. Returns `true` once there is nothing left to reveal.
    fn reveal_step(&self) -> bool {
        let chars = self.inner.config.chars_per_tick;
        let mut state = self.inner.state.write();

        let Some(reveal) = state.reveal.as_mut() else {
            return true;
        };
        let message_id = reveal.message_id;

        if let Some(chunk) = reveal.advance(chars) {
            let revealed = reveal.revealed().to_string();
            if let Some(message) = state.message_mut(message_id) {
                message.body = MessageBody::Text(revealed);
            }
            self.emit(SessionEvent::Revealed { message_id, chunk });
        }

        let done = state.reveal.as_ref().map(Reveal::is_done).unwrap_or(true);
        if done {
            if let Some(reveal) = state.reveal.take() {
                self.finish_reveal(&mut state, reveal);
            }
        }
        done
    }

    /// Complete a reveal: full text, affordance, sidebar refresh, navigation.
    fn finish_reveal(&self, state: &mut SessionState, reveal: Reveal) {
        reveal.cancel.cancel();
        let message_id = reveal.message_id;
        let emergency = reveal.emergency;
        let navigate_to = reveal.navigate_to.clone();

        let full = reveal.into_full();
        if let Some(message) = state.message_mut(message_id) {
            message.body = MessageBody::Text(full);
        }

        if emergency {
            let affordance = UiMessage::emergency();
            let affordance_id = affordance.id;
            state.messages.push(affordance);
            self.emit(SessionEvent::EmergencyPrompt {
                message_id: affordance_id,
            });
        }

        state.phase = TurnPhase::Idle;
        state.turn = None;
        self.emit(SessionEvent::MessagesChanged);

        let token = self.inner.refresh.bump();
        self.emit(SessionEvent::RefreshSidebar(token));
        if let Some(id) = navigate_to {
            self.emit(SessionEvent::Navigate(id));
        }
    }

    /// Stop a reveal without completing it.
    fn abort_reveal(&self, state: &mut SessionState) {
        if let Some(reveal) = state.reveal.take() {
            reveal.cancel.cancel();
            if reveal.navigate_to.is_some() {
                let token = self.inner.refresh.bump();
                self.emit(SessionEvent::RefreshSidebar(token));
            }
        }
    }

    // endregion: --- Reveal

    // region:    --- Helpers

    /// Apply `f` only while `generation` is still current.
    fn with_current<R>(&self, generation: u64, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        let mut state = self.inner.state.write();
        if state.generation != generation {
            return None;
        }
        Some(f(&mut state))
    }

    fn set_phase(&self, generation: u64, phase: TurnPhase) {
        self.with_current(generation, |state| state.phase = phase);
    }

    fn emit(&self, event: SessionEvent) {
        // Unbounded: only fails once every receiver is gone.
        let _ = self.inner.events.try_send(event);
    }

    // endregion: --- Helpers
}

impl ConversationObserver for ChatSession {
    fn conversation_deleted(&self, id: &str) {
        if self.active_id().as_deref() == Some(id) {
            info!(conversation_id = %id, "Active conversation deleted, starting a new chat");
            self.reset();
        }
    }
}
