//! Conversation session: message log, composing indicator, reply sequencing.
//!
//! `submit` appends the user message right away and queues the reply. A
//! single background worker drains the queue in FIFO order, waits out the
//! simulated processing delay, then classifies, renders and appends the
//! assistant message. Replies therefore land in submission order.
//!
//! `reset` bumps the session epoch. Queued or sleeping replies from an older
//! epoch are dropped instead of being appended to the fresh log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use astreea_core::config::ChatConfig;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::catalog::{CategoryId, QuickAction, GREETING_TEMPLATE};
use crate::classifier::{Classification, IntentClassifier};
use crate::error::ChatError;
use crate::render::render;
use crate::types::{Author, Message, MessageId, SessionEvent, SessionId};

// =============================================================================
// Shared state
// =============================================================================

struct SessionState {
    log: Vec<Message>,
    next_id: u64,
    last_created_at: DateTime<Utc>,
    /// Replies queued or in flight for the current epoch.
    pending: usize,
    epoch: u64,
}

impl SessionState {
    fn new() -> Self {
        let mut state = Self {
            log: Vec::new(),
            next_id: 1,
            last_created_at: DateTime::<Utc>::MIN_UTC,
            pending: 0,
            epoch: 0,
        };
        let greeting = state.greeting();
        state.log.push(greeting);
        state
    }

    fn is_composing(&self) -> bool {
        self.pending > 0
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Wall-clock time clamped so log timestamps never go backwards.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now().max(self.last_created_at);
        self.last_created_at = now;
        now
    }

    fn user_message(&mut self, text: &str) -> Message {
        Message {
            id: self.allocate_id(),
            author: Author::User,
            raw_text: text.to_string(),
            blocks: Vec::new(),
            category: None,
            created_at: self.stamp(),
        }
    }

    fn assistant_message(&mut self, category: CategoryId, template: &str) -> Message {
        Message {
            id: self.allocate_id(),
            author: Author::Assistant,
            raw_text: template.to_string(),
            blocks: render(template),
            category: Some(category),
            created_at: self.stamp(),
        }
    }

    fn greeting(&mut self) -> Message {
        self.assistant_message(CategoryId::Greeting, GREETING_TEMPLATE)
    }
}

struct Shared {
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    reset: Notify,
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, ChatError> {
        self.state
            .lock()
            .map_err(|e| ChatError::StatePoisoned(e.to_string()))
    }

    /// Lock for reading. A poisoned lock still yields the last written state.
    fn read(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Session state lock poisoned; reading last known state");
            PoisonError::into_inner(poisoned)
        })
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine; the log is the source of truth.
        let _ = self.events.send(event);
    }
}

/// A reply waiting for the worker.
struct PendingResponse {
    epoch: u64,
    reply_to: MessageId,
    text: String,
}

// =============================================================================
// ChatSession
// =============================================================================

/// One conversation with the support assistant.
///
/// Must be created from within a Tokio runtime; the reply worker is spawned
/// on construction and aborted when the session is dropped.
pub struct ChatSession {
    id: SessionId,
    shared: Arc<Shared>,
    queue: mpsc::UnboundedSender<PendingResponse>,
    response_delay: Duration,
    worker: JoinHandle<()>,
}

impl ChatSession {
    /// Start a session with the built-in category table.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_classifier(config, IntentClassifier::default())
    }

    /// Start a session that classifies with the given classifier.
    pub fn with_classifier(config: &ChatConfig, classifier: IntentClassifier) -> Self {
        let id = SessionId::new();
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState::new()),
            events,
            reset: Notify::new(),
        });
        let response_delay = Duration::from_millis(config.response_delay_ms);

        let (queue, jobs) = mpsc::unbounded_channel();
        let worker = tokio::spawn(
            reply_worker(Arc::clone(&shared), jobs, classifier, response_delay)
                .instrument(tracing::info_span!("chat_session", session = %id)),
        );

        tracing::info!(
            session = %id,
            delay_ms = config.response_delay_ms,
            "Chat session started"
        );

        Self {
            id,
            shared,
            queue,
            response_delay,
            worker,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay
    }

    /// Submit user text.
    ///
    /// Blank text is ignored and returns `Ok(None)` without touching the log
    /// or the composing flag. Otherwise the user message is appended, the
    /// reply is queued, and the new message's id is returned. The assistant
    /// reply arrives later through the log and the event stream.
    pub fn submit(&self, text: &str) -> Result<Option<MessageId>, ChatError> {
        if text.trim().is_empty() {
            tracing::debug!(session = %self.id, "Ignoring blank submission");
            return Ok(None);
        }

        let mut state = self.shared.lock()?;
        let message = state.user_message(text);
        let id = message.id;

        // Enqueue under the lock so queue order matches log order.
        self.queue
            .send(PendingResponse {
                epoch: state.epoch,
                reply_to: id,
                text: text.to_string(),
            })
            .map_err(|_| ChatError::SessionClosed)?;

        state.log.push(message.clone());
        state.pending += 1;
        self.shared.publish(SessionEvent::MessageAppended(message));
        if state.pending == 1 {
            self.shared.publish(SessionEvent::ComposingChanged(true));
        }

        tracing::debug!(session = %self.id, message = %id, pending = state.pending, "Reply queued");
        Ok(Some(id))
    }

    /// Submit a quick-action preset.
    pub fn quick_action(&self, action: &QuickAction) -> Result<Option<MessageId>, ChatError> {
        self.submit(action.text)
    }

    /// Clear the log back to the greeting and cancel every pending reply.
    pub fn reset(&self) -> Result<(), ChatError> {
        {
            let mut state = self.shared.lock()?;
            let was_composing = state.is_composing();
            let dropped = state.pending;

            state.epoch += 1;
            state.pending = 0;
            state.log.clear();
            let greeting = state.greeting();
            state.log.push(greeting.clone());

            self.shared.publish(SessionEvent::Reset);
            self.shared.publish(SessionEvent::MessageAppended(greeting));
            if was_composing {
                self.shared.publish(SessionEvent::ComposingChanged(false));
            }

            tracing::info!(session = %self.id, dropped, "Chat session reset");
        }

        self.shared.reset.notify_waiters();
        Ok(())
    }

    /// Snapshot of the conversation log.
    pub fn messages(&self) -> Vec<Message> {
        self.shared.read().log.clone()
    }

    /// Whether an assistant reply is pending.
    pub fn is_composing(&self) -> bool {
        self.shared.read().is_composing()
    }

    /// Subscribe to log and composing-flag changes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Wait until no reply is pending.
    pub async fn idle(&self) {
        let mut events = self.subscribe();
        loop {
            if !self.is_composing() {
                return;
            }
            match events.recv().await {
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return,
            }
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.worker.abort();
        tracing::debug!(session = %self.id, "Chat session dropped");
    }
}

// =============================================================================
// Reply worker
// =============================================================================

async fn reply_worker(
    shared: Arc<Shared>,
    mut jobs: mpsc::UnboundedReceiver<PendingResponse>,
    classifier: IntentClassifier,
    delay: Duration,
) {
    while let Some(job) = jobs.recv().await {
        let reset = shared.reset.notified();
        tokio::pin!(reset);
        reset.as_mut().enable();

        match epoch_is_current(&shared, job.epoch) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(reply_to = %job.reply_to, "Dropping reply from before reset");
                continue;
            }
            Err(e) => {
                tracing::error!(error = %e, "Reply worker stopping");
                return;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = &mut reset => {
                tracing::debug!(reply_to = %job.reply_to, "Reply cancelled by reset");
                continue;
            }
        }

        let classification = classifier.classify(&job.text);
        if let Err(e) = append_reply(&shared, &job, classification) {
            tracing::error!(error = %e, "Reply worker stopping");
            return;
        }
    }
}

fn epoch_is_current(shared: &Shared, epoch: u64) -> Result<bool, ChatError> {
    Ok(shared.lock()?.epoch == epoch)
}

fn append_reply(
    shared: &Shared,
    job: &PendingResponse,
    classification: Classification,
) -> Result<(), ChatError> {
    let mut state = shared.lock()?;
    if state.epoch != job.epoch {
        tracing::debug!(reply_to = %job.reply_to, "Dropping reply from before reset");
        return Ok(());
    }

    let message = state.assistant_message(classification.category, classification.template);
    tracing::debug!(
        reply_to = %job.reply_to,
        message = %message.id,
        category = %classification.category,
        blocks = message.blocks.len(),
        "Reply appended"
    );

    state.log.push(message.clone());
    state.pending = state.pending.saturating_sub(1);
    shared.publish(SessionEvent::MessageAppended(message));
    if state.pending == 0 {
        shared.publish(SessionEvent::ComposingChanged(false));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
