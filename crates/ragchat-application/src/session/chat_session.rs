//! The chat screen's session controller.

use super::dispatcher::ReplyDispatcher;
use super::event::SessionEvent;
use super::reply::{ReplyCompletion, ReplySequencer, ReplyTicket};
use super::view::SessionView;
use ragchat_core::composer::Composer;
use ragchat_core::config::{AppConfig, ChatConfig};
use ragchat_core::error::{ChatError, Result};
use ragchat_core::history::{HistoryEntry, HistoryIndex, HistoryProvider};
use ragchat_core::keyboard::{KeyboardEvent, KeyboardInset};
use ragchat_core::message::{Message, MessageId, MessageStatus, MessageStore, Origin};
use ragchat_core::navigation::{Navigator, Route};
use ragchat_core::overlay::{
    CloseReason, Overlay, OverlayController, OverlayTransition, UploadOption,
};
use ragchat_core::responder::{ReplyRequest, Responder};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Owns one chat thread and everything layered on top of it.
///
/// `ChatSession` is driven by a single event loop: each method runs to
/// completion before the next event is handled, so no locking is needed.
/// Responder calls run as tokio tasks; their results come back through
/// [`pump`](Self::pump), [`next_reply`](Self::next_reply) or
/// [`settle`](Self::settle) and are appended in commit order.
///
/// Overlay changes never touch the message store.
pub struct ChatSession {
    id: String,
    config: ChatConfig,
    store: MessageStore,
    composer: Composer,
    overlay: OverlayController,
    history: HistoryIndex,
    keyboard: KeyboardInset,
    sequencer: ReplySequencer,
    dispatcher: ReplyDispatcher,
    history_provider: Arc<dyn HistoryProvider>,
    navigator: Arc<dyn Navigator>,
    uploads: Vec<UploadOption>,
    /// Failed replies that have already been retried.
    retried: HashSet<MessageId>,
    mounted: bool,
}

impl ChatSession {
    /// Creates a session whose thread starts with the configured greeting.
    pub fn new(
        config: &AppConfig,
        responder: Arc<dyn Responder>,
        history_provider: Arc<dyn HistoryProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        tracing::debug!("[ChatSession] new session id={}", id);

        Self {
            id,
            store: Self::fresh_store(&config.chat),
            config: config.chat.clone(),
            composer: Composer::new(),
            overlay: OverlayController::new(&config.drawer),
            history: HistoryIndex::default(),
            keyboard: KeyboardInset::default(),
            sequencer: ReplySequencer::new(),
            dispatcher: ReplyDispatcher::new(responder),
            history_provider,
            navigator,
            uploads: Vec::new(),
            retried: HashSet::new(),
            mounted: true,
        }
    }

    fn fresh_store(config: &ChatConfig) -> MessageStore {
        let mut store = MessageStore::new();
        if let Err(e) = store.record(
            Origin::Assistant,
            config.greeting.clone(),
            MessageStatus::Delivered,
            None,
        ) {
            tracing::warn!("[ChatSession] could not add greeting: {}", e);
        }
        store
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ============================================================================
    // Thread
    // ============================================================================

    pub fn messages(&self) -> &[Message] {
        self.store.list()
    }

    pub fn draft(&self) -> &str {
        self.composer.draft()
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.composer.update_draft(text);
    }

    /// Sends the draft.
    ///
    /// Appends the user message, clears the draft and requests a reply in one
    /// step. A blank draft does nothing and returns `None`.
    pub fn commit(&mut self) -> Option<ReplyTicket> {
        if !self.mounted {
            tracing::warn!("[ChatSession] commit on unmounted session id={}", self.id);
            return None;
        }

        let message = match self.composer.commit(&mut self.store) {
            Ok(Some(message)) => message,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[ChatSession] commit rejected: {}", e);
                return None;
            }
        };

        Some(self.request_reply(message))
    }

    /// Asks the responder again for the user message behind a failed reply.
    ///
    /// The failed reply stays in the thread; the new one is appended at the
    /// tail like any other. Each failed reply can be retried once.
    pub fn retry(&mut self, failed: MessageId) -> Result<ReplyTicket> {
        if !self.mounted {
            return Err(ChatError::internal("session is unmounted"));
        }

        let failed_message = self
            .store
            .get(failed)
            .ok_or_else(|| ChatError::not_found("Message", failed.to_string()))?;
        if !failed_message.is_failed() {
            return Err(ChatError::validation(format!(
                "message {} has not failed",
                failed
            )));
        }
        if self.retried.contains(&failed) {
            return Err(ChatError::validation(format!(
                "message {} was already retried",
                failed
            )));
        }
        let trigger_id = failed_message.reply_to.ok_or_else(|| {
            ChatError::internal(format!("failed message {} has no trigger", failed))
        })?;
        let trigger = self
            .store
            .get(trigger_id)
            .cloned()
            .ok_or_else(|| ChatError::not_found("Message", trigger_id.to_string()))?;

        tracing::info!("[ChatSession] retrying reply to {}", trigger_id);
        self.retried.insert(failed);
        Ok(self.request_reply(trigger))
    }

    /// Whether `id` is a failed reply that has not been retried yet.
    pub fn can_retry(&self, id: MessageId) -> bool {
        self.mounted
            && !self.retried.contains(&id)
            && self.store.get(id).is_some_and(Message::is_failed)
    }

    fn request_reply(&mut self, message: Message) -> ReplyTicket {
        let ticket = self.sequencer.issue(message.id);
        let context = self
            .store
            .preceding(message.id, self.config.context_window);
        let request = ReplyRequest {
            sequence: ticket.sequence,
            message,
            context,
        };

        tracing::debug!(
            "[ChatSession] requesting reply sequence={} trigger={}",
            ticket.sequence,
            ticket.trigger
        );
        self.dispatcher.dispatch(ticket, request);
        ticket
    }

    /// Feeds one completion through the sequencer and appends whatever is
    /// now releasable. Returns the number of messages appended.
    fn apply_completion(&mut self, completion: ReplyCompletion) -> usize {
        let mut appended = 0;

        for ready in self.sequencer.accept(completion) {
            let (text, status) = match ready.outcome {
                Ok(text) if !text.trim().is_empty() => (text, MessageStatus::Delivered),
                Ok(_) => {
                    tracing::warn!("[ChatSession] responder returned an empty reply");
                    (
                        self.config.failure_notice.clone(),
                        MessageStatus::Failed {
                            reason: "empty reply".to_string(),
                        },
                    )
                }
                Err(e) => {
                    tracing::warn!("[ChatSession] reply failed: {}", e);
                    (
                        self.config.failure_notice.clone(),
                        MessageStatus::Failed {
                            reason: e.to_string(),
                        },
                    )
                }
            };

            match self.store.record(
                Origin::Assistant,
                text,
                status,
                Some(ready.ticket.trigger),
            ) {
                Ok(_) => appended += 1,
                Err(e) => tracing::warn!("[ChatSession] could not append reply: {}", e),
            }
        }

        appended
    }

    /// Applies every completion that has already arrived.
    pub fn pump(&mut self) -> usize {
        let mut appended = 0;
        while let Some(completion) = self.dispatcher.try_recv() {
            appended += self.apply_completion(completion);
        }
        appended
    }

    /// Waits for one completion and applies it.
    ///
    /// Returns `None` when no reply is pending, otherwise the number of
    /// messages appended (zero when the completion was parked).
    pub async fn next_reply(&mut self) -> Option<usize> {
        if self.sequencer.pending() == 0 {
            return None;
        }
        let completion = self.dispatcher.recv().await?;
        Some(self.apply_completion(completion))
    }

    /// Waits until every requested reply is in the thread.
    pub async fn settle(&mut self) {
        while self.next_reply().await.is_some() {}
    }

    pub fn pending_replies(&self) -> usize {
        self.sequencer.pending()
    }

    fn cancel_outstanding(&mut self) {
        let pending = self.sequencer.pending();
        if pending > 0 {
            tracing::info!(
                "[ChatSession] discarding {} outstanding repl(ies) id={}",
                pending,
                self.id
            );
        }
        self.sequencer.reset();
        self.dispatcher.cancel_all();
    }

    /// Starts over with only the greeting. Outstanding replies are discarded.
    pub fn new_chat(&mut self, now: Instant) {
        self.cancel_outstanding();
        self.store = Self::fresh_store(&self.config);
        self.retried.clear();
        self.composer.clear();
        self.close_overlay(CloseReason::Explicit, now);
        tracing::info!("[ChatSession] new chat id={}", self.id);
    }

    /// The screen went away. Replies still in flight will never be appended.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.cancel_outstanding();
        tracing::debug!("[ChatSession] unmounted id={}", self.id);
    }

    // ============================================================================
    // Overlays
    // ============================================================================

    pub fn overlay(&self) -> Overlay {
        self.overlay.active()
    }

    pub fn open_history(&mut self, now: Instant) -> OverlayTransition {
        let transition = self.overlay.open_history(now);
        self.after_overlay(transition)
    }

    pub fn open_upload_menu(&mut self, now: Instant) -> OverlayTransition {
        let transition = self.overlay.open_upload_menu(now);
        self.after_overlay(transition)
    }

    pub fn toggle_history(&mut self, now: Instant) -> OverlayTransition {
        let transition = self.overlay.toggle_history(now);
        self.after_overlay(transition)
    }

    pub fn close_overlay(&mut self, reason: CloseReason, now: Instant) -> OverlayTransition {
        let transition = self.overlay.close(reason, now);
        self.after_overlay(transition)
    }

    /// Picks an entry of the upload sheet; the sheet closes in the same step.
    pub fn select_upload(&mut self, option: UploadOption, now: Instant) -> OverlayTransition {
        let transition = self.overlay.select_upload(option, now);
        self.after_overlay(transition)
    }

    fn after_overlay(&mut self, transition: OverlayTransition) -> OverlayTransition {
        if transition.to == Overlay::History && transition.from != Overlay::History {
            self.history.freeze();
        } else if transition.from == Overlay::History && transition.to != Overlay::History {
            self.history.thaw();
        }

        if let Some(option) = transition.selection {
            tracing::info!("[ChatSession] selected upload option: {}", option);
            self.uploads.push(option);
            if option == UploadOption::Memory {
                self.navigator.push(Route::AddMemory);
            }
        }

        transition
    }

    /// Upload options picked so far, oldest first.
    pub fn uploads(&self) -> &[UploadOption] {
        &self.uploads
    }

    pub fn drawer_offset(&self, now: Instant) -> f32 {
        self.overlay.drawer_offset(now)
    }

    // ============================================================================
    // History
    // ============================================================================

    /// Reloads the history snapshot from the provider.
    ///
    /// While the drawer is open the new snapshot is held back until it closes.
    pub async fn refresh_history(&mut self) -> Result<()> {
        let entries = self.history_provider.load_history().await.map_err(|e| {
            tracing::warn!("[ChatSession] failed to load history: {}", e);
            e
        })?;
        self.history.replace(entries);
        Ok(())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.list()
    }

    pub fn search_history(&self, query: &str) -> Vec<&HistoryEntry> {
        self.history.search(query)
    }

    // ============================================================================
    // Platform collaborators
    // ============================================================================

    pub fn keyboard(&mut self, event: KeyboardEvent) {
        self.keyboard.apply(event);
    }

    pub fn open_memories(&self) {
        self.navigator.push(Route::Memories);
    }

    pub fn open_settings(&self) {
        self.navigator.push(Route::Settings);
    }

    // ============================================================================
    // Event entry point and rendering
    // ============================================================================

    /// Applies one UI event.
    ///
    /// Returns the reply ticket when the event requested a reply.
    pub fn handle(&mut self, event: SessionEvent, now: Instant) -> Result<Option<ReplyTicket>> {
        match event {
            SessionEvent::DraftChanged(text) => self.update_draft(text),
            SessionEvent::Send => return Ok(self.commit()),
            SessionEvent::Retry(id) => return self.retry(id).map(Some),
            SessionEvent::ToggleHistory => {
                self.toggle_history(now);
            }
            SessionEvent::OpenHistory => {
                self.open_history(now);
            }
            SessionEvent::OpenUploadMenu => {
                self.open_upload_menu(now);
            }
            SessionEvent::CloseOverlay(reason) => {
                self.close_overlay(reason, now);
            }
            SessionEvent::SelectUpload(option) => {
                self.select_upload(option, now);
            }
            SessionEvent::Keyboard(event) => self.keyboard(event),
            SessionEvent::NewChat => self.new_chat(now),
            SessionEvent::OpenMemories => self.open_memories(),
            SessionEvent::OpenSettings => self.open_settings(),
        }
        Ok(None)
    }

    pub fn view(&self, now: Instant) -> SessionView<'_> {
        SessionView {
            messages: self.store.list(),
            draft: self.composer.draft(),
            overlay: self.overlay.active(),
            drawer_offset: self.overlay.drawer_offset(now),
            bottom_inset: self.keyboard.bottom(),
            pending_replies: self.sequencer.pending(),
            history: self.history.list(),
            last_upload: self.overlay.last_selection(),
        }
    }
}
