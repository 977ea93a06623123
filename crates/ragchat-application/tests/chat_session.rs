use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use ragchat_application::{ChatSession, SessionEvent};
use ragchat_core::config::AppConfig;
use ragchat_core::error::{ChatError, Result};
use ragchat_core::history::{HistoryEntry, HistoryProvider};
use ragchat_core::keyboard::KeyboardEvent;
use ragchat_core::message::{MessageStatus, Origin};
use ragchat_core::navigation::{Navigator, Route};
use ragchat_core::overlay::{CloseReason, Overlay, UploadOption};
use ragchat_core::responder::{PlaceholderResponder, ReplyRequest, Responder};
use ragchat_infrastructure::StaticHistoryProvider;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

// ============================================================================
// Test collaborators
// ============================================================================

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    backs: AtomicUsize,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Answers immediately with "re: <text>" unless a gate is registered for the
/// text, in which case it waits for the gate.
#[derive(Default)]
struct GatedResponder {
    gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
    requests: Mutex<Vec<ReplyRequest>>,
}

impl GatedResponder {
    fn gate(&self, text: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(text.to_string(), rx);
        tx
    }

    fn requests(&self) -> Vec<ReplyRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for GatedResponder {
    async fn respond(&self, request: &ReplyRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gates.lock().unwrap().remove(&request.message.text);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| ChatError::responder("gate dropped")),
            None => Ok(format!("re: {}", request.message.text)),
        }
    }
}

/// Fails the first `failures` calls, then answers.
struct FlakyResponder {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl Responder for FlakyResponder {
    async fn respond(&self, request: &ReplyRequest) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(ChatError::responder("backend unavailable"))
        } else {
            Ok(format!("answer to {}", request.message.text))
        }
    }
}

struct PanickingResponder;

#[async_trait]
impl Responder for PanickingResponder {
    async fn respond(&self, _request: &ReplyRequest) -> Result<String> {
        panic!("responder exploded");
    }
}

struct BlankResponder;

#[async_trait]
impl Responder for BlankResponder {
    async fn respond(&self, _request: &ReplyRequest) -> Result<String> {
        Ok("   ".to_string())
    }
}

#[derive(Default)]
struct MutableHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MutableHistory {
    fn set(&self, entries: Vec<HistoryEntry>) {
        *self.entries.lock().unwrap() = entries;
    }
}

#[async_trait]
impl HistoryProvider for MutableHistory {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }
}

fn session_with(responder: Arc<dyn Responder>) -> (ChatSession, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let session = ChatSession::new(
        &AppConfig::default(),
        responder,
        Arc::new(StaticHistoryProvider::with_samples()),
        navigator.clone(),
    );
    (session, navigator)
}

fn texts(session: &ChatSession) -> Vec<String> {
    session.messages().iter().map(|m| m.text.clone()).collect()
}

// ============================================================================
// Thread
// ============================================================================

#[tokio::test]
async fn test_session_starts_with_greeting() {
    let (session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].origin, Origin::Assistant);
    assert_eq!(messages[0].text, "Hello! How can I assist you today?");
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn test_commit_appends_user_message_then_reply() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    session.update_draft("What is RAG?");
    let ticket = session.commit().expect("Should commit");

    // User message is visible and the draft is cleared before any reply
    assert_eq!(session.draft(), "");
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.pending_replies(), 1);

    session.settle().await;

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "What is RAG?");
    assert!(messages[1].is_user());
    assert_eq!(messages[2].text, "Processing your request...");
    assert_eq!(messages[2].origin, Origin::Assistant);
    assert_eq!(messages[2].reply_to, Some(ticket.trigger));
    assert_eq!(messages[2].status, MessageStatus::Delivered);
    assert_eq!(session.pending_replies(), 0);
}

#[tokio::test]
async fn test_blank_commit_is_noop() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    session.update_draft("   \n\t");
    assert!(session.commit().is_none());

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.draft(), "   \n\t");
    assert_eq!(session.pending_replies(), 0);
    assert_eq!(session.next_reply().await, None);
}

#[tokio::test]
async fn test_committed_text_is_trimmed() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    session.update_draft("  hello  ");
    session.commit();

    assert_eq!(session.messages()[1].text, "hello");
}

#[tokio::test]
async fn test_replies_follow_commit_order() {
    let responder = Arc::new(GatedResponder::default());
    let (mut session, _) = session_with(responder.clone());

    let first = responder.gate("one");
    let second = responder.gate("two");
    let third = responder.gate("three");

    for text in ["one", "two", "three"] {
        session.update_draft(text);
        session.commit().expect("Should commit");
    }
    assert_eq!(session.pending_replies(), 3);

    // Release in reverse; nothing may be appended until "one" answers
    third.send("third".to_string()).unwrap();
    assert_eq!(session.next_reply().await, Some(0));
    second.send("second".to_string()).unwrap();
    assert_eq!(session.next_reply().await, Some(0));
    assert_eq!(session.messages().len(), 4);

    first.send("first".to_string()).unwrap();
    assert_eq!(session.next_reply().await, Some(3));

    assert_eq!(
        texts(&session),
        vec![
            "Hello! How can I assist you today?",
            "one",
            "two",
            "three",
            "first",
            "second",
            "third",
        ]
    );

    // Each reply points at the message it answers
    let messages = session.messages();
    assert_eq!(messages[4].reply_to, Some(messages[1].id));
    assert_eq!(messages[5].reply_to, Some(messages[2].id));
    assert_eq!(messages[6].reply_to, Some(messages[3].id));
}

#[tokio::test]
async fn test_message_ids_strictly_increase() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    for text in ["a", "b", "c"] {
        session.update_draft(text);
        session.commit();
    }
    session.settle().await;

    let ids: Vec<_> = session.messages().iter().map(|m| m.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_responder_sees_preceding_context() {
    let responder = Arc::new(GatedResponder::default());
    let (mut session, _) = session_with(responder.clone());

    session.update_draft("first question");
    session.commit();
    session.settle().await;
    session.update_draft("second question");
    session.commit();
    session.settle().await;

    let requests = responder.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].sequence, 0);
    assert_eq!(requests[0].context.len(), 1);
    assert_eq!(requests[1].sequence, 1);
    let context: Vec<&str> = requests[1]
        .context
        .iter()
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(
        context,
        vec![
            "Hello! How can I assist you today?",
            "first question",
            "re: first question",
        ]
    );
}

// ============================================================================
// Failures and retry
// ============================================================================

#[tokio::test]
async fn test_failed_reply_then_retry() {
    let responder = Arc::new(FlakyResponder {
        failures: 1,
        calls: AtomicUsize::new(0),
    });
    let (mut session, _) = session_with(responder);

    session.update_draft("summarize my notes");
    let ticket = session.commit().unwrap();
    session.settle().await;

    let failed = session.messages().last().unwrap().clone();
    assert!(failed.is_failed());
    assert_eq!(failed.text, "Something went wrong. Tap to retry.");
    assert_eq!(failed.reply_to, Some(ticket.trigger));

    let retry = session.retry(failed.id).expect("Should retry");
    assert_eq!(retry.trigger, ticket.trigger);
    session.settle().await;

    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    // The failed reply stays where it was
    assert_eq!(messages[2].id, failed.id);
    assert_eq!(messages[3].text, "answer to summarize my notes");
    assert_eq!(messages[3].status, MessageStatus::Delivered);
}

#[tokio::test]
async fn test_failed_reply_can_only_be_retried_once() {
    let responder = Arc::new(FlakyResponder {
        failures: 1,
        calls: AtomicUsize::new(0),
    });
    let (mut session, _) = session_with(responder);

    session.update_draft("q");
    session.commit();
    session.settle().await;
    let failed = session.messages().last().unwrap().id;
    assert!(session.can_retry(failed));

    session.retry(failed).expect("Should retry");
    session.settle().await;
    assert!(!session.can_retry(failed));

    let err = session.retry(failed).unwrap_err();
    assert!(err.is_validation());

    // One user turn, one failed reply, one delivered reply
    let replies = session
        .messages()
        .iter()
        .filter(|m| m.origin == Origin::Assistant && m.reply_to.is_some())
        .count();
    assert_eq!(replies, 2);
    assert_eq!(session.pending_replies(), 0);
}

#[tokio::test]
async fn test_retry_rejects_delivered_and_unknown_messages() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    session.update_draft("hi");
    session.commit();
    session.settle().await;

    let delivered = session.messages()[2].id;
    assert!(session.retry(delivered).unwrap_err().is_validation());

    let unknown = ragchat_core::message::MessageId::new(0, 99);
    assert!(session.retry(unknown).unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_panicking_responder_becomes_failed_reply() {
    let (mut session, _) = session_with(Arc::new(PanickingResponder));

    session.update_draft("boom");
    session.commit();
    session.settle().await;

    let last = session.messages().last().unwrap();
    assert!(last.is_failed());
    assert_eq!(session.messages().len(), 3);
}

#[tokio::test]
async fn test_blank_reply_is_failure() {
    let (mut session, _) = session_with(Arc::new(BlankResponder));

    session.update_draft("anything");
    session.commit();
    session.settle().await;

    let last = session.messages().last().unwrap();
    assert_eq!(
        last.status,
        MessageStatus::Failed {
            reason: "empty reply".to_string()
        }
    );
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_unmount_discards_in_flight_replies() {
    let responder = Arc::new(GatedResponder::default());
    let (mut session, _) = session_with(responder.clone());
    let gate = responder.gate("slow");

    session.update_draft("slow");
    session.commit();
    session.unmount();

    // The task is gone; the send may or may not find a receiver
    let _ = gate.send("too late".to_string());
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(session.pump(), 0);
    assert_eq!(session.pending_replies(), 0);
    assert_eq!(session.next_reply().await, None);
    assert_eq!(session.messages().len(), 2);
    assert!(!session.is_mounted());

    session.update_draft("after unmount");
    assert!(session.commit().is_none());
}

#[tokio::test]
async fn test_new_chat_resets_thread_and_drops_late_replies() {
    let responder = Arc::new(GatedResponder::default());
    let (mut session, _) = session_with(responder.clone());
    let gate = responder.gate("old question");
    let now = Instant::now();

    session.update_draft("old question");
    session.commit();
    session.update_draft("unsent");
    session.open_history(now);

    session.new_chat(now);

    assert_eq!(texts(&session), vec!["Hello! How can I assist you today?"]);
    assert_eq!(session.draft(), "");
    assert_eq!(session.overlay(), Overlay::None);
    assert_eq!(session.pending_replies(), 0);

    let _ = gate.send("stale".to_string());
    session.update_draft("new question");
    session.commit();
    session.settle().await;

    assert_eq!(
        texts(&session),
        vec![
            "Hello! How can I assist you today?",
            "new question",
            "re: new question",
        ]
    );
}

// ============================================================================
// Overlays
// ============================================================================

#[tokio::test]
async fn test_switching_overlays_closes_then_opens() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    let now = Instant::now();

    let opened = session.open_upload_menu(now);
    assert_eq!(opened.to, Overlay::UploadMenu);

    let switched = session.open_history(now);
    assert_eq!(switched.from, Overlay::UploadMenu);
    assert_eq!(switched.to, Overlay::History);
    assert_eq!(session.overlay(), Overlay::History);

    let toggled = session.toggle_history(now);
    assert_eq!(toggled.to, Overlay::None);
}

#[tokio::test]
async fn test_overlays_never_touch_the_thread() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    let now = Instant::now();
    session.update_draft("draft survives");

    session.open_history(now);
    session.open_upload_menu(now);
    session.close_overlay(CloseReason::ScrimTap, now);

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.draft(), "draft survives");
}

#[tokio::test]
async fn test_select_upload_records_and_closes() {
    let (mut session, navigator) = session_with(Arc::new(PlaceholderResponder::default()));
    let now = Instant::now();

    session.open_upload_menu(now);
    let transition = session.select_upload(UploadOption::Pdf, now);
    assert_eq!(transition.selection, Some(UploadOption::Pdf));
    assert_eq!(session.overlay(), Overlay::None);

    session.open_upload_menu(now);
    session.select_upload(UploadOption::Memory, now);

    assert_eq!(session.uploads(), &[UploadOption::Pdf, UploadOption::Memory]);
    assert_eq!(navigator.routes(), vec![Route::AddMemory]);
    assert_eq!(session.view(now).last_upload, Some(UploadOption::Memory));
}

#[tokio::test]
async fn test_stale_upload_selection_is_ignored() {
    let (mut session, navigator) = session_with(Arc::new(PlaceholderResponder::default()));
    let now = Instant::now();

    let transition = session.select_upload(UploadOption::Memory, now);

    assert!(!transition.changed());
    assert_eq!(transition.selection, None);
    assert!(session.uploads().is_empty());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_drawer_offset_animates_toward_open() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    let start = Instant::now();

    assert_eq!(session.drawer_offset(start), -300.0);
    session.open_history(start);

    let midway = session.drawer_offset(start + Duration::from_millis(150));
    assert!(midway > -300.0 && midway < 0.0);
    assert_eq!(session.drawer_offset(start + Duration::from_millis(300)), 0.0);

    // Closing mid-flight starts from wherever the drawer is
    let close_at = start + Duration::from_millis(400);
    session.close_overlay(CloseReason::SystemBack, close_at);
    assert_eq!(session.overlay(), Overlay::None);
    assert_eq!(session.drawer_offset(close_at), 0.0);
    assert_eq!(
        session.drawer_offset(close_at + Duration::from_millis(300)),
        -300.0
    );
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_snapshot_is_frozen_while_drawer_open() {
    let provider = Arc::new(MutableHistory::default());
    let now = Utc::now();
    provider.set(vec![HistoryEntry::new("1", "Document analysis", now)]);

    let mut session = ChatSession::new(
        &AppConfig::default(),
        Arc::new(PlaceholderResponder::default()),
        provider.clone(),
        Arc::new(RecordingNavigator::default()),
    );
    session.refresh_history().await.unwrap();
    assert_eq!(session.history().len(), 1);

    let opened_at = Instant::now();
    session.open_history(opened_at);
    provider.set(vec![
        HistoryEntry::new("1", "Document analysis", now - ChronoDuration::days(1)),
        HistoryEntry::new("2", "Research help", now),
    ]);
    session.refresh_history().await.unwrap();

    // Rows do not move while the drawer is open
    assert_eq!(session.history().len(), 1);

    session.close_overlay(CloseReason::Explicit, opened_at);
    let titles: Vec<&str> = session.history().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Research help", "Document analysis"]);
}

#[tokio::test]
async fn test_first_open_shows_entries() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));

    // Drawer opened before anything was loaded
    session.toggle_history(Instant::now());
    session.refresh_history().await.unwrap();

    let titles: Vec<&str> = session.history().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Document analysis", "Research help"]);
    assert_eq!(session.view(Instant::now()).history.len(), 2);
}

#[tokio::test]
async fn test_search_history() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    session.refresh_history().await.unwrap();

    let hits = session.search_history("RESEARCH");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Research help");
    assert_eq!(session.search_history("").len(), 2);
    assert!(session.search_history("weather").is_empty());
}

// ============================================================================
// Events and view
// ============================================================================

#[tokio::test]
async fn test_handle_events_drive_the_session() {
    let (mut session, navigator) = session_with(Arc::new(PlaceholderResponder::default()));
    let now = Instant::now();

    session
        .handle(SessionEvent::DraftChanged("What is RAG?".to_string()), now)
        .unwrap();
    let ticket = session.handle(SessionEvent::Send, now).unwrap();
    assert!(ticket.is_some());

    session
        .handle(SessionEvent::Keyboard(KeyboardEvent::Shown { height: 260.0 }), now)
        .unwrap();
    session.handle(SessionEvent::ToggleHistory, now).unwrap();

    let view = session.view(now);
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.draft, "");
    assert_eq!(view.overlay, Overlay::History);
    assert_eq!(view.bottom_inset, 260.0);
    assert_eq!(view.pending_replies, 1);

    session.handle(SessionEvent::OpenMemories, now).unwrap();
    session.handle(SessionEvent::OpenSettings, now).unwrap();
    assert_eq!(navigator.routes(), vec![Route::Memories, Route::Settings]);

    session
        .handle(SessionEvent::Keyboard(KeyboardEvent::Hidden), now)
        .unwrap();
    session.settle().await;
    let view = session.view(now);
    assert_eq!(view.bottom_inset, 0.0);
    assert_eq!(view.messages.len(), 3);
    assert_eq!(view.pending_replies, 0);
}

#[tokio::test]
async fn test_handle_retry_propagates_errors() {
    let (mut session, _) = session_with(Arc::new(PlaceholderResponder::default()));
    let greeting = session.messages()[0].id;

    let err = session
        .handle(SessionEvent::Retry(greeting), Instant::now())
        .unwrap_err();
    assert!(err.is_validation());
}
