//! Runs responder calls off the event loop.

use super::reply::{ReplyCompletion, ReplyTicket};
use ragchat_core::error::ChatError;
use ragchat_core::responder::{ReplyRequest, Responder};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Spawns one tokio task per reply and funnels the completions back through
/// a channel that the owning session drains on its own schedule.
///
/// Every dispatch reports exactly once unless it is cancelled. Responder
/// errors and panics are turned into failed outcomes.
pub struct ReplyDispatcher {
    responder: Arc<dyn Responder>,
    tx: mpsc::UnboundedSender<ReplyCompletion>,
    rx: mpsc::UnboundedReceiver<ReplyCompletion>,
    cancel: CancellationToken,
}

impl ReplyDispatcher {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            responder,
            tx,
            rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Starts answering `request`. Must be called within a tokio runtime.
    pub fn dispatch(&self, ticket: ReplyTicket, request: ReplyRequest) {
        let responder = Arc::clone(&self.responder);
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            // A responder panic comes back as a JoinError on this handle.
            let call = tokio::spawn(async move { responder.respond(&request).await });
            let abort = call.abort_handle();

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    tracing::debug!(
                        "[ReplyDispatcher] cancelled reply generation={} sequence={}",
                        ticket.generation,
                        ticket.sequence
                    );
                    return;
                }
                joined = call => match joined {
                    Ok(outcome) => outcome,
                    Err(e) if e.is_panic() => {
                        tracing::warn!(
                            "[ReplyDispatcher] responder panicked on sequence={}",
                            ticket.sequence
                        );
                        Err(ChatError::responder("responder panicked"))
                    }
                    Err(e) => Err(ChatError::responder(format!("reply task failed: {}", e))),
                },
            };

            if tx.send(ReplyCompletion { ticket, outcome }).is_err() {
                tracing::debug!("[ReplyDispatcher] session gone; dropping reply");
            }
        });
    }

    /// Returns a completion that has already arrived, if any.
    pub fn try_recv(&mut self) -> Option<ReplyCompletion> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next completion.
    pub async fn recv(&mut self) -> Option<ReplyCompletion> {
        self.rx.recv().await
    }

    /// Cancels every in-flight call. Later dispatches are unaffected.
    pub fn cancel_all(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for ReplyDispatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
