//! Reply resequencing.
//!
//! Responder calls may finish in any order. `ReplySequencer` hands out a
//! ticket per committed message and releases completions strictly in ticket
//! order, parking the ones that arrive early. Completions issued under an
//! older generation are dropped.

use ragchat_core::error::Result;
use ragchat_core::message::MessageId;
use std::collections::BTreeMap;

/// Identifies one outstanding reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket {
    /// Thread incarnation the reply belongs to.
    pub generation: u64,
    /// Commit-order position within the generation.
    pub sequence: u64,
    /// User message being answered.
    pub trigger: MessageId,
}

/// A finished responder call.
#[derive(Debug, Clone)]
pub struct ReplyCompletion {
    pub ticket: ReplyTicket,
    pub outcome: Result<String>,
}

#[derive(Debug, Default)]
pub struct ReplySequencer {
    generation: u64,
    next_sequence: u64,
    next_release: u64,
    parked: BTreeMap<u64, ReplyCompletion>,
}

impl ReplySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issues the ticket for the next committed message.
    pub fn issue(&mut self, trigger: MessageId) -> ReplyTicket {
        let ticket = ReplyTicket {
            generation: self.generation,
            sequence: self.next_sequence,
            trigger,
        };
        self.next_sequence += 1;
        ticket
    }

    /// Accepts a completion and returns every completion that is now
    /// releasable, in sequence order.
    pub fn accept(&mut self, completion: ReplyCompletion) -> Vec<ReplyCompletion> {
        let ticket = completion.ticket;
        if ticket.generation != self.generation {
            tracing::debug!(
                "[ReplySequencer] dropping stale completion generation={} (current {})",
                ticket.generation,
                self.generation
            );
            return Vec::new();
        }
        if ticket.sequence < self.next_release || ticket.sequence >= self.next_sequence {
            tracing::warn!(
                "[ReplySequencer] dropping unexpected completion sequence={}",
                ticket.sequence
            );
            return Vec::new();
        }

        self.parked.insert(ticket.sequence, completion);

        let mut ready = Vec::new();
        while let Some(next) = self.parked.remove(&self.next_release) {
            ready.push(next);
            self.next_release += 1;
        }
        if !self.parked.is_empty() {
            tracing::debug!(
                "[ReplySequencer] {} completion(s) parked behind sequence {}",
                self.parked.len(),
                self.next_release
            );
        }
        ready
    }

    /// Replies issued but not yet released.
    pub fn pending(&self) -> usize {
        (self.next_sequence - self.next_release) as usize
    }

    /// Abandons every outstanding reply and starts a new generation.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.next_sequence = 0;
        self.next_release = 0;
        self.parked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_core::error::ChatError;

    fn completion(ticket: ReplyTicket, text: &str) -> ReplyCompletion {
        ReplyCompletion {
            ticket,
            outcome: Ok(text.to_string()),
        }
    }

    fn texts(ready: &[ReplyCompletion]) -> Vec<String> {
        ready
            .iter()
            .map(|c| c.outcome.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_in_order_completions_release_immediately() {
        let mut sequencer = ReplySequencer::new();
        let a = sequencer.issue(MessageId::new(1, 0));
        let b = sequencer.issue(MessageId::new(2, 0));
        assert_eq!(sequencer.pending(), 2);

        assert_eq!(texts(&sequencer.accept(completion(a, "a"))), vec!["a"]);
        assert_eq!(texts(&sequencer.accept(completion(b, "b"))), vec!["b"]);
        assert_eq!(sequencer.pending(), 0);
    }

    #[test]
    fn test_early_completion_is_parked() {
        let mut sequencer = ReplySequencer::new();
        let a = sequencer.issue(MessageId::new(1, 0));
        let b = sequencer.issue(MessageId::new(2, 0));
        let c = sequencer.issue(MessageId::new(3, 0));

        assert!(sequencer.accept(completion(c, "c")).is_empty());
        assert!(sequencer.accept(completion(b, "b")).is_empty());
        assert_eq!(sequencer.pending(), 3);

        assert_eq!(
            texts(&sequencer.accept(completion(a, "a"))),
            vec!["a", "b", "c"]
        );
        assert_eq!(sequencer.pending(), 0);
    }

    #[test]
    fn test_failures_keep_their_slot() {
        let mut sequencer = ReplySequencer::new();
        let a = sequencer.issue(MessageId::new(1, 0));
        let b = sequencer.issue(MessageId::new(2, 0));

        assert!(sequencer.accept(completion(b, "b")).is_empty());
        let ready = sequencer.accept(ReplyCompletion {
            ticket: a,
            outcome: Err(ChatError::responder("timeout")),
        });
        assert_eq!(ready.len(), 2);
        assert!(ready[0].outcome.is_err());
        assert_eq!(ready[1].ticket.sequence, b.sequence);
    }

    #[test]
    fn test_reset_discards_stale_generation() {
        let mut sequencer = ReplySequencer::new();
        let old = sequencer.issue(MessageId::new(1, 0));
        sequencer.reset();
        assert_eq!(sequencer.pending(), 0);

        assert!(sequencer.accept(completion(old, "late")).is_empty());

        let fresh = sequencer.issue(MessageId::new(2, 0));
        assert_eq!(fresh.generation, 1);
        assert_eq!(fresh.sequence, 0);
        assert_eq!(texts(&sequencer.accept(completion(fresh, "ok"))), vec!["ok"]);
    }

    #[test]
    fn test_duplicate_completion_ignored() {
        let mut sequencer = ReplySequencer::new();
        let a = sequencer.issue(MessageId::new(1, 0));
        assert_eq!(sequencer.accept(completion(a, "a")).len(), 1);
        assert!(sequencer.accept(completion(a, "again")).is_empty());
    }
}
