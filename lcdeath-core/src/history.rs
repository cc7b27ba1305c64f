//! Ordered trail of answered questions, used for undo and audit.

use crate::types::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Append-only stack of answered steps; `pop` is the only removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::QuestionId;
    use crate::types::Answer;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new();
        history.push(HistoryEntry::new(QuestionId::InterventionDeath, Answer::No));
        history.push(HistoryEntry::new(QuestionId::MetastasisEvidence, Answer::Yes));
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.last().map(|e| e.question),
            Some(QuestionId::MetastasisEvidence)
        );

        let popped = history.pop().unwrap();
        assert_eq!(popped.question, QuestionId::MetastasisEvidence);
        assert_eq!(popped.answer, Answer::Yes);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_pop_empty_does_not_underflow() {
        let mut history = History::new();
        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_iter_preserves_order() {
        let mut history = History::new();
        let ids = [
            QuestionId::InterventionDeath,
            QuestionId::InterventionForLc,
            QuestionId::LcContributingFactor,
        ];
        for id in ids {
            history.push(HistoryEntry::new(id, Answer::Yes));
        }
        let seen: Vec<QuestionId> = history.iter().map(|e| e.question).collect();
        assert_eq!(seen, ids);
        history.clear();
        assert!(history.is_empty());
    }
}
