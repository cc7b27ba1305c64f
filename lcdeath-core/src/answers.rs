//! The answer set: one entry per registry question, `Unanswered` until given.
//!
//! Keys are fixed at construction. Mutation only replaces values, so the set
//! always covers exactly the registry it was built from.

use crate::error::EngineError;
use crate::registry::{QuestionId, QuestionRegistry};
use crate::types::Answer;
use serde::{Deserialize, Serialize};

/// Answers recorded so far, in registry definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    entries: Vec<(QuestionId, Answer)>,
}

impl AnswerSet {
    pub fn new(registry: &QuestionRegistry) -> Self {
        Self {
            entries: registry.ids().map(|id| (id, Answer::Unanswered)).collect(),
        }
    }

    /// Current answer for `id`; `None` if the question is not in the registry.
    pub fn get(&self, id: QuestionId) -> Option<Answer> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, answer)| *answer)
    }

    /// Replace the answer for `id`. Never adds a key.
    pub fn set(&mut self, id: QuestionId, answer: Answer) -> Result<(), EngineError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(key, _)| *key == id)
            .ok_or(EngineError::UnknownQuestion { question: id })?;
        slot.1 = answer;
        Ok(())
    }

    pub fn clear(&mut self, id: QuestionId) -> Result<(), EngineError> {
        self.set(id, Answer::Unanswered)
    }

    pub fn reset(&mut self) {
        for (_, answer) in &mut self.entries {
            *answer = Answer::Unanswered;
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Entries that hold a real answer.
    pub fn answered(&self) -> impl Iterator<Item = (QuestionId, Answer)> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(|(_, answer)| answer.is_answered())
    }

    pub fn answered_count(&self) -> usize {
        self.answered().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summarize the recorded answers of a group of attribution questions.
    pub fn attributions(&self, questions: &[QuestionId]) -> AttributionSummary {
        let mut summary = AttributionSummary::default();
        for id in questions {
            match self.get(*id).unwrap_or(Answer::Unanswered) {
                Answer::Yes => summary.yes = true,
                Answer::No => summary.no = true,
                Answer::Doubt => summary.doubt = true,
                Answer::NotEnoughInformation => summary.not_enough_information = true,
                Answer::Unanswered => {}
            }
        }
        summary
    }
}

/// Which answers occur among a group of attribution questions.
///
/// Dominance: any yes wins over any no, any no wins over doubt, doubt wins
/// over not-enough-information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributionSummary {
    yes: bool,
    no: bool,
    doubt: bool,
    not_enough_information: bool,
}

impl AttributionSummary {
    pub fn any(&self, answer: Answer) -> bool {
        match answer {
            Answer::Yes => self.yes,
            Answer::No => self.no,
            Answer::Doubt => self.doubt,
            Answer::NotEnoughInformation => self.not_enough_information,
            Answer::Unanswered => {
                !(self.yes || self.no || self.doubt || self.not_enough_information)
            }
        }
    }

    pub fn dominant(&self) -> Answer {
        if self.yes {
            Answer::Yes
        } else if self.no {
            Answer::No
        } else if self.doubt {
            Answer::Doubt
        } else if self.not_enough_information {
            Answer::NotEnoughInformation
        } else {
            Answer::Unanswered
        }
    }
}
