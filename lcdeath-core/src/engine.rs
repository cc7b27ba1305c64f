//! Engine controller: drives one classification session through a tree.
//!
//! The engine owns the answer set, the history stack and the current
//! position. `apply_answer`, `go_back` and `reset` are the only mutators,
//! and each either applies fully or leaves the engine untouched.

use crate::answers::AnswerSet;
use crate::config::{EmptyHistoryPolicy, EngineConfig};
use crate::error::EngineError;
use crate::history::History;
use crate::registry::Question;
use crate::report::SessionReport;
use crate::tree::{DecisionTree, Topology};
use crate::types::{Answer, Classification, HistoryEntry, Position};
use std::fmt;
use tracing::{debug, info};

/// A single classification session.
#[derive(Clone)]
pub struct Engine {
    tree: &'static dyn DecisionTree,
    answers: AnswerSet,
    history: History,
    position: Position,
    empty_history: EmptyHistoryPolicy,
}

impl Engine {
    pub fn new(topology: Topology) -> Self {
        let tree = topology.tree();
        Self {
            tree,
            answers: AnswerSet::new(tree.registry()),
            history: History::new(),
            position: Position::AtQuestion(tree.entry()),
            empty_history: EmptyHistoryPolicy::default(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.topology).with_empty_history_policy(config.empty_history)
    }

    pub fn with_empty_history_policy(mut self, policy: EmptyHistoryPolicy) -> Self {
        self.empty_history = policy;
        self
    }

    /// Rebuild a session by answering `entries` in order from the entry question.
    pub fn replay(
        topology: Topology,
        entries: impl IntoIterator<Item = HistoryEntry>,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(topology);
        for (step, entry) in entries.into_iter().enumerate() {
            if engine.position.question() != Some(entry.question) {
                return Err(EngineError::ReplayDiverged {
                    step,
                    question: entry.question,
                    expected: engine.position.to_string(),
                });
            }
            engine.apply_answer(entry.answer)?;
        }
        Ok(engine)
    }

    pub fn topology(&self) -> Topology {
        self.tree.topology()
    }

    pub fn tree(&self) -> &'static dyn DecisionTree {
        self.tree
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn empty_history_policy(&self) -> EmptyHistoryPolicy {
        self.empty_history
    }

    /// The question awaiting an answer, or `None` at a classification.
    pub fn current_question(&self) -> Option<&'static Question> {
        let id = self.position.question()?;
        let tree: &'static dyn DecisionTree = self.tree;
        tree.registry().lookup(id).ok()
    }

    pub fn classification(&self) -> Option<Classification> {
        self.position.classification()
    }

    pub fn is_complete(&self) -> bool {
        self.position.is_terminal()
    }

    /// Answered questions in the order they were answered.
    pub fn answered_path(&self) -> Vec<(&'static Question, Answer)> {
        let tree: &'static dyn DecisionTree = self.tree;
        let registry = tree.registry();
        self.history
            .iter()
            .filter_map(|entry| {
                registry
                    .lookup(entry.question)
                    .ok()
                    .map(|question| (question, entry.answer))
            })
            .collect()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Answer the current question and move to the next position.
    pub fn apply_answer(&mut self, answer: Answer) -> Result<&Position, EngineError> {
        let question = match self.position {
            Position::AtQuestion(id) => id,
            Position::AtClassification(classification) => {
                return Err(EngineError::Terminal { classification });
            }
        };

        let mut answers = self.answers.clone();
        answers.set(question, answer)?;
        let next = self.tree.transition(question, answer, &answers)?;

        self.answers = answers;
        self.history.push(HistoryEntry::new(question, answer));
        self.position = next;

        debug!(
            topology = %self.topology(),
            question = %question,
            answer = %answer,
            next = %next,
            "Answer applied"
        );
        if let Some(classification) = next.classification() {
            info!(
                topology = %self.topology(),
                classification = %classification,
                steps = self.history.len(),
                "Classification reached"
            );
        }
        Ok(&self.position)
    }

    /// Undo the most recent answer and return to the question it answered.
    pub fn go_back(&mut self) -> Result<&Position, EngineError> {
        let Some(entry) = self.history.last().copied() else {
            return match self.empty_history {
                EmptyHistoryPolicy::Reject => Err(EngineError::EmptyHistory),
                EmptyHistoryPolicy::Ignore => {
                    debug!("Undo requested with empty history; ignored");
                    Ok(&self.position)
                }
            };
        };

        self.answers.clear(entry.question)?;
        self.history.pop();
        self.position = Position::AtQuestion(entry.question);

        debug!(
            topology = %self.topology(),
            question = %entry.question,
            undone = %entry.answer,
            remaining = self.history.len(),
            "Answer undone"
        );
        Ok(&self.position)
    }

    /// Discard every answer and return to the entry question.
    pub fn reset(&mut self) {
        self.answers.reset();
        self.history.clear();
        self.position = Position::AtQuestion(self.tree.entry());
        debug!(topology = %self.topology(), "Session reset");
    }

    /// Replay the recorded history and confirm it reproduces the current state.
    pub fn verify_trail(&self) -> Result<(), EngineError> {
        let replayed = Self::replay(self.topology(), self.history.iter().copied())?;
        if replayed.position == self.position && replayed.answers == self.answers {
            return Ok(());
        }
        Err(EngineError::ReplayDiverged {
            step: self.history.len(),
            question: self
                .history
                .last()
                .map_or(self.tree.entry(), |entry| entry.question),
            expected: self.position.to_string(),
        })
    }

    pub fn report(&self) -> SessionReport {
        SessionReport::from_engine(self)
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Self) -> bool {
        self.topology() == other.topology()
            && self.position == other.position
            && self.answers == other.answers
            && self.history == other.history
            && self.empty_history == other.empty_history
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("topology", &self.topology())
            .field("position", &self.position)
            .field("history", &self.history)
            .field("empty_history", &self.empty_history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::QuestionId;

    #[test]
    fn test_new_engine_starts_at_entry() {
        let engine = Engine::new(Topology::Detailed);
        assert_eq!(
            engine.position(),
            &Position::AtQuestion(QuestionId::InterventionDeath)
        );
        assert!(!engine.can_go_back());
        assert!(engine.answered_path().is_empty());
        assert_eq!(
            engine.current_question().map(|q| q.id),
            Some(QuestionId::InterventionDeath)
        );
    }

    #[test]
    fn test_apply_answer_records_history_and_answers() {
        let mut engine = Engine::new(Topology::Detailed);
        engine.apply_answer(Answer::No).unwrap();
        assert_eq!(
            engine.position(),
            &Position::AtQuestion(QuestionId::MetastasisEvidence)
        );
        assert_eq!(engine.history().len(), 1);
        assert_eq!(
            engine.answers().get(QuestionId::InterventionDeath),
            Some(Answer::No)
        );
    }

    #[test]
    fn test_invalid_answer_leaves_state_untouched() {
        let mut engine = Engine::new(Topology::Detailed);
        let before = engine.clone();
        let err = engine.apply_answer(Answer::Doubt).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAnswerForQuestion { .. }));
        assert_eq!(engine, before);

        let err = engine.apply_answer(Answer::Unanswered).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAnswerForQuestion { .. }));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_apply_answer_at_classification_is_rejected() {
        let mut engine = Engine::new(Topology::Detailed);
        engine.apply_answer(Answer::Yes).unwrap();
        engine.apply_answer(Answer::Yes).unwrap();
        assert_eq!(
            engine.classification(),
            Some(Classification::DefinitelyLcDeath)
        );
        let before = engine.clone();
        let err = engine.apply_answer(Answer::Yes).unwrap_err();
        assert_eq!(
            err,
            EngineError::Terminal {
                classification: Classification::DefinitelyLcDeath
            }
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_go_back_from_classification() {
        let mut engine = Engine::new(Topology::Detailed);
        engine.apply_answer(Answer::Yes).unwrap();
        engine.apply_answer(Answer::Doubt).unwrap();
        assert!(engine.is_complete());

        let position = *engine.go_back().unwrap();
        assert_eq!(position, Position::AtQuestion(QuestionId::InterventionForLc));
        assert_eq!(
            engine.answers().get(QuestionId::InterventionForLc),
            Some(Answer::Unanswered)
        );
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_go_back_empty_history_policies() {
        let mut engine = Engine::new(Topology::Detailed);
        assert_eq!(engine.go_back().unwrap_err(), EngineError::EmptyHistory);

        let mut engine =
            Engine::new(Topology::Detailed).with_empty_history_policy(EmptyHistoryPolicy::Ignore);
        let fresh = engine.clone();
        assert!(engine.go_back().is_ok());
        assert_eq!(engine, fresh);
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = Engine::new(Topology::Collapsed);
        engine.apply_answer(Answer::No).unwrap();
        engine.apply_answer(Answer::Yes).unwrap();
        engine.reset();
        assert_eq!(engine, Engine::new(Topology::Collapsed));
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            topology: Topology::Collapsed,
            empty_history: EmptyHistoryPolicy::Ignore,
        };
        let engine = Engine::from_config(&config);
        assert_eq!(engine.topology(), Topology::Collapsed);
        assert_eq!(engine.empty_history_policy(), EmptyHistoryPolicy::Ignore);
    }

    #[test]
    fn test_replay_diverges_on_wrong_question() {
        let entries = [
            HistoryEntry::new(QuestionId::InterventionDeath, Answer::No),
            HistoryEntry::new(QuestionId::InterventionForLc, Answer::Yes),
        ];
        let err = Engine::replay(Topology::Detailed, entries).unwrap_err();
        assert_eq!(
            err,
            EngineError::ReplayDiverged {
                step: 1,
                question: QuestionId::InterventionForLc,
                expected: "question:metastasisEvidence".to_string(),
            }
        );
    }

    #[test]
    fn test_verify_trail() {
        let mut engine = Engine::new(Topology::Detailed);
        for answer in [Answer::No, Answer::Yes, Answer::No, Answer::Doubt] {
            engine.apply_answer(answer).unwrap();
        }
        assert!(engine.verify_trail().is_ok());
        engine.go_back().unwrap();
        assert!(engine.verify_trail().is_ok());
    }
}
