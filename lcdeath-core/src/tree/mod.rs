//! Decision trees for lung cancer cause-of-death classification.
//!
//! Each topology is a declarative edge table `(question, answer) -> Edge`
//! plus a small set of rules for the steps whose outcome depends on answers
//! recorded earlier in the traversal. [`DecisionTree::transition`] is the
//! pure transition function the engine drives.

pub mod collapsed;
pub mod detailed;

use crate::answers::AnswerSet;
use crate::error::EngineError;
use crate::registry::{QuestionId, QuestionRegistry};
use crate::types::{Answer, Classification, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::error;

pub use collapsed::CollapsedTree;
pub use detailed::DetailedTree;

/// Which tree definition a session walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// 14 questions, separate evidence and attribution questions.
    #[default]
    Detailed,
    /// 10 questions, evidence and attribution merged.
    Collapsed,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Detailed, Topology::Collapsed];

    pub fn tree(self) -> &'static dyn DecisionTree {
        match self {
            Topology::Detailed => detailed::tree(),
            Topology::Collapsed => collapsed::tree(),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Detailed => write!(f, "detailed"),
            Topology::Collapsed => write!(f, "collapsed"),
        }
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(Topology::Detailed),
            "collapsed" => Ok(Topology::Collapsed),
            other => Err(format!(
                "unknown topology '{}': expected detailed or collapsed",
                other
            )),
        }
    }
}

/// Outcome of a single edge lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Ask(QuestionId),
    Classify(Classification),
    /// Outcome depends on previously recorded attribution answers.
    Resolve(Rule),
}

/// History-dependent steps shared by both topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The evidence was confirmed as the cause of death.
    CauseConfirmed,
    /// The evidence was not (or not clearly) the cause of death.
    CauseUnconfirmed,
    /// No other clear cause of death could be identified.
    NoOtherCause,
}

/// A complete tree definition.
pub trait DecisionTree: Send + Sync {
    fn topology(&self) -> Topology;

    fn registry(&self) -> &QuestionRegistry;

    /// The question every traversal starts from.
    fn entry(&self) -> QuestionId {
        QuestionId::InterventionDeath
    }

    /// Static edge table. `None` means the pair is not part of the tree.
    fn edge(&self, question: QuestionId, answer: Answer) -> Option<Edge>;

    /// Evaluate a history-dependent rule against the recorded answers.
    fn resolve(&self, rule: Rule, answers: &AnswerSet) -> Position;

    /// Compute the next position. `answers` must already contain `answer`
    /// for `question`. Pure: reads `answers`, never mutates anything.
    fn transition(
        &self,
        question: QuestionId,
        answer: Answer,
        answers: &AnswerSet,
    ) -> Result<Position, EngineError> {
        let registry = self.registry();
        if !registry.lookup(question)?.permits(answer) {
            return Err(EngineError::InvalidAnswerForQuestion { question, answer });
        }
        let edge = self
            .edge(question, answer)
            .ok_or(EngineError::InvalidAnswerForQuestion { question, answer })?;
        let next = match edge {
            Edge::Ask(target) => Position::AtQuestion(target),
            Edge::Classify(classification) => Position::AtClassification(classification),
            Edge::Resolve(rule) => self.resolve(rule, answers),
        };
        if let Position::AtQuestion(target) = next {
            if !registry.contains(target) {
                error!(
                    topology = %self.topology(),
                    from = %question,
                    target = %target,
                    "Tree targets a question missing from its registry"
                );
                return Err(EngineError::UnknownQuestion { question: target });
            }
        }
        Ok(next)
    }
}

/// Position for a rule outcome that asks a further question.
fn ask(question: QuestionId) -> Position {
    Position::AtQuestion(question)
}

/// Position for a rule outcome that terminates.
fn classify(classification: Classification) -> Position {
    Position::AtClassification(classification)
}
