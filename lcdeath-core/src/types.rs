//! Core value types for the classification engine.
//!
//! Answers, terminal classifications, engine positions and history entries.
//! All of them are small `Copy` values that serialize in the snake_case
//! vocabulary used by reports and configuration.

use crate::registry::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version tag of the classification vocabulary exposed to renderers.
pub const VOCABULARY_VERSION: &str = "horeweg-2012/1";

/// A clinician's answer to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Doubt,
    NotEnoughInformation,
    Unanswered,
}

impl Answer {
    /// The four answers a user can actually give.
    pub const GIVEN: [Answer; 4] = [
        Answer::Yes,
        Answer::No,
        Answer::Doubt,
        Answer::NotEnoughInformation,
    ];

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Doubt => "doubt",
            Answer::NotEnoughInformation => "not_enough_information",
            Answer::Unanswered => "unanswered",
        }
    }

    /// Display text for an answer button or path entry.
    pub fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Doubt => "Doubt",
            Answer::NotEnoughInformation => "Not enough information available",
            Answer::Unanswered => "",
        }
    }

    pub fn is_answered(self) -> bool {
        self != Answer::Unanswered
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Answer {
    type Err = String;

    /// Parses user input. `Unanswered` is deliberately not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            "doubt" | "d" => Ok(Answer::Doubt),
            "not_enough_information" | "nei" | "insufficient" => {
                Ok(Answer::NotEnoughInformation)
            }
            other => Err(format!(
                "unknown answer '{}': expected yes, no, doubt or not_enough_information",
                other
            )),
        }
    }
}

/// Terminal classification of a death with respect to lung cancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    DefinitelyLcDeath,
    ProbableLcDeath,
    PossibleLcDeath,
    UnlikelyLcDeath,
    DefinitelyNoLcDeath,
    IntercurrentCodLcContributory,
    /// Only reachable in the collapsed topology.
    NotEnoughInformation,
}

impl Classification {
    pub const ALL: [Classification; 7] = [
        Classification::DefinitelyLcDeath,
        Classification::ProbableLcDeath,
        Classification::PossibleLcDeath,
        Classification::UnlikelyLcDeath,
        Classification::DefinitelyNoLcDeath,
        Classification::IntercurrentCodLcContributory,
        Classification::NotEnoughInformation,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Classification::DefinitelyLcDeath => "definitely_lc_death",
            Classification::ProbableLcDeath => "probable_lc_death",
            Classification::PossibleLcDeath => "possible_lc_death",
            Classification::UnlikelyLcDeath => "unlikely_lc_death",
            Classification::DefinitelyNoLcDeath => "definitely_no_lc_death",
            Classification::IntercurrentCodLcContributory => "intercurrent_cod_lc_contributory",
            Classification::NotEnoughInformation => "not_enough_information",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Classification::DefinitelyLcDeath => "Definitely LC death",
            Classification::ProbableLcDeath => "Probable LC death",
            Classification::PossibleLcDeath => "Possible LC death",
            Classification::UnlikelyLcDeath => "Unlikely LC death",
            Classification::DefinitelyNoLcDeath => "Definitely no LC death",
            Classification::IntercurrentCodLcContributory => "Intercurrent CoD, LC contributory",
            Classification::NotEnoughInformation => "Not enough information",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a traversal currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Position {
    AtQuestion(QuestionId),
    AtClassification(Classification),
}

impl Position {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Position::AtClassification(_))
    }

    pub fn question(&self) -> Option<QuestionId> {
        match self {
            Position::AtQuestion(id) => Some(*id),
            Position::AtClassification(_) => None,
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            Position::AtQuestion(_) => None,
            Position::AtClassification(c) => Some(*c),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::AtQuestion(id) => write!(f, "question:{}", id),
            Position::AtClassification(c) => write!(f, "classification:{}", c),
        }
    }
}

/// One answered step of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: QuestionId,
    pub answer: Answer,
}

impl HistoryEntry {
    pub fn new(question: QuestionId, answer: Answer) -> Self {
        Self { question, answer }
    }
}
