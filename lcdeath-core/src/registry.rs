//! Question registry: identifiers, prompt text and permitted answers.
//!
//! A registry is built once per topology and never changes afterwards.
//! Lookups of identifiers outside the registry fail with
//! [`EngineError::UnknownQuestion`].

use crate::error::EngineError;
use crate::types::Answer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of every question used by either tree topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuestionId {
    #[serde(rename = "interventionDeath")]
    InterventionDeath,
    #[serde(rename = "interventionForLC")]
    InterventionForLc,
    #[serde(rename = "metastasisEvidence")]
    MetastasisEvidence,
    #[serde(rename = "metastasisLC")]
    MetastasisLc,
    #[serde(rename = "tumourEvidence")]
    TumourEvidence,
    #[serde(rename = "tumourLC")]
    TumourLc,
    #[serde(rename = "paraneoplasticEvidence")]
    ParaneoplasticEvidence,
    #[serde(rename = "paraneoplasticLC")]
    ParaneoplasticLc,
    #[serde(rename = "clearCauseOtherThanLC")]
    ClearCauseOtherThanLc,
    #[serde(rename = "wasThisCoD")]
    WasThisCod,
    #[serde(rename = "otherCoDPresent")]
    OtherCodPresent,
    #[serde(rename = "otherCoDPresent3")]
    OtherCodPresent3,
    #[serde(rename = "otherCoDPresent4")]
    OtherCodPresent4,
    #[serde(rename = "otherCoDDirectResultOfLC")]
    OtherCodDirectResultOfLc,
    #[serde(rename = "lcContributingFactor")]
    LcContributingFactor,
}

impl QuestionId {
    pub const ALL: [QuestionId; 15] = [
        QuestionId::InterventionDeath,
        QuestionId::InterventionForLc,
        QuestionId::MetastasisEvidence,
        QuestionId::MetastasisLc,
        QuestionId::TumourEvidence,
        QuestionId::TumourLc,
        QuestionId::ParaneoplasticEvidence,
        QuestionId::ParaneoplasticLc,
        QuestionId::ClearCauseOtherThanLc,
        QuestionId::WasThisCod,
        QuestionId::OtherCodPresent,
        QuestionId::OtherCodPresent3,
        QuestionId::OtherCodPresent4,
        QuestionId::OtherCodDirectResultOfLc,
        QuestionId::LcContributingFactor,
    ];

    /// The identifier as spelled in reports and scripted input.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionId::InterventionDeath => "interventionDeath",
            QuestionId::InterventionForLc => "interventionForLC",
            QuestionId::MetastasisEvidence => "metastasisEvidence",
            QuestionId::MetastasisLc => "metastasisLC",
            QuestionId::TumourEvidence => "tumourEvidence",
            QuestionId::TumourLc => "tumourLC",
            QuestionId::ParaneoplasticEvidence => "paraneoplasticEvidence",
            QuestionId::ParaneoplasticLc => "paraneoplasticLC",
            QuestionId::ClearCauseOtherThanLc => "clearCauseOtherThanLC",
            QuestionId::WasThisCod => "wasThisCoD",
            QuestionId::OtherCodPresent => "otherCoDPresent",
            QuestionId::OtherCodPresent3 => "otherCoDPresent3",
            QuestionId::OtherCodPresent4 => "otherCoDPresent4",
            QuestionId::OtherCodDirectResultOfLc => "otherCoDDirectResultOfLC",
            QuestionId::LcContributingFactor => "lcContributingFactor",
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = String;

    /// Case-insensitive, so `wasthiscod` and `wasThisCoD` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        QuestionId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown question identifier '{}'", needle))
    }
}

/// Answer sets shared by most questions.
pub const ALL_OPTIONS: &[Answer] = &Answer::GIVEN;
pub const YES_NO: &[Answer] = &[Answer::Yes, Answer::No];

/// A single question as presented to the clinician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: &'static [Answer],
}

impl Question {
    pub const fn new(id: QuestionId, prompt: &'static str, options: &'static [Answer]) -> Self {
        Self {
            id,
            prompt,
            options,
        }
    }

    pub fn permits(&self, answer: Answer) -> bool {
        self.options.contains(&answer)
    }

    /// Prompt without the trailing question mark and numbering, for path summaries.
    pub fn short_prompt(&self) -> &'static str {
        let text = self.prompt.split('?').next().unwrap_or(self.prompt);
        match text.split_once(". ") {
            Some((num, rest)) if num.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => text,
        }
    }
}

/// Immutable lookup table from identifier to question, in definition order.
#[derive(Debug, Clone)]
pub struct QuestionRegistry {
    questions: Vec<Question>,
}

impl QuestionRegistry {
    /// Build a registry. Duplicate identifiers keep the first definition.
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut unique: Vec<Question> = Vec::new();
        for q in questions {
            if !unique.iter().any(|existing| existing.id == q.id) {
                unique.push(q);
            }
        }
        Self { questions: unique }
    }

    pub fn lookup(&self, id: QuestionId) -> Result<&Question, EngineError> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or(EngineError::UnknownQuestion { question: id })
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|q| q.id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuestionRegistry {
        QuestionRegistry::new([
            Question::new(
                QuestionId::InterventionDeath,
                "1. Death as a result of an intervention?",
                YES_NO,
            ),
            Question::new(
                QuestionId::LcContributingFactor,
                "Lung cancer contributing factor?",
                ALL_OPTIONS,
            ),
        ])
    }

    #[test]
    fn test_lookup_known_question() {
        let registry = sample();
        let q = registry.lookup(QuestionId::InterventionDeath).unwrap();
        assert!(q.permits(Answer::Yes));
        assert!(!q.permits(Answer::Doubt));
        assert!(!q.permits(Answer::Unanswered));
    }

    #[test]
    fn test_lookup_unknown_question() {
        let registry = sample();
        let err = registry.lookup(QuestionId::WasThisCod).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownQuestion {
                question: QuestionId::WasThisCod
            }
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = QuestionRegistry::new([
            Question::new(QuestionId::WasThisCod, "first?", YES_NO),
            Question::new(QuestionId::WasThisCod, "second?", ALL_OPTIONS),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup(QuestionId::WasThisCod).unwrap().prompt,
            "first?"
        );
    }

    #[test]
    fn test_question_id_round_trips_through_str() {
        for id in QuestionId::ALL {
            assert_eq!(id.as_str().parse::<QuestionId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert_eq!(
            "WASTHISCOD".parse::<QuestionId>().unwrap(),
            QuestionId::WasThisCod
        );
        assert!("nope".parse::<QuestionId>().is_err());
    }

    #[test]
    fn test_short_prompt_strips_numbering() {
        let registry = sample();
        let q = registry.lookup(QuestionId::InterventionDeath).unwrap();
        assert_eq!(q.short_prompt(), "Death as a result of an intervention");
        let q = registry.lookup(QuestionId::LcContributingFactor).unwrap();
        assert_eq!(q.short_prompt(), "Lung cancer contributing factor");
    }
}
