//! Serializable transcript of a classification session.

use crate::engine::Engine;
use crate::registry::QuestionId;
use crate::tree::Topology;
use crate::types::{Answer, Classification, VOCABULARY_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answered question in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub question: QuestionId,
    pub prompt: String,
    pub answer: Answer,
}

/// Snapshot of a session: the decision path and, if reached, its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub topology: Topology,
    pub vocabulary: String,
    pub generated_at: DateTime<Utc>,
    pub path: Vec<PathStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_question: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SessionReport {
    pub fn from_engine(engine: &Engine) -> Self {
        let classification = engine.classification();
        Self {
            topology: engine.topology(),
            vocabulary: VOCABULARY_VERSION.to_string(),
            generated_at: Utc::now(),
            path: engine
                .answered_path()
                .into_iter()
                .map(|(question, answer)| PathStep {
                    question: question.id,
                    prompt: question.prompt.to_string(),
                    answer,
                })
                .collect(),
            pending_question: engine.position().question(),
            classification,
            description: classification.map(|c| c.description().to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.classification.is_some()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
