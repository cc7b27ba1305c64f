//! Error types for the lcdeath core library.
//!
//! Uses `thiserror` for public API error types. Engine errors are returned
//! before any state is touched, so a failed call leaves the session as it was.

use crate::registry::QuestionId;
use crate::types::{Answer, Classification};
use uuid::Uuid;

/// Top-level error type for the lcdeath core library.
#[derive(Debug, thiserror::Error)]
pub enum LcdError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the decision-tree engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Answer '{answer}' is not permitted for question '{question}'")]
    InvalidAnswerForQuestion {
        question: QuestionId,
        answer: Answer,
    },

    #[error("Nothing to undo")]
    EmptyHistory,

    /// A tree targets a question its registry does not define. This is a
    /// construction bug, never a user error.
    #[error("Unknown question: {question}")]
    UnknownQuestion { question: QuestionId },

    #[error("Classification '{classification}' already reached; go back or reset first")]
    Terminal { classification: Classification },

    #[error("Replay diverged at step {step}: answered '{question}' while at {expected}")]
    ReplayDiverged {
        step: usize,
        question: QuestionId,
        expected: String,
    },

    #[error("Unknown session: {id}")]
    UnknownSession { id: Uuid },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `LcdError`.
pub type Result<T> = std::result::Result<T, LcdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_answer() {
        let err = LcdError::Engine(EngineError::InvalidAnswerForQuestion {
            question: QuestionId::InterventionDeath,
            answer: Answer::Doubt,
        });
        assert_eq!(
            err.to_string(),
            "Engine error: Answer 'doubt' is not permitted for question 'interventionDeath'"
        );
    }

    #[test]
    fn test_error_display_terminal() {
        let err = EngineError::Terminal {
            classification: Classification::UnlikelyLcDeath,
        };
        assert_eq!(
            err.to_string(),
            "Classification 'unlikely_lc_death' already reached; go back or reset first"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = LcdError::Config(ConfigError::Invalid {
            message: "bad topology".into(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: bad topology"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LcdError = io_err.into();
        assert!(matches!(err, LcdError::Io(_)));
    }

    #[test]
    fn test_engine_error_converts() {
        let err: LcdError = EngineError::EmptyHistory.into();
        assert_eq!(err.to_string(), "Engine error: Nothing to undo");
    }
}
