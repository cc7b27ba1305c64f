//! # lcdeath Core
//!
//! Decision-tree engine for classifying a decedent's cause of death with
//! respect to lung cancer, following the adjudication algorithm of
//! Horeweg et al. (Lung Cancer 77.3, 2012).
//! Provides the question registries, the pure transition function for each
//! tree topology, the undoable engine controller, per-session ownership and
//! configuration.

pub mod answers;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod registry;
pub mod report;
pub mod session;
pub mod tree;
pub mod types;

// Re-export commonly used types at the crate root.
pub use answers::{AnswerSet, AttributionSummary};
pub use config::{
    ClassifierConfig, EmptyHistoryPolicy, EngineConfig, UiConfig, config_exists, load_config,
    load_validated,
};
pub use engine::Engine;
pub use error::{ConfigError, EngineError, LcdError, Result};
pub use history::History;
pub use registry::{Question, QuestionId, QuestionRegistry};
pub use report::{PathStep, SessionReport};
pub use session::{SessionId, SessionRegistry};
pub use tree::{DecisionTree, Edge, Rule, Topology};
pub use types::{Answer, Classification, HistoryEntry, Position, VOCABULARY_VERSION};
