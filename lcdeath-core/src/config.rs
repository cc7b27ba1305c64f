//! Configuration system for lcdeath.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> CLI args.
//! Configuration is loaded from `~/.config/lcdeath/config.toml` and/or `.lcdeath/config.toml`
//! in the workspace directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::tree::Topology;

/// Name of the workspace-local configuration directory.
pub const WORKSPACE_DIR: &str = ".lcdeath";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl ClassifierConfig {
    /// Return human-readable problems with the configuration; empty when valid.
    pub fn validate(&self) -> Vec<String> {
        self.ui.validate()
    }
}

/// What `go_back` does when there is nothing to undo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHistoryPolicy {
    /// Fail with `EngineError::EmptyHistory`.
    #[default]
    Reject,
    /// Leave the engine untouched and report success.
    Ignore,
}

/// Engine behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Which tree definition new sessions walk.
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub empty_history: EmptyHistoryPolicy,
}

/// Terminal questionnaire settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Print the decision path after every answer.
    #[serde(default = "default_true")]
    pub show_path: bool,
    /// Ask before discarding answers on "Start over".
    #[serde(default)]
    pub confirm_reset: bool,
    /// Prompt theme: "colorful" or "simple".
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "colorful".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_path: true,
            confirm_reset: false,
            theme: default_theme(),
        }
    }
}

impl UiConfig {
    pub const THEMES: [&'static str; 2] = ["colorful", "simple"];

    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !Self::THEMES.contains(&self.theme.as_str()) {
            problems.push(format!(
                "ui.theme '{}' is not one of: {}",
                self.theme,
                Self::THEMES.join(", ")
            ));
        }
        problems
    }
}

/// User-level configuration file path, if a home directory can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "lcdeath", "lcdeath")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Workspace-level configuration file path.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(WORKSPACE_DIR).join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `LCDEATH_`)
/// 3. Workspace-local config (`.lcdeath/config.toml`)
/// 4. User config (`~/.config/lcdeath/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&ClassifierConfig>,
) -> Result<ClassifierConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(ClassifierConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // LCDEATH_ENGINE__TOPOLOGY, LCDEATH_UI__SHOW_PATH, etc.
    figment = figment.merge(Env::prefixed("LCDEATH_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

/// Load configuration and reject it if `validate` reports any problem.
pub fn load_validated(
    workspace: Option<&Path>,
    overrides: Option<&ClassifierConfig>,
) -> Result<ClassifierConfig, ConfigError> {
    let config = load_config(workspace, overrides).map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })?;
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(ConfigError::Invalid {
            message: problems.join("; "),
        });
    }
    Ok(config)
}

/// Check whether any configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}
