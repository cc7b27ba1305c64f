//! CLI subcommand handlers.

use crate::{Commands, ConfigAction};
use lcdeath_core::config::{WORKSPACE_DIR, workspace_config_path};
use lcdeath_core::{Answer, ClassifierConfig, Engine, HistoryEntry, QuestionId, Topology};
use std::path::Path;

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    config: &ClassifierConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match command {
        Commands::Classify { steps, json } => handle_classify(&steps, json, config),
        Commands::Questions => handle_questions(config.engine.topology),
        Commands::Config { action } => handle_config(action, config, workspace),
    }
}

/// Parse a `question=answer` pair.
pub fn parse_step(raw: &str) -> anyhow::Result<HistoryEntry> {
    let (question, answer) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected question=answer, got '{}'", raw))?;
    let question: QuestionId = question.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let answer: Answer = answer.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    Ok(HistoryEntry::new(question, answer))
}

/// Run scripted answers through a fresh engine.
pub fn classify(steps: &[String], config: &ClassifierConfig) -> anyhow::Result<Engine> {
    let entries = steps
        .iter()
        .map(|raw| parse_step(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let engine = Engine::replay(config.engine.topology, entries)?
        .with_empty_history_policy(config.engine.empty_history);
    Ok(engine)
}

fn handle_classify(steps: &[String], json: bool, config: &ClassifierConfig) -> anyhow::Result<()> {
    let engine = classify(steps, config)?;

    if json {
        println!("{}", engine.report().to_json_pretty()?);
        return Ok(());
    }

    match (engine.classification(), engine.current_question()) {
        (Some(classification), _) => {
            println!("{} ({})", classification.description(), classification.code());
        }
        (None, Some(question)) => {
            println!("Not yet classified. Next question: {}", question.id);
            println!("  {}", question.prompt);
            let options: Vec<&str> = question.options.iter().map(|a| a.code()).collect();
            println!("  options: {}", options.join(", "));
        }
        (None, None) => {}
    }
    Ok(())
}

fn handle_questions(topology: Topology) -> anyhow::Result<()> {
    let registry = topology.tree().registry();
    println!("{} topology ({} questions):", topology, registry.len());
    for question in registry.questions() {
        let options: Vec<&str> = question.options.iter().map(|a| a.code()).collect();
        println!("  {:<26} {}", question.id.as_str(), question.prompt);
        println!("  {:<26} [{}]", "", options.join(", "));
    }
    Ok(())
}

fn handle_config(
    action: ConfigAction,
    config: &ClassifierConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = workspace_config_path(workspace);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            std::fs::create_dir_all(workspace.join(WORKSPACE_DIR))?;
            let toml_str = toml::to_string_pretty(&ClassifierConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}
