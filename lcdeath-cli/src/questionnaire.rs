//! Interactive questionnaire.
//!
//! Renders the engine's current question with `dialoguer`, feeds the chosen
//! answer back, and offers undo, restart and quit. All branching lives in
//! the engine; this module only maps menu choices to engine calls.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Select};
use lcdeath_core::{Answer, ClassifierConfig, Engine};

/// A menu entry the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Answer(Answer),
    Back,
    StartOver,
    Quit,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Answer(answer) => answer.label(),
            Action::Back => "← Back",
            Action::StartOver => "Start over",
            Action::Quit => "Quit",
        }
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Menu entries for the engine's current state.
pub fn menu(engine: &Engine) -> Vec<Action> {
    let mut actions: Vec<Action> = match engine.current_question() {
        Some(question) => question.options.iter().copied().map(Action::Answer).collect(),
        None => Vec::new(),
    };
    if engine.can_go_back() {
        actions.push(Action::Back);
    }
    if engine.is_complete() {
        actions.push(Action::StartOver);
    }
    actions.push(Action::Quit);
    actions
}

/// Apply a menu action to the engine.
pub fn perform(engine: &mut Engine, action: Action) -> anyhow::Result<Flow> {
    match action {
        Action::Answer(answer) => {
            engine.apply_answer(answer)?;
        }
        Action::Back => {
            engine.go_back()?;
        }
        Action::StartOver => engine.reset(),
        Action::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}

/// One line per answered question, e.g. `Was this the cause of death? Doubt`.
pub fn format_path(engine: &Engine) -> Vec<String> {
    engine
        .answered_path()
        .into_iter()
        .map(|(question, answer)| format!("{}? {}", question.short_prompt(), answer.label()))
        .collect()
}

/// Run the questionnaire until the user quits.
pub fn run(config: &ClassifierConfig) -> anyhow::Result<()> {
    let theme: Box<dyn Theme> = match config.ui.theme.as_str() {
        "simple" => Box::new(SimpleTheme),
        _ => Box::new(ColorfulTheme::default()),
    };
    let mut engine = Engine::from_config(&config.engine);

    println!("Lung Cancer Cause of Death Classification ({} tree)\n", engine.topology());

    loop {
        if config.ui.show_path && engine.can_go_back() {
            println!("Decision path:");
            for line in format_path(&engine) {
                println!("  - {}", line);
            }
            println!();
        }

        let prompt = match (engine.current_question(), engine.classification()) {
            (Some(question), _) => question.prompt.to_string(),
            (None, Some(classification)) => {
                println!("Classification result: {}\n", classification.description());
                "What next?".to_string()
            }
            (None, None) => break,
        };

        let actions = menu(&engine);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        let action = actions[choice];

        if action == Action::StartOver && config.ui.confirm_reset {
            let confirmed = Confirm::with_theme(theme.as_ref())
                .with_prompt("Discard all answers and start over?")
                .default(false)
                .interact()?;
            if !confirmed {
                continue;
            }
        }

        if perform(&mut engine, action)? == Flow::Stop {
            break;
        }
    }
    Ok(())
}
