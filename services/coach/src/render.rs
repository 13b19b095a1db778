//! Text rendering of the session state for the terminal.
//!
//! Every function returns a `String` so the screens can be asserted on
//! without a terminal.

use coach_core::{Action, Feedback, MAX_SCORE, Phase, Question, Role, SessionError, SessionState};

const RULE: &str = "------------------------------------------------------------";

/// Renders the screen for the current phase, followed by any error.
pub fn screen(state: &SessionState) -> String {
    let mut out = match state.phase {
        Phase::Config => config_screen(state),
        Phase::Question => question_screen(state),
        Phase::Feedback => feedback_screen(state),
    };
    if let Some(error) = &state.last_error {
        out.push_str(&error_line(error));
    }
    out
}

/// The line shown while a request is outstanding.
pub fn busy(action: Action) -> &'static str {
    match action {
        Action::GenerateQuestion => "Generating interview question...",
        Action::EvaluateAnswer => "Analyzing answer...",
    }
}

pub fn error_line(error: &SessionError) -> String {
    let mut line = format!("! {}\n", error);
    if error.error.is_network() {
        line.push_str("! Is the evaluation service running and reachable?\n");
    }
    line
}

fn config_screen(state: &SessionState) -> String {
    let roles: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
    format!(
        "{rule}\nAI Interview Coach\n{rule}\n\
         Target role:      {role}\n\
         Difficulty level: {difficulty}\n\
         \nCommands: role <{roles}>, difficulty <Easy|Medium|Hard>, start, quit\n",
        rule = RULE,
        role = state.config.role.title(),
        difficulty = state.config.difficulty,
        roles = roles.join("|"),
    )
}

fn question_screen(state: &SessionState) -> String {
    let mut out = format!(
        "{}\n[{}] [{}]\n",
        RULE, state.config.role, state.config.difficulty
    );
    if let Some(question) = &state.question {
        out.push_str(&question_block(question));
    }
    out.push_str("\nType your answer. Finish with an empty line, or enter :quit to leave.\n");
    if !state.answer.trim().is_empty() {
        out.push_str("(An empty line on its own resubmits your previous answer.)\n");
    }
    out
}

fn question_block(question: &Question) -> String {
    let mut out = format!("\n{}\n", question.text);
    if let Some(context) = &question.context {
        out.push_str(&format!("\nContext: {}\n", context));
    }
    out
}

fn feedback_screen(state: &SessionState) -> String {
    let body = match &state.feedback {
        Some(feedback) => feedback_block(feedback),
        None => "No question loaded.\n".to_string(),
    };
    format!("{}\n{}\nCommands: next, settings, quit\n", RULE, body)
}

fn feedback_block(feedback: &Feedback) -> String {
    let mut out = format!(
        "Score: {}/{}\n\nFeedback\n  {}\n",
        feedback.score, MAX_SCORE, feedback.feedback_text
    );
    out.push_str(&bullet_section("Missing key points", &feedback.missing_key_points));
    out.push_str(&format!("\nModel answer\n  {}\n", feedback.model_answer));
    out.push_str(&bullet_section("Tips", &feedback.tips));
    out
}

/// A titled list, or nothing at all when `items` is empty.
fn bullet_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("\n{}\n", title);
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
    out
}
