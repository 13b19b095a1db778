use clap::Parser;
use coach_core::{Difficulty, Role};

/// Practise technical interview questions against an AI evaluation service.
#[derive(Parser, Debug)]
#[command(name = "coach", version)]
pub struct Cli {
    /// Base URL of the evaluation service (overrides COACH_API_URL).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Role to interview for: SDE, "Data Analyst" or SDET.
    #[arg(long)]
    pub role: Option<Role>,

    /// Question difficulty: Easy, Medium or Hard.
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
}
