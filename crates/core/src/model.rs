//! Interview Domain Model
//!
//! The value types shared by the session controller and the evaluation
//! service client: the session configuration, the generated question and the
//! scored feedback for an answer.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Highest score the evaluation service may award.
pub const MAX_SCORE: u8 = 10;

/// The job role the candidate is practising for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "SDE")]
    Sde,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "SDET")]
    Sdet,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Sde, Role::DataAnalyst, Role::Sdet];

    /// The name the evaluation service expects on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sde => "SDE",
            Role::DataAnalyst => "Data Analyst",
            Role::Sdet => "SDET",
        }
    }

    /// A longer, human readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Sde => "Software Development Engineer (SDE)",
            Role::DataAnalyst => "Data Analyst",
            Role::Sdet => "Software Development Engineer in Test (SDET)",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}' (expected one of: SDE, Data Analyst, SDET)")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "sde" => Ok(Role::Sde),
            "dataanalyst" => Ok(Role::DataAnalyst),
            "sdet" => Ok(Role::Sdet),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// How hard the generated question should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown difficulty '{0}' (expected one of: Easy, Medium, Hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// The role and difficulty chosen before an interview starts.
///
/// Both fields have defaults, so a config is always valid for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub role: Role,
    pub difficulty: Difficulty,
}

impl SessionConfig {
    pub fn new(role: Role, difficulty: Difficulty) -> Self {
        Self { role, difficulty }
    }
}

/// A generated interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub context: Option<String>,
    /// Points the service expects a strong answer to cover. Often empty.
    pub expected_key_points: Vec<String>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            expected_key_points: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// The scored evaluation of one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Always within `0..=MAX_SCORE`.
    pub score: u8,
    pub feedback_text: String,
    pub missing_key_points: Vec<String>,
    pub model_answer: String,
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Sde).unwrap(), "\"SDE\"");
        assert_eq!(
            serde_json::to_string(&Role::DataAnalyst).unwrap(),
            "\"Data Analyst\""
        );
        assert_eq!(serde_json::to_string(&Role::Sdet).unwrap(), "\"SDET\"");

        let role: Role = serde_json::from_str("\"Data Analyst\"").unwrap();
        assert_eq!(role, Role::DataAnalyst);
    }

    #[test]
    fn test_role_from_str_is_lenient() {
        assert_eq!("sde".parse::<Role>().unwrap(), Role::Sde);
        assert_eq!("Data Analyst".parse::<Role>().unwrap(), Role::DataAnalyst);
        assert_eq!("data-analyst".parse::<Role>().unwrap(), Role::DataAnalyst);
        assert_eq!(" SDET ".parse::<Role>().unwrap(), Role::Sdet);

        let err = "manager".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("manager".to_string()));
        assert!(err.to_string().contains("Data Analyst"));
    }

    #[test]
    fn test_difficulty_parsing_and_display() {
        for difficulty in Difficulty::ALL {
            let parsed: Difficulty = difficulty.to_string().to_uppercase().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.role, Role::Sde);
        assert_eq!(config.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_question_builder() {
        let question = Question::new("Explain hashing.").with_context("Data structures");
        assert_eq!(question.text, "Explain hashing.");
        assert_eq!(question.context.as_deref(), Some("Data structures"));
        assert!(question.expected_key_points.is_empty());
    }
}
