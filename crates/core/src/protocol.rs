//! Defines the JSON request/response bodies exchanged with the evaluation service.

use crate::{
    error::RequestError,
    model::{Difficulty, Feedback, MAX_SCORE, Question, Role},
};
use serde::{Deserialize, Serialize};

pub const GENERATE_QUESTION_PATH: &str = "/generate-question";
pub const EVALUATE_ANSWER_PATH: &str = "/evaluate-answer";

/// Body of `POST /generate-question`.
#[derive(Serialize, Debug)]
pub struct GenerateQuestionRequest {
    pub role: Role,
    pub difficulty: Difficulty,
}

/// Success body of `POST /generate-question`.
#[derive(Deserialize, Debug)]
pub struct GenerateQuestionResponse {
    pub question: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub expected_key_points: Option<Vec<String>>,
}

impl From<GenerateQuestionResponse> for Question {
    fn from(response: GenerateQuestionResponse) -> Self {
        Question {
            text: response.question,
            context: response.context,
            expected_key_points: response.expected_key_points.unwrap_or_default(),
        }
    }
}

/// Body of `POST /evaluate-answer`.
#[derive(Serialize, Debug)]
pub struct EvaluateAnswerRequest<'a> {
    pub question: &'a str,
    pub role: Role,
    pub difficulty: Difficulty,
    pub user_answer: &'a str,
}

/// Success body of `POST /evaluate-answer`.
#[derive(Deserialize, Debug)]
pub struct EvaluateAnswerResponse {
    pub score: i64,
    pub feedback: String,
    pub model_answer: String,
    #[serde(default)]
    pub missing_key_points: Option<Vec<String>>,
    #[serde(default)]
    pub tips: Option<Vec<String>>,
}

impl TryFrom<EvaluateAnswerResponse> for Feedback {
    type Error = RequestError;

    fn try_from(response: EvaluateAnswerResponse) -> Result<Self, Self::Error> {
        let score = u8::try_from(response.score)
            .ok()
            .filter(|score| *score <= MAX_SCORE)
            .ok_or_else(|| {
                RequestError::MalformedBody(format!(
                    "score {} is outside 0..={}",
                    response.score, MAX_SCORE
                ))
            })?;

        Ok(Feedback {
            score,
            feedback_text: response.feedback,
            missing_key_points: response.missing_key_points.unwrap_or_default(),
            model_answer: response.model_answer,
            tips: response.tips.unwrap_or_default(),
        })
    }
}
