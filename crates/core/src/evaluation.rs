//! Evaluation Service Client
//!
//! This module defines the contract for the remote service that generates
//! interview questions and evaluates answers, along with an HTTP
//! implementation of it. Every expected failure comes back as a
//! [`RequestError`]; nothing here retries.

use crate::{
    error::RequestError,
    model::{Feedback, Question, SessionConfig},
    protocol::{
        EVALUATE_ANSWER_PATH, EvaluateAnswerRequest, EvaluateAnswerResponse,
        GENERATE_QUESTION_PATH, GenerateQuestionRequest, GenerateQuestionResponse,
    },
};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

/// Address used when no endpoint is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Defines the contract for any service that can produce and grade questions.
///
/// Both operations are idempotent, so a caller may safely retry them. The
/// implementations themselves never do.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationService: Send + Sync {
    /// Generates a question for the given role and difficulty.
    async fn generate_question(&self, config: &SessionConfig) -> Result<Question, RequestError>;

    /// Scores `answer` against `question`.
    ///
    /// # Arguments
    ///
    /// * `question` - The question the answer responds to.
    /// * `config` - The role and difficulty the question was generated for.
    /// * `answer` - The candidate's free-text answer.
    async fn evaluate_answer(
        &self,
        question: &Question,
        config: &SessionConfig,
        answer: &str,
    ) -> Result<Feedback, RequestError>;
}

/// An implementation of `EvaluationService` that talks JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpEvaluationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEvaluationClient {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Sending request to evaluation service");

        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        // A failure while reading the body is a transport error; only bad
        // JSON is malformed.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| RequestError::MalformedBody(e.to_string()))
    }
}

impl Default for HttpEvaluationClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl EvaluationService for HttpEvaluationClient {
    async fn generate_question(&self, config: &SessionConfig) -> Result<Question, RequestError> {
        let body = GenerateQuestionRequest {
            role: config.role,
            difficulty: config.difficulty,
        };
        let response: GenerateQuestionResponse =
            self.post_json(GENERATE_QUESTION_PATH, &body).await?;

        info!(role = %config.role, difficulty = %config.difficulty, "Question generated");
        Ok(response.into())
    }

    async fn evaluate_answer(
        &self,
        question: &Question,
        config: &SessionConfig,
        answer: &str,
    ) -> Result<Feedback, RequestError> {
        let body = EvaluateAnswerRequest {
            question: &question.text,
            role: config.role,
            difficulty: config.difficulty,
            user_answer: answer,
        };
        let response: EvaluateAnswerResponse = self.post_json(EVALUATE_ANSWER_PATH, &body).await?;
        let feedback = Feedback::try_from(response)?;

        info!(score = feedback.score, "Answer evaluated");
        Ok(feedback)
    }
}
