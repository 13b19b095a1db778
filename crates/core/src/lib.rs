//! Interview Coach Core
//!
//! The client-side logic of a mock interview: domain types, the request
//! contract with the question/evaluation service and the session state
//! machine that sequences a `config -> question -> feedback` cycle.

pub mod error;
pub mod evaluation;
pub mod model;
pub mod protocol;
pub mod session;

pub use error::{Action, RequestError, SessionError};
pub use evaluation::{DEFAULT_BASE_URL, EvaluationService, HttpEvaluationClient};
pub use model::{Difficulty, Feedback, MAX_SCORE, Question, Role, SessionConfig};
pub use session::{Phase, SessionController, SessionState, Transition};
