use coach_core::{HttpEvaluationClient, SessionConfig, SessionController};
use coach_service::app::TerminalApp;
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

async fn run_session(base_url: String, input: &str) -> String {
    let controller = SessionController::new(
        Arc::new(HttpEvaluationClient::new(base_url)),
        SessionConfig::default(),
    );
    let mut output = Vec::new();
    TerminalApp::new(&controller, input.as_bytes(), &mut output)
        .run()
        .await
        .expect("session should end cleanly");
    String::from_utf8(output).expect("output should be utf-8")
}

#[tokio::test]
async fn test_full_interview_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-question"))
        .and(body_json(json!({"role": "SDET", "difficulty": "Hard"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "How do you handle flaky tests?",
            "context": "Test automation"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/evaluate-answer"))
        .and(body_json(json!({
            "question": "How do you handle flaky tests?",
            "role": "SDET",
            "difficulty": "Hard",
            "user_answer": "Quarantine them first.\nThen find the race."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 7,
            "feedback": "Good start",
            "missing_key_points": ["retry budgets"],
            "model_answer": "Track, quarantine, fix.",
            "tips": ["Be concise but thorough"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = "role sdet\n\
                 difficulty hard\n\
                 start\n\
                 Quarantine them first.\n\
                 Then find the race.\n\
                 \n\
                 settings\n\
                 quit\n";
    let output = run_session(server.uri(), input).await;

    assert!(output.contains("Generating interview question..."));
    assert!(output.contains("[SDET] [Hard]"));
    assert!(output.contains("How do you handle flaky tests?"));
    assert!(output.contains("Context: Test automation"));
    assert!(output.contains("Analyzing answer..."));
    assert!(output.contains("Score: 7/10"));
    assert!(output.contains("  - retry budgets"));
    assert!(output.contains("Track, quarantine, fix."));
    assert!(output.contains("  - Be concise but thorough"));
    assert!(output.trim_end().ends_with("Goodbye!"));

    // After "settings" the config screen is shown again with the same choices.
    let after_reset = output.rsplit("Score: 7/10").next().unwrap();
    assert!(after_reset.contains("Difficulty level: Hard"));
}

#[tokio::test]
async fn test_failed_evaluation_can_be_resubmitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-question"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"question": "What is a deadlock?"})),
        )
        .mount(&server)
        .await;
    let expected_body = json!({
        "question": "What is a deadlock?",
        "role": "SDE",
        "difficulty": "Medium",
        "user_answer": "Two threads wait on each other."
    });
    Mock::given(method("POST"))
        .and(path("/evaluate-answer"))
        .and(body_json(expected_body.clone()))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/evaluate-answer"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 9,
            "feedback": "Precise",
            "missing_key_points": [],
            "model_answer": "A cycle of waits."
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The blank line after the failure resubmits the kept answer.
    let input = "start\nTwo threads wait on each other.\n\n\nquit\n";
    let output = run_session(server.uri(), input).await;

    assert!(output.contains(
        "! Failed to evaluate answer: Evaluation service responded with status 500"
    ));
    assert!(output.contains("resubmits your previous answer"));
    assert!(output.contains("Score: 9/10"));
    assert!(!output.contains("Missing key points"));
}

#[tokio::test]
async fn test_unreachable_service_reports_error_and_stays_on_config() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let output = run_session(format!("http://{}", addr), "start\nquit\n").await;

    assert!(output.contains("! Failed to generate question: Could not reach the evaluation service"));
    assert!(output.contains("reachable?"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn test_empty_answer_is_not_submitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-question"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"question": "What is a thread?"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/evaluate-answer"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_session(server.uri(), "start\n\n:quit\n").await;

    assert!(output.contains("Answer cannot be empty."));
    assert!(output.trim_end().ends_with("Goodbye!"));
}
