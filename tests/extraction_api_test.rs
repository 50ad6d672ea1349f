//! Integration tests for the generative endpoint client and extraction
//!
//! Uses a local mock server so the full HTTP path (request shape, status
//! mapping, response parsing) is exercised without the hosted model.

use mockito::Matcher;
use std::sync::Arc;
use vitalis::adapters::ai::{DocumentExtractor, GeminiClient, GenerativeModel};
use vitalis::config::AiConfig;
use vitalis::domain::{AiError, UserId, VitalError};

fn config(base_url: &str) -> AiConfig {
    let mut config: AiConfig = toml::from_str("api_key = \"test-key\"").unwrap();
    config.base_url = base_url.to_string();
    // Keep failure tests fast: one attempt, no backoff sleeps.
    config.retry.max_retries = 1;
    config
}

fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}}
        ]
    })
    .to_string()
}

fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

#[tokio::test]
async fn generate_sends_prompt_and_returns_candidate_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJsonString(
            r#"{"contents": [{"parts": [{"text": "hello"}]}]}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body("world"))
        .create_async()
        .await;

    let client = GeminiClient::new(config(&server.url())).unwrap();
    let text = client.generate("hello", None).await.unwrap();

    assert_eq!(text, "world");
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("API key not valid")
        .create_async()
        .await;

    let client = GeminiClient::new(config(&server.url())).unwrap();
    let err = client.generate("hello", None).await.unwrap_err();

    assert!(matches!(
        err,
        VitalError::Ai(AiError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn empty_candidates_map_to_empty_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(config(&server.url())).unwrap();
    let err = client.generate("hello", None).await.unwrap_err();

    assert!(matches!(err, VitalError::Ai(AiError::EmptyResponse)));
}

#[tokio::test]
async fn extraction_over_http_cleans_the_fenced_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        // The document goes out as a base64 inlineData part.
        .match_body(Matcher::PartialJsonString(
            r#"{"contents": [{"parts": [{}, {"inlineData": {"mimeType": "image/jpeg"}}]}]}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(
            "```json\n{\"bloodPressureSystolic\": 150, \"bloodPressureDiastolic\": 95, \"heartRate\": \"0\"}\n```",
        ))
        .create_async()
        .await;

    let client = Arc::new(GeminiClient::new(config(&server.url())).unwrap());
    let extractor = DocumentExtractor::new(client);

    let record = extractor
        .extract(user(), b"jpeg-bytes", "image/jpeg")
        .await
        .unwrap()
        .expect("vitals should be extracted");

    assert_eq!(record.blood_pressure_systolic, Some(150));
    assert_eq!(record.blood_pressure_diastolic, Some(95));
    // Zero readings are treated as absent.
    assert_eq!(record.heart_rate, None);
}

#[tokio::test]
async fn prose_response_is_a_format_error_not_a_transport_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(
            "This appears to be a lab report; I could not find vital signs.",
        ))
        .create_async()
        .await;

    let client = Arc::new(GeminiClient::new(config(&server.url())).unwrap());
    let extractor = DocumentExtractor::new(client);

    let err = extractor
        .extract(user(), b"jpeg-bytes", "image/jpeg")
        .await
        .unwrap_err();

    assert!(matches!(err, VitalError::ExtractionFormat(_)));
}

#[tokio::test]
async fn insights_pass_prose_through_untouched() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-1.5-flash:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(
            "Your readings look steady this week. Keep it up!",
        ))
        .create_async()
        .await;

    let client = GeminiClient::new(config(&server.url())).unwrap();
    let history = vec![vitalis::domain::VitalRecord::builder(user())
        .heart_rate(72)
        .build()];

    let text = vitalis::core::insights::narrative(&client, &history)
        .await
        .unwrap();
    assert!(text.contains("steady this week"));
}
