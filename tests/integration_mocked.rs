/// Integration tests with a mocked Groq endpoint
/// Exercises both email paths without hitting the real API
use rust_leadgen_api::config::Config;
use rust_leadgen_api::email_generator::{template_email, EmailGenerator, Signature};
use rust_leadgen_api::groq_client::GroqClient;
use rust_leadgen_api::insights::{generate_insight, insight_bullets};
use rust_leadgen_api::models::{EmailSource, Lead};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// Helper function to create test config
fn create_test_config(groq_base_url: String, api_key: Option<&str>) -> Config {
    Config {
        port: 8080,
        groq_api_key: api_key.map(str::to_string),
        groq_base_url,
        groq_model: "test-model".to_string(),
        llm_timeout_secs: 5,
        sender_name: "Rohith Dilip".to_string(),
        sender_company: "Wednesday Solutions".to_string(),
    }
}

fn base_url(server: &MockServer) -> String {
    format!("{}/openai/v1", server.uri())
}

fn lead() -> Lead {
    Lead::new("TechNova Solutions", "Software", "Bengaluru, IN", 120)
        .with_website("https://technova.example")
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn test_groq_success_returns_llm_email() {
    let mock_server = MockServer::start().await;

    let content = serde_json::json!({
        "company": "TechNova Solutions",
        "subject": "Scaling your AI/ML roadmap",
        "body": "Hi TechNova team, ... Warm Regards,\nRohith Dilip\nWednesday Solutions",
        "tone": "consultative",
        "wordCount": 96
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer test_key"))
        .and(body_partial_json(serde_json::json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&content)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);
    assert!(generator.has_llm());

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Groq);
    assert_eq!(email.subject, "Scaling your AI/ML roadmap");
    assert_eq!(email.word_count, Some(96));
    assert!(email.error.is_none());
}

#[tokio::test]
async fn test_groq_fenced_json_is_accepted() {
    let mock_server = MockServer::start().await;

    let content = "```json\n{\"body\": \"Hello from the model\"}\n```";

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Groq);
    assert_eq!(email.body, "Hello from the model");
    assert_eq!(email.company, "TechNova Solutions");
    assert_eq!(email.subject, "Exploring a tailored approach");
}

#[tokio::test]
async fn test_groq_server_error_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let bullets = insight_bullets(&lead);
    let email = generator.generate(&lead, &bullets).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(email.body.contains(&generate_insight(&lead)));
    let error = email.error.expect("failure should be recorded");
    assert!(error.contains("500"));
}

#[tokio::test]
async fn test_groq_auth_rejection_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"error": {"message": "Invalid API Key"}}),
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("bad_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(!email.body.is_empty());
    assert!(email.error.is_some());
}

#[tokio::test]
async fn test_groq_prose_content_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("Sure! Here's a great email for you.")),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(email
        .error
        .as_deref()
        .is_some_and(|e| e.contains("ParseError")));
}

#[tokio::test]
async fn test_groq_missing_choices_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(email.error.is_some());
}

#[tokio::test]
async fn test_groq_empty_body_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{\"subject\": \"Hi\", \"body\": \"\"}")),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(!email.body.is_empty());
}

#[tokio::test]
async fn test_groq_timeout_falls_back_to_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{\"body\": \"too late\"}"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = GroqClient::new(
        base_url(&mock_server),
        "test_key".to_string(),
        "test-model".to_string(),
        Duration::from_millis(200),
    )
    .unwrap();
    let generator = EmailGenerator::with_client(
        client,
        Signature::new("Rohith Dilip", "Wednesday Solutions"),
    );

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(email
        .error
        .as_deref()
        .is_some_and(|e| e.contains("timed out")));
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(base_url(&mock_server), None);
    let generator = EmailGenerator::from_config(&config);
    assert!(!generator.has_llm());

    let lead = lead();
    let bullets = insight_bullets(&lead);
    let email = generator.generate(&lead, &bullets).await;

    assert_eq!(email, template_email(&lead, &bullets, generator.signature()));
    assert!(email.error.is_none());
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back_to_template() {
    // Nothing listens on port 9 on the loopback interface
    let config = create_test_config("http://127.0.0.1:9/openai/v1".to_string(), Some("test_key"));
    let generator = EmailGenerator::from_config(&config);

    let lead = lead();
    let email = generator.generate(&lead, &insight_bullets(&lead)).await;

    assert_eq!(email.source, EmailSource::Template);
    assert!(email.body.contains("TechNova Solutions"));
    assert!(email
        .error
        .as_deref()
        .is_some_and(|e| e.contains("Upstream request failed")));
}
