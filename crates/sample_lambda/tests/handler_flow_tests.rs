use std::sync::Arc;
use std::time::Duration;

use sample_lambda::config::HandlerConfig;
use sample_lambda::handlers::lambda::{handle_event, HandlerDeps, SUCCESS_MESSAGE};
use sample_lambda::handlers::response::ApiGatewayResponse;
use serde_json::{json, Value};
use test_common_framework::logging::{Formatter, Level, LoggerRegistry, MemorySink};
use test_common_framework::retry::Sleeper;
use test_common_framework::VERSION;

struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

fn run(event: Value) -> (ApiGatewayResponse, Vec<String>) {
    let registry = LoggerRegistry::new();
    let logger = registry.get_logger("my_lambda").expect("lookup");
    let sink = Arc::new(MemorySink::new(Formatter::new("{levelname} {message}")));
    logger.add_sink(sink.clone());
    let logger = registry
        .setup_logger("my_lambda", Level::Info, None)
        .expect("setup should pass");

    let config = HandlerConfig::default();
    let deps = HandlerDeps {
        logger: &logger,
        config: &config,
        external_api: None,
        sleeper: &NoSleep,
    };
    (handle_event(event, &deps), sink.lines())
}

fn decoded_body(response: &ApiGatewayResponse) -> Value {
    serde_json::from_str(&response.body).expect("body should be JSON")
}

#[test]
fn string_body_yields_200_with_extracted_fields() {
    let (response, lines) = run(json!({
        "body": "{\"user\":{\"id\":\"u1\"},\"request\":{\"action\":\"go\"}}"
    }));

    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers, json!({"Content-Type": "application/json"}));

    let body = decoded_body(&response);
    assert_eq!(body["status_code"], json!(200));
    assert_eq!(body["message"], json!(SUCCESS_MESSAGE));
    assert_eq!(body["data"]["user_id"], json!("u1"));
    assert_eq!(body["data"]["action"], json!("go"));
    assert_eq!(body["data"]["framework_version"], json!(VERSION));
    assert!(body["data"].get("external").is_none());

    assert!(lines.contains(&"INFO Processing request for user: u1".to_string()));
    assert!(lines.contains(&"INFO Action: go".to_string()));
}

#[test]
fn empty_event_uses_defaults() {
    let (response, _) = run(json!({}));

    let body = decoded_body(&response);
    assert_eq!(response.status_code, 200);
    assert_eq!(body["data"]["user_id"], json!("anonymous"));
    assert_eq!(body["data"]["action"], json!("unknown"));
}

#[test]
fn non_string_non_mapping_body_yields_500() {
    let (response, lines) = run(json!({"body": 12345}));

    assert_eq!(response.status_code, 500);
    let body = decoded_body(&response);
    let error = body["error"].as_str().expect("error should be a string");
    assert!(!error.is_empty());
    assert!(error.contains("number"));
    assert_eq!(body["message"], json!("Internal server error"));
    assert!(lines.iter().any(|line| line.starts_with("ERROR ")));
}

#[test]
fn explicit_null_body_yields_500() {
    let (response, lines) = run(json!({"body": null}));

    assert_eq!(response.status_code, 500);
    let body = decoded_body(&response);
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("null"));
    assert_eq!(body["message"], json!("Internal server error"));
    assert!(lines.iter().any(|line| line.starts_with("ERROR ")));
}

#[test]
fn response_envelope_uses_api_gateway_field_names() {
    let (response, _) = run(json!({"body": {"user": {"id": "u2"}}}));
    let envelope = serde_json::to_value(&response).expect("envelope should serialize");

    assert_eq!(envelope["statusCode"], json!(200));
    assert!(envelope["body"].is_string());
}
