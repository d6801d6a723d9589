use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use test_common_framework::chunk::chunk_list;
use test_common_framework::flatten::flatten_value;
use test_common_framework::json::{safe_json_dumps_or_empty, safe_json_loads, safe_json_loads_value};
use test_common_framework::logging::{Formatter, Level, LoggerRegistry, MemorySink};
use test_common_framework::nested::get_nested_value;
use test_common_framework::retry::{RetryPolicy, Sleeper};
use test_common_framework::{get_version, VERSION};

#[test]
fn version_is_exposed() {
    assert_eq!(get_version(), VERSION);
    assert_eq!(VERSION, "0.3.11");
}

#[test]
fn safe_json_round_trip_through_helpers() {
    let text = safe_json_dumps_or_empty(&json!({"key": "value"}));
    assert_eq!(text, r#"{"key":"value"}"#);
    assert_eq!(safe_json_loads(&text, Value::Null), json!({"key": "value"}));
    assert_eq!(safe_json_loads("not json", json!({})), json!({}));
    assert_eq!(safe_json_loads_value(&Value::Null, json!([])), json!([]));
}

#[test]
fn decoded_body_feeds_lookup_and_flatten() {
    let body = safe_json_loads(
        r#"{"user": {"id": "u1"}, "request": {"action": "go", "tags": ["a"]}}"#,
        json!({}),
    );

    assert_eq!(get_nested_value(&body, "user.id", json!("anonymous")), json!("u1"));
    assert_eq!(
        get_nested_value(&body, "user.email", json!("anonymous")),
        json!("anonymous")
    );

    let flat = flatten_value(&body).expect("body is an object");
    assert_eq!(flat.len(), 3);
    assert_eq!(flat.get("request.tags"), Some(&json!(["a"])));
}

#[test]
fn chunk_examples() {
    assert_eq!(
        chunk_list(&[1, 2, 3, 4, 5], 2).expect("chunking should pass"),
        vec![vec![1, 2], vec![3, 4], vec![5]]
    );
    assert!(chunk_list::<u8>(&[], 3).expect("chunking should pass").is_empty());
}

struct CountingSleeper {
    total: Cell<Duration>,
    waits: Cell<u32>,
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, duration: Duration) {
        self.total.set(self.total.get() + duration);
        self.waits.set(self.waits.get() + 1);
    }
}

#[test]
fn retry_waits_one_then_two_seconds_before_success() {
    let policy = RetryPolicy::new(3, Duration::from_secs(1), 2.0).expect("policy is valid");
    let sleeper = CountingSleeper {
        total: Cell::new(Duration::ZERO),
        waits: Cell::new(0),
    };
    let attempts = Cell::new(0);

    let result = policy.retry_with(
        &sleeper,
        |_: &String| true,
        || {
            attempts.set(attempts.get() + 1);
            if attempts.get() <= 2 {
                Err(format!("attempt {} failed", attempts.get()))
            } else {
                Ok(attempts.get())
            }
        },
    );

    assert_eq!(result, Ok(3));
    assert_eq!(sleeper.waits.get(), 2);
    assert_eq!(sleeper.total.get(), Duration::from_secs(3));
}

#[test]
fn retry_exhaustion_surfaces_third_failure() {
    let policy = RetryPolicy::new(3, Duration::ZERO, 2.0).expect("policy is valid");
    let attempts = Cell::new(0);

    let result: Result<(), String> = policy.retry(|| {
        attempts.set(attempts.get() + 1);
        Err(format!("attempt {} failed", attempts.get()))
    });

    assert_eq!(result, Err("attempt 3 failed".to_string()));
    assert_eq!(attempts.get(), 3);
}

#[test]
fn logger_registry_does_not_duplicate_output() {
    let registry = LoggerRegistry::new();
    let memory = Arc::new(MemorySink::new(Formatter::new("{name} {levelname} {message}")));
    let logger = registry.get_logger("worker").expect("lookup");
    logger.add_sink(memory.clone());

    for _ in 0..3 {
        registry
            .setup_logger("worker", Level::Info, None)
            .expect("setup should pass");
    }
    logger.info("processed");

    assert_eq!(memory.lines(), vec!["worker INFO processed".to_string()]);
}
