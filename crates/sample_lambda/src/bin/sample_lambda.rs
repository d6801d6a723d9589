use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use sample_lambda::adapters::http::{ExternalApi, ReqwestExternalApi};
use sample_lambda::config::HandlerConfig;
use sample_lambda::handlers::lambda::{handle_event, HandlerDeps};
use sample_lambda::handlers::response::ApiGatewayResponse;
use serde_json::Value;
use test_common_framework::logging::{Level, Logger, LoggerRegistry};
use test_common_framework::retry::ThreadSleeper;
use tracing_subscriber::EnvFilter;

struct RuntimeState {
    config: HandlerConfig,
    logger: Arc<Logger>,
    // Owns every named logger for the lifetime of the process.
    _registry: LoggerRegistry,
}

fn tracing_directive(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warning => "warn",
        Level::Error | Level::Critical => "error",
    }
}

fn init_tracing(level: Level) -> Result<(), Error> {
    let env_filter = format!("hyper=off,reqwest=off,rustls=off,{}", tracing_directive(level));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(env_filter)?)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn handle_blocking(payload: Value, state: &RuntimeState) -> ApiGatewayResponse {
    let client = match state.config.external_api_url {
        Some(_) => match ReqwestExternalApi::new() {
            Ok(client) => Some(client),
            Err(error) => {
                state.logger.error(format_args!("{error}"));
                None
            }
        },
        None => None,
    };

    let deps = HandlerDeps {
        logger: &state.logger,
        config: &state.config,
        external_api: client.as_ref().map(|client| client as &dyn ExternalApi),
        sleeper: &ThreadSleeper,
    };
    handle_event(payload, &deps)
}

async fn handle_request(
    event: LambdaEvent<Value>,
    state: Arc<RuntimeState>,
) -> Result<ApiGatewayResponse, Error> {
    // Retry waits and the HTTP client block the calling thread.
    let response = tokio::task::block_in_place(|| handle_blocking(event.payload, &state));
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = HandlerConfig::from_env()?;
    init_tracing(config.log_level)?;

    let registry = LoggerRegistry::new();
    let logger = registry.setup_logger(
        &config.logger_name,
        config.log_level,
        config.log_format.as_deref(),
    )?;
    tracing::debug!(logger = %config.logger_name, "handler logger configured");

    let state = Arc::new(RuntimeState {
        config,
        logger,
        _registry: registry,
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(event, Arc::clone(&state))
    }))
    .await
}
