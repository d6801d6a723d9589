use serde::Serialize;
use serde_json::Value;
use test_common_framework::json::safe_json_dumps_or_empty;
use test_common_framework::logging::Logger;
use test_common_framework::retry::Sleeper;
use test_common_framework::VERSION;

use crate::adapters::http::{call_external_api, ExternalApi};
use crate::config::HandlerConfig;
use crate::error::HandlerError;
use crate::handlers::event::{display_field, extract_user_info, process_event_data};
use crate::handlers::response::{
    format_response, internal_error_response, ApiGatewayResponse, LambdaResponse,
};

pub const SUCCESS_MESSAGE: &str = "Request processed successfully";

/// Everything a single invocation needs, borrowed from the composition root.
pub struct HandlerDeps<'a> {
    pub logger: &'a Logger,
    pub config: &'a HandlerConfig,
    /// Required only when `config.external_api_url` is set.
    pub external_api: Option<&'a dyn ExternalApi>,
    pub sleeper: &'a dyn Sleeper,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseData {
    pub user_id: Value,
    pub action: Value,
    pub framework_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Value>,
}

/// Handle one event. Never fails: any error is logged and returned as a
/// status-500 response.
pub fn handle_event(event: Value, deps: &HandlerDeps<'_>) -> ApiGatewayResponse {
    let logger = deps.logger;
    logger.info(format_args!(
        "Lambda started - test_common_framework version: {VERSION}"
    ));
    logger.info(format_args!("Event: {}", safe_json_dumps_or_empty(&event)));

    match build_response_data(&event, deps) {
        Ok(data) => format_response(
            200,
            &LambdaResponse {
                status_code: 200,
                message: SUCCESS_MESSAGE.to_string(),
                data,
            },
        ),
        Err(error) => {
            logger.error(format_args!("Error processing request: {error}"));
            internal_error_response(&error)
        }
    }
}

fn build_response_data(
    event: &Value,
    deps: &HandlerDeps<'_>,
) -> Result<ResponseData, HandlerError> {
    let logger = deps.logger;
    let processed = process_event_data(event, logger)?;

    let caller = extract_user_info(event);
    logger.debug(format_args!(
        "Authorizer identity: {} <{}>",
        caller.user_id, caller.email
    ));
    logger.info(format_args!(
        "Processing request for user: {}",
        display_field(&processed.user_id)
    ));
    logger.info(format_args!("Action: {}", display_field(&processed.action)));

    let external = match deps.config.external_api_url.as_deref() {
        Some(url) => {
            let api = deps.external_api.ok_or(HandlerError::ExternalApiUnavailable)?;
            Some(call_external_api(api, &deps.config.retry, deps.sleeper, url)?)
        }
        None => None,
    };

    Ok(ResponseData {
        user_id: processed.user_id,
        action: processed.action,
        framework_version: VERSION,
        external,
    })
}
