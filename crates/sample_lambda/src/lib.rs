//! Sample Lambda function built on `test_common_framework`.
//!
//! This crate owns the runtime-facing pieces: the API Gateway response
//! envelope, event processing, the optional outbound HTTP call, and
//! environment configuration. The binary in `src/bin/sample_lambda.rs` wires
//! them into `lambda_runtime`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
