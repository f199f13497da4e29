//! AWS-backed adapters and CLI wiring for the payments smoke test.
//!
//! The scenario and its seams live in `payment_smoke_core`; this crate owns
//! SDK client construction, the Lambda and DynamoDB adapters, and console
//! reporting for the `payment_smoke` binary.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod report;
