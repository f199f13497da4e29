//! Invoke-and-verify primitives for the payments smoke test.
//!
//! This crate owns the request/response contract, the scenario flow, and the
//! seams (`FunctionInvoker`, `RecordStore`) the scenario runs against. It
//! excludes AWS SDK concerns; see `payment_smoke_aws` for the adapters.

pub mod contract;
pub mod expectation;
pub mod invoke;
pub mod response;
pub mod scan;
pub mod scenario;
