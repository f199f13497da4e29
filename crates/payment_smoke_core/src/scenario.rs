use std::time::Instant;

use thiserror::Error;

use crate::contract::{
    InvocationEnvelope, InvocationResult, PaymentRequest, StoredRecord, DEFAULT_FUNCTION_NAME,
    DEFAULT_HTTP_METHOD, DEFAULT_PATH, DEFAULT_TABLE_NAME,
};
use crate::expectation::{Expectation, ExpectationFailure};
use crate::invoke::FunctionInvoker;
use crate::response::decode_invocation_payload;
use crate::scan::{PagedScan, RecordStore};

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub function_name: String,
    pub table_name: String,
    pub http_method: String,
    pub path: String,
    pub request: PaymentRequest,
    pub page_size: Option<u32>,
    pub expectation: Expectation,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            http_method: DEFAULT_HTTP_METHOD.to_string(),
            path: DEFAULT_PATH.to_string(),
            request: PaymentRequest::fixture(),
            page_size: None,
            expectation: Expectation::default(),
        }
    }
}

#[derive(Debug)]
pub enum ScenarioEvent<'a> {
    Response(&'a InvocationResult),
    Record(&'a StoredRecord),
    ScanComplete { records: usize, pages: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSummary {
    pub response: InvocationResult,
    pub records_scanned: usize,
    pub pages_scanned: usize,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to serialize invocation envelope: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to invoke function '{function_name}': {message}")]
    Invocation {
        function_name: String,
        message: String,
    },
    #[error("function '{function_name}' reported {kind} error: {payload}")]
    FunctionError {
        function_name: String,
        kind: String,
        payload: String,
    },
    #[error("failed to decode response of '{function_name}': {message}")]
    ResponseDecode {
        function_name: String,
        message: String,
    },
    #[error("response check failed: {0}")]
    Expectation(#[from] ExpectationFailure),
    #[error("failed to scan table '{table_name}' (page {page}): {message}")]
    Scan {
        table_name: String,
        page: usize,
        message: String,
    },
}

/// Invokes the payments function with the configured request, then reads the
/// whole table back. Each response and row is handed to `on_event` as it
/// arrives; the first failure stops the run.
pub fn run_payment_creation_test<I, S>(
    config: &ScenarioConfig,
    invoker: &I,
    store: &S,
    on_event: &mut dyn FnMut(ScenarioEvent<'_>),
) -> Result<ScenarioSummary, ScenarioError>
where
    I: FunctionInvoker + ?Sized,
    S: RecordStore,
{
    let started_at = Instant::now();
    let result = run_steps(config, invoker, store, on_event);

    match &result {
        Ok(summary) => tracing::info!(
            function_name = %config.function_name,
            table_name = %config.table_name,
            records = summary.records_scanned,
            pages = summary.pages_scanned,
            duration_ms = started_at.elapsed().as_millis() as u64,
            "scenario_passed"
        ),
        Err(error) => tracing::error!(
            function_name = %config.function_name,
            table_name = %config.table_name,
            duration_ms = started_at.elapsed().as_millis() as u64,
            error = %error,
            "scenario_failed"
        ),
    }

    result
}

fn run_steps<I, S>(
    config: &ScenarioConfig,
    invoker: &I,
    store: &S,
    on_event: &mut dyn FnMut(ScenarioEvent<'_>),
) -> Result<ScenarioSummary, ScenarioError>
where
    I: FunctionInvoker + ?Sized,
    S: RecordStore,
{
    let envelope = InvocationEnvelope::new(&config.http_method, &config.path, &config.request)?;
    let payload = envelope.to_payload()?;

    tracing::info!(
        function_name = %config.function_name,
        http_method = %envelope.http_method,
        path = %envelope.path,
        "invocation_started"
    );
    let invoked_at = Instant::now();
    let outcome = invoker
        .invoke(&config.function_name, &payload)
        .map_err(|message| ScenarioError::Invocation {
            function_name: config.function_name.clone(),
            message,
        })?;
    tracing::info!(
        function_name = %config.function_name,
        status_code = outcome.status_code,
        payload_bytes = outcome.payload.len(),
        duration_ms = invoked_at.elapsed().as_millis() as u64,
        "invocation_completed"
    );

    if let Some(kind) = outcome.function_error {
        return Err(ScenarioError::FunctionError {
            function_name: config.function_name.clone(),
            kind,
            payload: String::from_utf8_lossy(&outcome.payload).into_owned(),
        });
    }

    let response = match decode_invocation_payload(&outcome.payload) {
        Ok(response) => response,
        Err(message) => {
            return Err(ScenarioError::ResponseDecode {
                function_name: config.function_name.clone(),
                message,
            });
        }
    };
    on_event(ScenarioEvent::Response(&response));

    config.expectation.check(&response)?;

    let mut scan = PagedScan::new(store, &config.table_name, config.page_size);
    let mut records_scanned = 0usize;
    for row in scan.by_ref() {
        let record = row.map_err(|failure| ScenarioError::Scan {
            table_name: config.table_name.clone(),
            page: failure.page,
            message: failure.message,
        })?;
        records_scanned += 1;
        on_event(ScenarioEvent::Record(&record));
    }
    let pages_scanned = scan.pages_fetched();

    tracing::info!(
        table_name = %config.table_name,
        records = records_scanned,
        pages = pages_scanned,
        "scan_completed"
    );
    on_event(ScenarioEvent::ScanComplete {
        records: records_scanned,
        pages: pages_scanned,
    });

    Ok(ScenarioSummary {
        response,
        records_scanned,
        pages_scanned,
    })
}
