//! Live smoke test against a deployed payments stack.
//!
//! Needs AWS credentials in the default provider chain and a deployed
//! `PaymentsHandler` function plus `Payments` table (or the overrides below).
//!
//! ```bash
//! cargo run -p xtask -- live-test
//! ```
//!
//! Environment:
//! - `PAYMENT_SMOKE_REGION` (default `eu-west-1`)
//! - `PAYMENT_SMOKE_ENDPOINT_URL` (unset for real AWS)
//! - `PAYMENT_SMOKE_FUNCTION` (default `PaymentsHandler`)
//! - `PAYMENT_SMOKE_TABLE` (default `Payments`)

use payment_smoke_aws::adapters::dynamodb::DynamoRecordStore;
use payment_smoke_aws::adapters::lambda::LambdaFunctionInvoker;
use payment_smoke_aws::config::{load_sdk_config, ClientSettings};
use payment_smoke_core::scenario::{run_payment_creation_test, ScenarioConfig, ScenarioEvent};

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

#[ignore]
#[tokio::test(flavor = "multi_thread")]
async fn payments_function_responds_and_table_is_readable() {
    let defaults = ClientSettings::default();
    let settings = ClientSettings {
        region: env_or("PAYMENT_SMOKE_REGION", defaults.region),
        endpoint_url: std::env::var("PAYMENT_SMOKE_ENDPOINT_URL").ok(),
        operation_timeout: Some(std::time::Duration::from_secs(60)),
    };
    settings.validate().expect("valid client settings");

    let defaults = ScenarioConfig::default();
    let function_name = env_or("PAYMENT_SMOKE_FUNCTION", defaults.function_name.clone());
    let table_name = env_or("PAYMENT_SMOKE_TABLE", defaults.table_name.clone());
    let config = ScenarioConfig {
        function_name,
        table_name,
        ..defaults
    };

    let sdk_config = load_sdk_config(&settings).await;
    let invoker = LambdaFunctionInvoker::new(&sdk_config);
    let store = DynamoRecordStore::new(&sdk_config);

    let mut responses = 0usize;
    let summary = run_payment_creation_test(&config, &invoker, &store, &mut |event| {
        if let ScenarioEvent::Response(response) = event {
            println!("Lambda Response: {}", response.raw);
            responses += 1;
        }
    })
    .expect("scenario should pass against the live stack");

    assert_eq!(responses, 1);
    assert!(
        summary.response.status_code.is_some(),
        "payments function should answer with an API-gateway response"
    );
    println!(
        "scanned {} rows over {} pages",
        summary.records_scanned, summary.pages_scanned
    );
}
