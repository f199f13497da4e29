use std::io;
use std::process::ExitCode;

use clap::Parser;
use payment_smoke_aws::adapters::dynamodb::DynamoRecordStore;
use payment_smoke_aws::adapters::lambda::LambdaFunctionInvoker;
use payment_smoke_aws::cli::{exit_code, Cli, LogFormat, RunOutcome};
use payment_smoke_aws::config::load_sdk_config;
use payment_smoke_aws::report::ConsoleReport;
use payment_smoke_core::scenario::{run_payment_creation_test, ScenarioEvent};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn misconfigured(error: anyhow::Error) -> RunOutcome {
    tracing::error!(error = %error, "invalid_configuration");
    eprintln!("Error during test: {error:#}");
    RunOutcome::Misconfigured
}

async fn run(cli: &Cli) -> RunOutcome {
    let settings = match cli.client_settings() {
        Ok(settings) => settings,
        Err(error) => return misconfigured(error),
    };
    let config = match cli.scenario_config() {
        Ok(config) => config,
        Err(error) => return misconfigured(error),
    };

    let sdk_config = load_sdk_config(&settings).await;
    let invoker = LambdaFunctionInvoker::new(&sdk_config);
    let store = DynamoRecordStore::new(&sdk_config);

    let mut report = ConsoleReport::new(io::stdout().lock());
    let mut on_event = |event: ScenarioEvent<'_>| {
        if let Err(error) = report.on_event(event) {
            tracing::warn!(error = %error, "failed to write scenario output");
        }
    };
    let result = run_payment_creation_test(&config, &invoker, &store, &mut on_event);

    match result {
        Ok(_) => RunOutcome::Passed,
        Err(error) => {
            if let Err(write_error) = report.finish() {
                tracing::warn!(error = %write_error, "failed to write scenario output");
            }
            eprintln!("Error during test: {error}");
            RunOutcome::ScenarioFailed
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let outcome = run(&cli).await;
    ExitCode::from(exit_code(outcome, cli.allow_failure))
}
