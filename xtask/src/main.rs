use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the payments smoke test workspace",
    long_about = "A unified CLI for running the payments smoke test, its live\n\
                  test, and CI checks in this workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the payment_smoke binary against the configured stack
    Smoke {
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Debug)]
        profile: BuildProfile,
        /// Arguments forwarded to payment_smoke
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the ignored live tests (requires AWS credentials)
    LiveTest,
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build the release binary
    Build,
    /// Run check + build
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn smoke_args<'a>(profile: BuildProfile, forwarded: &'a [String]) -> Vec<&'a str> {
    let mut cargo_args = vec!["run", "-p", "payment_smoke_aws", "--bin", "payment_smoke"];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    if !forwarded.is_empty() {
        cargo_args.push("--");
        cargo_args.extend(forwarded.iter().map(String::as_str));
    }
    cargo_args
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test payment_smoke_core");
    run_cargo(&["test", "-p", "payment_smoke_core"]);

    step("Test payment_smoke_aws");
    run_cargo(&["test", "-p", "payment_smoke_aws"]);
}

fn ci_build() {
    step("Build payment_smoke (release)");
    run_cargo(&[
        "build",
        "-p",
        "payment_smoke_aws",
        "--bin",
        "payment_smoke",
        "--release",
    ]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Smoke { profile, args } => {
            run_cargo(&smoke_args(profile, &args));
        }
        Commands::LiveTest => {
            run_cargo(&[
                "test",
                "-p",
                "payment_smoke_aws",
                "--test",
                "live_smoke",
                "--",
                "--ignored",
                "--nocapture",
            ]);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Build => ci_build(),
                CiJob::All => {
                    ci_check();
                    ci_build();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}
