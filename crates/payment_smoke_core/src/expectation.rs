use serde_json::Value;
use thiserror::Error;

use crate::contract::InvocationResult;

/// Pass/fail conditions on the function response. Empty by default, which
/// turns the scenario into a presence-only smoke check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectation {
    pub status_code: Option<u16>,
    pub body_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationFailure {
    #[error("expected status code {expected}, got {}", display_code(.actual))]
    StatusCode { expected: u16, actual: Option<u16> },
    #[error("expected body status '{expected}', got {}", display_status(.actual))]
    BodyStatus {
        expected: String,
        actual: Option<String>,
    },
}

fn display_code(actual: &Option<u16>) -> String {
    actual.map_or_else(|| "none".to_string(), |code| code.to_string())
}

fn display_status(actual: &Option<String>) -> String {
    actual
        .as_ref()
        .map_or_else(|| "none".to_string(), |status| format!("'{status}'"))
}

impl Expectation {
    pub fn is_empty(&self) -> bool {
        self.status_code.is_none() && self.body_status.is_none()
    }

    pub fn check(&self, result: &InvocationResult) -> Result<(), ExpectationFailure> {
        if let Some(expected) = self.status_code {
            if result.status_code != Some(expected) {
                return Err(ExpectationFailure::StatusCode {
                    expected,
                    actual: result.status_code,
                });
            }
        }

        if let Some(expected) = &self.body_status {
            let actual = result.body_status().map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            });
            if actual.as_deref() != Some(expected.as_str()) {
                return Err(ExpectationFailure::BodyStatus {
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        Ok(())
    }
}
