use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_FUNCTION_NAME: &str = "PaymentsHandler";
pub const DEFAULT_TABLE_NAME: &str = "Payments";
pub const DEFAULT_HTTP_METHOD: &str = "POST";
pub const DEFAULT_PATH: &str = "/create-payment";

pub const FIXTURE_BILLING_OPTION: &str = "Yearly";
pub const FIXTURE_AMOUNT: f64 = 299.99;
pub const FIXTURE_PAYMENT_METHOD: &str = "PayPal";

/// One persisted row, flattened to plain JSON.
pub type StoredRecord = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub billing_option: String,
    pub amount: f64,
    pub payment_method: String,
}

impl PaymentRequest {
    pub fn fixture() -> Self {
        Self {
            billing_option: FIXTURE_BILLING_OPTION.to_string(),
            amount: FIXTURE_AMOUNT,
            payment_method: FIXTURE_PAYMENT_METHOD.to_string(),
        }
    }
}

impl Default for PaymentRequest {
    fn default() -> Self {
        Self::fixture()
    }
}

/// Synthetic API-gateway proxy event used to call the function directly.
///
/// `body` holds the request serialized as a JSON string, the way a gateway
/// forwards it. `resource` mirrors `path` because deployed handlers route on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEnvelope {
    pub http_method: String,
    pub path: String,
    pub resource: String,
    pub body: String,
}

impl InvocationEnvelope {
    pub fn new(
        http_method: impl Into<String>,
        path: impl Into<String>,
        request: &PaymentRequest,
    ) -> Result<Self, serde_json::Error> {
        let path = path.into();
        Ok(Self {
            http_method: http_method.into(),
            resource: path.clone(),
            path,
            body: serde_json::to_string(request)?,
        })
    }

    pub fn post(
        path: impl Into<String>,
        request: &PaymentRequest,
    ) -> Result<Self, serde_json::Error> {
        Self::new(DEFAULT_HTTP_METHOD, path, request)
    }

    pub fn request(&self) -> Result<PaymentRequest, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Decoded function response. Only interpreted for display and expectations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvocationResult {
    pub raw: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl InvocationResult {
    /// The `status` field of the parsed body, falling back to the raw payload.
    pub fn body_status(&self) -> Option<&Value> {
        self.body
            .as_ref()
            .and_then(|body| body.get("status"))
            .or_else(|| self.raw.get("status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_envelope_round_trips_request_body() {
        let request = PaymentRequest::fixture();
        let envelope = InvocationEnvelope::post(DEFAULT_PATH, &request).expect("envelope");

        let payload = envelope.to_payload().expect("payload");
        let decoded: InvocationEnvelope = serde_json::from_slice(&payload).expect("decode");

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.request().expect("request body"), request);
    }

    #[test]
    fn envelope_uses_gateway_field_names() {
        let envelope = InvocationEnvelope::post("/create-payment", &PaymentRequest::fixture())
            .expect("envelope");
        let value = serde_json::to_value(&envelope).expect("value");

        assert_eq!(value["httpMethod"], "POST");
        assert_eq!(value["path"], "/create-payment");
        assert_eq!(value["resource"], "/create-payment");

        let body_text = value["body"].as_str().expect("string body");
        let body: Value = serde_json::from_str(body_text).expect("body json");
        assert_eq!(body["billingOption"], "Yearly");
        assert_eq!(body["amount"], 299.99);
        assert_eq!(body["paymentMethod"], "PayPal");
    }

    #[test]
    fn body_status_prefers_parsed_body() {
        let result = InvocationResult {
            raw: serde_json::json!({"status": "outer"}),
            status_code: Some(201),
            body: Some(serde_json::json!({"status": "success"})),
        };
        assert_eq!(result.body_status(), Some(&Value::from("success")));
    }
}
