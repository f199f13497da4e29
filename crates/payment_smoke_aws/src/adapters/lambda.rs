use aws_config::SdkConfig;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::InvocationType;
use payment_smoke_core::invoke::{FunctionInvoker, InvokeOutcome};

#[derive(Debug, Clone)]
pub struct LambdaFunctionInvoker {
    lambda_client: aws_sdk_lambda::Client,
}

impl LambdaFunctionInvoker {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_lambda::Client::new(config))
    }

    pub fn from_client(lambda_client: aws_sdk_lambda::Client) -> Self {
        Self { lambda_client }
    }
}

impl FunctionInvoker for LambdaFunctionInvoker {
    fn invoke(&self, function_name: &str, payload: &[u8]) -> Result<InvokeOutcome, String> {
        let request_payload = payload.to_vec();
        let client = self.lambda_client.clone();
        let function_name = function_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .invoke()
                    .function_name(function_name)
                    .invocation_type(InvocationType::RequestResponse)
                    .set_payload(Some(request_payload.into()))
                    .send()
                    .await
                    .map(|output| InvokeOutcome {
                        status_code: output.status_code(),
                        function_error: output.function_error().map(str::to_string),
                        payload: output
                            .payload()
                            .map(|blob| blob.as_ref().to_vec())
                            .unwrap_or_default(),
                    })
                    .map_err(|error| {
                        format!("lambda invoke failed: {}", DisplayErrorContext(&error))
                    })
            })
        })
    }
}
