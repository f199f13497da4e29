/// What the platform hands back from a synchronous invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeOutcome {
    pub status_code: i32,
    /// Set when the function itself failed (`Handled` or `Unhandled`).
    pub function_error: Option<String>,
    pub payload: Vec<u8>,
}

pub trait FunctionInvoker {
    fn invoke(&self, function_name: &str, payload: &[u8]) -> Result<InvokeOutcome, String>;
}

impl<F> FunctionInvoker for F
where
    F: Fn(&str, &[u8]) -> Result<InvokeOutcome, String>,
{
    fn invoke(&self, function_name: &str, payload: &[u8]) -> Result<InvokeOutcome, String> {
        self(function_name, payload)
    }
}
