use crate::{error::RuntimeError, payload::TestPayload};
use async_trait::async_trait;
use aws_sdk_lambda::{model::InvocationType, types::Blob, Client, Error};
use aws_types::SdkConfig;

/// `InvocationResult` is what a synchronous invocation reports back
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvocationResult {
    /// HTTP status code of the invocation
    pub status_code: i32,
    /// Kind of error reported by the function itself, if any
    pub function_error: Option<String>,
    /// Raw response payload returned by the function
    pub payload: Option<Vec<u8>>,
}

impl InvocationResult {
    /// A 2xx status code means the service accepted and ran the invocation.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Render the response payload for display.
    /// JSON payloads are pretty printed, anything else is shown as text.
    pub fn payload_details(&self) -> Option<String> {
        let bytes = self.payload.as_deref()?;
        Some(match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        })
    }
}

/// Anything able to run a test payload through a function.
#[async_trait]
pub trait Invoke {
    /// Invoke `function_name` synchronously with `payload`.
    async fn invoke(
        &self,
        function_name: &str,
        payload: &TestPayload,
    ) -> Result<InvocationResult, RuntimeError>;
}

/// Lambda client implementation.
pub struct LambdaInvoker {
    inner: Client,
}

impl LambdaInvoker {
    /// Initialize the Lambda client.
    pub fn new(config: &SdkConfig) -> LambdaInvoker {
        LambdaInvoker {
            inner: Client::new(config),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_client(inner: Client) -> LambdaInvoker {
        LambdaInvoker { inner }
    }
}

#[async_trait]
impl Invoke for LambdaInvoker {
    #[tracing::instrument(skip(self, payload))]
    async fn invoke(
        &self,
        function_name: &str,
        payload: &TestPayload,
    ) -> Result<InvocationResult, RuntimeError> {
        let body = payload.to_json()?;
        tracing::info!(bytes = body.len(), "invoking function");

        let output = self
            .inner
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(Error::from)?;

        tracing::info!(
            status_code = output.status_code,
            function_error = ?output.function_error,
            "function invoked"
        );

        Ok(InvocationResult {
            status_code: output.status_code,
            function_error: output.function_error,
            payload: output.payload.map(Blob::into_inner),
        })
    }
}
