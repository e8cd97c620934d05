use aws_smithy_http::body::SdkBody;
use aws_types::{region::Region, Credentials, SdkConfig};

/// Configuration for mocking AWS SDK clients
pub async fn get_mock_config() -> SdkConfig {
    aws_config::from_env()
        .region(Region::new("us-west-1"))
        .credentials_provider(Credentials::new(
            "accesskey",
            "privatekey",
            None,
            None,
            "dummy",
        ))
        .load()
        .await
}

/// Base request builder for the AWS SDK calls
pub fn get_request_builder(service: &str) -> http::request::Builder {
    http::Request::builder().uri(format!("https://{service}.us-west-1.amazonaws.com/"))
}

/// Request sent to a CloudWatch Logs JSON operation
pub fn get_logs_request(target: &str, body: &str) -> http::Request<SdkBody> {
    get_request_builder("logs")
        .header("content-type", "application/x-amz-json-1.1")
        .header("x-amz-target", format!("Logs_20140328.{target}"))
        .body(SdkBody::from(body.to_string()))
        .unwrap()
}

/// Canned response returned by the mocked service
pub fn get_response(status: u16, body: &str) -> http::Response<SdkBody> {
    http::Response::builder()
        .status(status)
        .body(SdkBody::from(body.to_string()))
        .unwrap()
}

/// Error returned when the Lambda endpoint cannot be reached
pub fn lambda_transport_error() -> crate::RuntimeError {
    crate::RuntimeError::Lambda(aws_sdk_lambda::Error::Unhandled(Box::new(
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
    )))
}
