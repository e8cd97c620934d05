use thiserror::Error as ThisError;

/// Different errors that the application can raise
#[derive(Debug, ThisError)]
pub enum RuntimeError {
    /// Error returned when the session resolved no credentials provider at all
    #[error("no usable AWS credentials were found")]
    MissingCredentials,
    /// Error returned by the Lambda API when invoking a function
    #[error("error invoking Lambda function: {0}")]
    Lambda(#[from] aws_sdk_lambda::Error),
    /// Error returned when a function invocation completes with a non-2xx status code
    #[error("failed to invoke Lambda function. Status code: {0}")]
    UnsuccessfulStatus(i32),
    /// Error returned by the S3 API, the bucket is missing or not accessible
    #[error("error accessing S3 bucket: {0}")]
    S3(#[from] aws_sdk_s3::Error),
    /// Error returned by the CloudWatch Logs API
    #[error("error checking CloudWatch logs: {0}")]
    CloudWatchLogs(#[from] aws_sdk_cloudwatchlogs::Error),
    /// Error returned when a log group has no log streams
    #[error("no log streams found in log group {0}")]
    NoLogStreams(String),
    /// Error returned when the newest log stream has no events
    #[error("no log events found in stream {0}")]
    NoLogEvents(String),
    /// Error returned if a payload cannot be serialized
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

