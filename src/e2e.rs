use async_trait::async_trait;
use aws_types::SdkConfig;
use chrono::Utc;
use std::time::Duration;

use crate::{
    cloudwatch_logs::{self, LogQueryResult},
    error::RuntimeError,
    lambda::{InvocationResult, Invoke, LambdaInvoker},
    payload::TestPayload,
    s3,
};

/// Resources exercised by the end-to-end check.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineTargets {
    /// Bucket the pipeline archives logs into
    pub bucket: String,
    /// Function that produces the logs
    pub function_name: String,
    /// Log group the function writes to
    pub log_group: String,
    /// How long to wait for logs to propagate before checking
    pub wait: Duration,
}

/// The three checks of the pipeline, in the order they run.
#[async_trait]
pub trait PipelineChecks {
    /// Check that the bucket exists and is accessible
    async fn verify_bucket(&self, bucket: &str) -> Result<(), RuntimeError>;
    /// Invoke the function once with the pipeline check payload
    async fn invoke_function(&self, function_name: &str) -> Result<InvocationResult, RuntimeError>;
    /// Wait, then look for events in the log group
    async fn verify_logs(
        &self,
        log_group: &str,
        wait: Duration,
    ) -> Result<LogQueryResult, RuntimeError>;
}

/// `AwsPipeline` runs the checks against the real services.
pub struct AwsPipeline {
    s3: aws_sdk_s3::Client,
    lambda: LambdaInvoker,
    logs: aws_sdk_cloudwatchlogs::Client,
}

impl AwsPipeline {
    /// Initialize the S3, Lambda, and CloudWatch Logs clients from one configuration.
    pub fn new(config: &SdkConfig) -> AwsPipeline {
        AwsPipeline {
            s3: aws_sdk_s3::Client::new(config),
            lambda: LambdaInvoker::new(config),
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
        }
    }
}

#[async_trait]
impl PipelineChecks for AwsPipeline {
    async fn verify_bucket(&self, bucket: &str) -> Result<(), RuntimeError> {
        s3::verify_bucket(&self.s3, bucket).await
    }

    async fn invoke_function(&self, function_name: &str) -> Result<InvocationResult, RuntimeError> {
        let payload = TestPayload::pipeline_check(Utc::now());
        self.lambda.invoke(function_name, &payload).await
    }

    async fn verify_logs(
        &self,
        log_group: &str,
        wait: Duration,
    ) -> Result<LogQueryResult, RuntimeError> {
        cloudwatch_logs::verify_log_events(&self.logs, log_group, wait).await
    }
}

/// Run the bucket, invoke, and log checks in order, stopping at the first failure.
/// Returns true only when all three pass.
#[tracing::instrument(skip(checks))]
pub async fn run_checks<C>(checks: &C, targets: &PipelineTargets) -> bool
where
    C: PipelineChecks + Sync + ?Sized,
{
    println!("Verifying S3 bucket: {}", targets.bucket);
    if let Err(err) = checks.verify_bucket(&targets.bucket).await {
        tracing::error!(error = %err, "bucket check failed");
        println!("{err}");
        println!("S3 bucket verification failed");
        return false;
    }
    println!("S3 bucket {} exists and is accessible.", targets.bucket);

    println!("Invoking Lambda function: {}", targets.function_name);
    match checks.invoke_function(&targets.function_name).await {
        Ok(result) if result.is_success() => {
            println!(
                "Successfully invoked Lambda function (Status: {})",
                result.status_code
            );
            if let Some(function_error) = &result.function_error {
                println!("Function error: {function_error}");
                if let Some(details) = result.payload_details() {
                    println!("Error details: {details}");
                }
            }
        }
        Ok(result) => {
            let err = RuntimeError::UnsuccessfulStatus(result.status_code);
            tracing::error!(error = %err, "invocation failed");
            println!("{err}");
            println!("Lambda invocation failed");
            return false;
        }
        Err(err) => {
            tracing::error!(error = %err, "invocation failed");
            println!("{err}");
            println!("Lambda invocation failed");
            return false;
        }
    }

    println!(
        "Waiting {} seconds for logs to propagate to CloudWatch...",
        targets.wait.as_secs()
    );
    match checks.verify_logs(&targets.log_group, targets.wait).await {
        Ok(result) => {
            println!("Found {} log events. Most recent:", result.events.len());
            for line in result.preview() {
                println!("  {line}...");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "log check failed");
            println!("{err}");
            println!("CloudWatch logs verification failed");
            return false;
        }
    }

    println!("\n✅ All tests passed! The infrastructure is working correctly.");
    true
}
