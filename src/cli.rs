use clap::Parser;
use std::time::Duration;

use crate::{
    e2e::PipelineTargets,
    load::LoadOptions,
    payload::LogLevel,
    session::SessionOptions,
};

/// Test the log pipeline end to end: bucket, function, and CloudWatch logs
#[derive(Parser, Debug, PartialEq)]
#[clap(author, version, about)]
pub struct E2eArgs {
    /// AWS region
    #[clap(long, env = "AWS_REGION", default_value = "ap-northeast-1")]
    pub region: String,
    /// CloudWatch log group to check
    #[clap(long)]
    pub log_group: String,
    /// Lambda function to invoke
    #[clap(long)]
    pub lambda_function: String,
    /// S3 bucket name
    #[clap(long)]
    pub s3_bucket: String,
    /// Seconds to wait for logs to propagate
    #[clap(long, default_value_t = 30)]
    pub wait_time: u64,
}

impl E2eArgs {
    /// Session built from the region only, credentials come from the environment.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            region: self.region.clone(),
            ..Default::default()
        }
    }

    /// Resources to check.
    pub fn targets(&self) -> PipelineTargets {
        PipelineTargets {
            bucket: self.s3_bucket.clone(),
            function_name: self.lambda_function.clone(),
            log_group: self.log_group.clone(),
            wait: Duration::from_secs(self.wait_time),
        }
    }
}

/// Invoke a Lambda function repeatedly to generate test logs
#[derive(Parser, Debug, PartialEq)]
#[clap(author, version, about)]
pub struct InvokeArgs {
    /// Name of the Lambda function to invoke
    pub function_name: String,
    /// Number of invocations
    #[clap(long, default_value_t = 1, parse(try_from_str = parse_count))]
    pub count: u32,
    /// AWS region
    #[clap(long, env = "AWS_REGION", default_value = "ap-northeast-1")]
    pub region: String,
    /// AWS profile to use
    #[clap(long)]
    pub profile: Option<String>,
    /// AWS access key, overrides the profile
    #[clap(long, requires = "secret-key")]
    pub access_key: Option<String>,
    /// AWS secret key, must be provided with the access key
    #[clap(long, requires = "access-key")]
    pub secret_key: Option<String>,
    /// Delay between invocations, in seconds
    #[clap(long, default_value = "2.0", parse(try_from_str = parse_seconds))]
    pub delay: Duration,
    /// Log level to use in the payload
    #[clap(long, arg_enum, default_value = "INFO")]
    pub log_level: LogLevel,
}

impl InvokeArgs {
    /// Session options, explicit keys win over the profile.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            profile: self.profile.clone(),
            region: self.region.clone(),
        }
    }

    /// Load generation options.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            count: self.count,
            delay: self.delay,
            log_level: self.log_level,
        }
    }
}

fn parse_count(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) => Err("count must be at least 1".into()),
        Ok(count) => Ok(count),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("{value} is not a valid number of seconds"));
    }
    Ok(Duration::from_secs_f64(seconds))
}
