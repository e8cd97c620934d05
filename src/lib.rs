#![deny(missing_docs)]
//! <fullname>Log pipeline probe</fullname>
//!
//! Operator tools to exercise a Lambda to CloudWatch Logs pipeline.
//! `e2e_test` checks the archive bucket, invokes the function once and
//! looks for the resulting log events. `invoke_lambda` invokes a function
//! repeatedly with synthetic payloads to generate log volume.

/// `cli` includes the command line arguments of both tools
pub mod cli;

mod cloudwatch_logs;
pub use cloudwatch_logs::{verify_log_events, LogEvent, LogQueryResult};

mod e2e;
pub use e2e::{run_checks, AwsPipeline, PipelineChecks, PipelineTargets};

mod error;
pub use error::RuntimeError;

mod lambda;
pub use lambda::{InvocationResult, Invoke, LambdaInvoker};

mod load;
pub use load::{function_log_group, generate_load, waiting_line, LoadOptions};

mod payload;
pub use payload::{LogLevel, Metadata, TestPayload};

mod s3;
pub use s3::verify_bucket;

/// `session` resolves the credentials and region of a run
pub mod session;

#[cfg(test)]
mod test_util;
