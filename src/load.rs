use std::time::Duration;

use crate::{
    error::RuntimeError,
    lambda::Invoke,
    payload::{LogLevel, TestPayload},
};

/// Options of a load generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
    /// Number of invocations, at least one
    pub count: u32,
    /// Pause between two invocations
    pub delay: Duration,
    /// Level written into every payload
    pub log_level: LogLevel,
}

impl LoadOptions {
    /// Line announcing the run, printed before the session is created.
    pub fn banner(&self, function_name: &str) -> String {
        format!(
            "Invoking Lambda function '{}' {} times",
            function_name, self.count
        )
    }
}

/// Progress line printed before sleeping between two invocations.
/// Seconds keep their fractional part, `2.0` and not `2`.
pub fn waiting_line(delay: Duration) -> String {
    format!(
        "Waiting {:?} seconds before next invocation...",
        delay.as_secs_f64()
    )
}

/// Log group Lambda writes the function logs to.
pub fn function_log_group(function_name: &str) -> String {
    format!("/aws/lambda/{function_name}")
}

/// Invoke the function `count` times with fresh payloads, sleeping `delay`
/// between invocations.
///
/// Stops at the first transport error or non-2xx status code.
/// Returns the number of successful invocations.
#[tracing::instrument(skip(invoker))]
pub async fn generate_load<I>(
    invoker: &I,
    function_name: &str,
    options: &LoadOptions,
) -> Result<u32, RuntimeError>
where
    I: Invoke + Sync + ?Sized,
{
    for i in 1..=options.count {
        println!("Invocation {} of {}", i, options.count);

        let payload = TestPayload::generate(i, options.log_level);
        let result = invoker.invoke(function_name, &payload).await?;

        if !result.is_success() {
            return Err(RuntimeError::UnsuccessfulStatus(result.status_code));
        }
        println!(
            "Successfully invoked Lambda function (Status: {})",
            result.status_code
        );

        if let Some(function_error) = &result.function_error {
            tracing::warn!(invocation = i, %function_error, "function reported an error");
            println!("Function error: {function_error}");
            if let Some(details) = result.payload_details() {
                println!("Error details: {details}");
            }
        }

        if i < options.count {
            println!("{}", waiting_line(options.delay));
            tokio::time::sleep(options.delay).await;
        }
    }

    let log_group = function_log_group(function_name);
    println!("\nAll invocations completed. Check CloudWatch logs for Lambda function.");
    println!("Logs should be available in log group: {log_group}");
    println!("\nTo check logs using AWS CLI:");
    println!("aws logs filter-log-events --log-group-name {log_group}");

    Ok(options.count)
}
