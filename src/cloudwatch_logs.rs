use aws_sdk_cloudwatchlogs::{model::OrderBy, Client, Error};
use std::time::Duration;

use crate::error::RuntimeError;

const MAX_STREAMS: i32 = 5;
const MAX_EVENTS: i32 = 10;
const PREVIEW_EVENTS: usize = 3;
const PREVIEW_CHARS: usize = 100;

/// `LogEvent` is a single event read back from a log stream
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogEvent {
    /// Event timestamp, milliseconds since the epoch
    pub timestamp: Option<i64>,
    /// Event message
    pub message: String,
}

/// `LogQueryResult` is a snapshot of the newest log stream in a group
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogQueryResult {
    /// Streams found in the group, newest first
    pub streams: Vec<String>,
    /// Most recent events of the newest stream
    pub events: Vec<LogEvent>,
}

impl LogQueryResult {
    /// The first events of the snapshot, each message cut to 100 characters.
    pub fn preview(&self) -> Vec<String> {
        self.events
            .iter()
            .take(PREVIEW_EVENTS)
            .map(|event| event.message.chars().take(PREVIEW_CHARS).collect())
            .collect()
    }
}

/// Wait for logs to propagate, then check that the newest stream
/// in the log group has events.
///
/// This is a single snapshot: a propagation delay longer than `wait`
/// is reported as a failure.
#[tracing::instrument(skip(client))]
pub async fn verify_log_events(
    client: &Client,
    log_group: &str,
    wait: Duration,
) -> Result<LogQueryResult, RuntimeError> {
    tokio::time::sleep(wait).await;
    println!("Checking for logs in CloudWatch log group: {log_group}");

    tracing::info!("listing log streams");
    let output = client
        .describe_log_streams()
        .log_group_name(log_group)
        .order_by(OrderBy::LastEventTime)
        .descending(true)
        .limit(MAX_STREAMS)
        .send()
        .await
        .map_err(Error::from)?;

    let streams: Vec<String> = output
        .log_streams
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| s.log_stream_name)
        .collect();

    let log_stream = match streams.first() {
        Some(name) => name.clone(),
        None => return Err(RuntimeError::NoLogStreams(log_group.into())),
    };

    tracing::info!(%log_stream, "fetching log events");
    let output = client
        .get_log_events()
        .log_group_name(log_group)
        .log_stream_name(&log_stream)
        .limit(MAX_EVENTS)
        .send()
        .await
        .map_err(Error::from)?;

    let events: Vec<LogEvent> = output
        .events
        .unwrap_or_default()
        .into_iter()
        .map(|e| LogEvent {
            timestamp: e.timestamp,
            message: e.message.unwrap_or_default(),
        })
        .collect();

    if events.is_empty() {
        return Err(RuntimeError::NoLogEvents(log_stream));
    }

    Ok(LogQueryResult { streams, events })
}
