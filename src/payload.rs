use chrono::{DateTime, SecondsFormat, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::fmt;

/// Actions a synthetic user can perform
pub const ACTIONS: [&str; 9] = [
    "login", "logout", "view", "edit", "delete", "create", "update", "download", "upload",
];

/// HTTP-like status codes reported by the synthetic events
pub const STATUS_CODES: [u16; 8] = [200, 201, 204, 400, 401, 403, 404, 500];

/// Inclusive range of the synthetic request duration, in milliseconds
pub const DURATION_MS_RANGE: std::ops::RangeInclusive<u32> = 10..=5000;

const USER_POOL_SIZE: usize = 5;

/// Log level written into generated payloads.
#[derive(clap::ArgEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// DEBUG
    #[clap(name = "DEBUG")]
    Debug,
    /// INFO
    #[clap(name = "INFO")]
    Info,
    /// WARNING
    #[clap(name = "WARNING")]
    Warning,
    /// ERROR
    #[clap(name = "ERROR")]
    Error,
    /// CRITICAL
    #[clap(name = "CRITICAL")]
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        })
    }
}

/// `TestPayload` is the event sent to the function under test
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TestPayload {
    /// Always true, lets the function tell test traffic apart
    pub test_event: bool,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
    /// Free text message
    pub message: String,
    /// Level the function should log the event with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    /// Event metadata
    pub metadata: Metadata,
}

/// `Metadata` describes where a test event comes from.
/// Generated events carry the synthetic request fields as well.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metadata {
    /// Tool that sent the event
    pub source: String,
    /// 1-based sequence number within a load generation run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_number: Option<u32>,
    /// Environment tag
    pub environment: String,
    /// Synthetic user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Synthetic user action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Synthetic request duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u32>,
    /// Synthetic HTTP status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl TestPayload {
    /// The single event sent by the end-to-end check.
    pub fn pipeline_check(now: DateTime<Utc>) -> TestPayload {
        TestPayload {
            test_event: true,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            message: "CI/CD test event".into(),
            log_level: None,
            metadata: Metadata {
                source: "cicd-test-script".into(),
                environment: "test".into(),
                ..Default::default()
            },
        }
    }

    /// Generate the payload for invocation `invocation_number` with random request fields.
    pub fn generate(invocation_number: u32, log_level: LogLevel) -> TestPayload {
        TestPayload::generate_with(&mut rand::thread_rng(), Utc::now(), invocation_number, log_level)
    }

    /// Same as [`TestPayload::generate`] with an explicit random source and clock.
    pub fn generate_with<R: Rng>(
        rng: &mut R,
        now: DateTime<Utc>,
        invocation_number: u32,
        log_level: LogLevel,
    ) -> TestPayload {
        let users: Vec<String> = (0..USER_POOL_SIZE)
            .map(|_| format!("user-{}", rng.gen_range(1000..=9999)))
            .collect();

        TestPayload {
            test_event: true,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
            message: format!("Test event #{invocation_number} with {log_level} level"),
            log_level: Some(log_level),
            metadata: Metadata {
                source: "invoke_lambda".into(),
                invocation_number: Some(invocation_number),
                environment: "test".into(),
                user_id: users.choose(rng).cloned(),
                action: ACTIONS.choose(rng).map(|a| a.to_string()),
                duration_ms: Some(rng.gen_range(DURATION_MS_RANGE)),
                status_code: STATUS_CODES.choose(rng).copied(),
            },
        }
    }

    /// Serialize the payload to the JSON bytes sent on the wire.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
