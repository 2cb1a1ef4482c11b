use std::env;

use crate::config::timings::SessionTimings;
use crate::error::ClientError;
use crate::ws::connection::JoinRequest;

/// Everything the headless client binary needs, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub api_url: String,
    pub api_token: Option<String>,
    pub join: JoinRequest,
    pub timings: SessionTimings,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        let server_url = must_var("TABLE_SERVER_URL")?;
        if !(server_url.starts_with("ws://") || server_url.starts_with("wss://")) {
            return Err(ClientError::config(format!(
                "TABLE_SERVER_URL must be a ws:// or wss:// URL, got '{server_url}'"
            )));
        }

        let join = JoinRequest {
            table_id: must_var("TABLE_ID")?,
            user_id: must_var("TABLE_USER_ID")?,
            username: must_var("TABLE_USERNAME")?,
            avatar_url: optional_var("TABLE_AVATAR_URL"),
            contest_id: optional_var("TABLE_CONTEST_ID"),
        };

        let mut timings = SessionTimings::default();
        if let Some(cadence) = parse_var::<i64>("TABLE_DEAL_CADENCE_MS")? {
            timings.animation.deal_cadence_ms = cadence.max(1);
        }
        if let Some(secs) = parse_var::<i64>("TABLE_RESTART_DELAY_SECS")? {
            timings.round.restart_delay_ms = secs.max(0) * 1_000;
        }

        Ok(Self {
            server_url,
            api_url: api_url(),
            api_token: optional_var("TABLE_API_TOKEN"),
            join,
            timings,
        })
    }
}

/// HTTP API base URL (defaults to the local dev server)
fn api_url() -> String {
    env::var("TABLE_API_URL").unwrap_or_else(|_| "http://localhost:5000/api".to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ClientError> {
    match optional_var(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            ClientError::config(format!("Environment variable '{name}' is not valid: '{raw}'"))
        }),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, ClientError> {
    env::var(name)
        .map_err(|_| ClientError::config(format!("Required environment variable '{name}' is not set")))
}
