//! Demo configuration loaded from environment variables.

use std::time::Duration;

use queue::QueueConfig;

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `QUEUE_BATCH_SIZE` — max messages per consumer batch (default: `10`)
/// - `QUEUE_VISIBILITY_TIMEOUT_MS` — redelivery delay for unacked
///   messages (default: `200`)
/// - `QUEUE_MAX_RECEIVE_COUNT` — deliveries before dead-lettering
///   (default: `3`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub batch_size: usize,
    pub visibility_timeout: Duration,
    pub max_receive_count: u32,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            batch_size: std::env::var("QUEUE_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            visibility_timeout: Duration::from_millis(
                std::env::var("QUEUE_VISIBILITY_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(200),
            ),
            max_receive_count: std::env::var("QUEUE_MAX_RECEIVE_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Maps the queue-related settings into a transport config.
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            max_batch_size: self.batch_size,
            visibility_timeout: self.visibility_timeout,
            max_receive_count: self.max_receive_count,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: 10,
            visibility_timeout: Duration::from_millis(200),
            max_receive_count: 3,
            log_level: "info".to_string(),
        }
    }
}
