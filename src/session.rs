use crate::config::Config;
use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

/// Metadata for one harness run, captured once at startup.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub host: String,
    start_time: Instant,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".into());

        Self {
            config,
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            host,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
