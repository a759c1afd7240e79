use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub compiler_url: String,
    pub request_timeout: u64,
    pub suite_dir: Option<String>,
    pub report_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            compiler_url: env::var("COMPILER_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            request_timeout: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            suite_dir: env::var("SUITE_DIR").ok(),
            report_path: env::var("REPORT_PATH").ok(),
        }
    }
}
