//! Smoke-test harness for a remote compile-and-run service.
//!
//! Submits source-file payloads to the service's `POST /compile` endpoint,
//! grades the JSON verdicts (including the AI-generated fix suggestions the
//! service attaches to failed builds), and renders a pass/fail transcript.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod report;
pub mod runner;
pub mod session;
pub mod suite;

pub use client::CompileClient;
pub use config::Config;
pub use error::{ProbeError, Result};
pub use runner::Runner;
pub use session::Session;
