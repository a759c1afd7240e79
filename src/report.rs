use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::session::Session;

const SEPARATOR_WIDTH: usize = 30;

/// One graded assertion within a case.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub label: String,
    pub passed: bool,
}

impl Check {
    pub fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed: true,
        }
    }

    pub fn fail(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum CaseVerdict {
    Pass,
    Fail,
    /// The case never produced a gradable response (transport or parse
    /// failure).
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub verdict: CaseVerdict,
    pub checks: Vec<Check>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub duration_ms: f64,
}

/// Everything one run produced, serializable as the JSON report.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub host: String,
    pub compiler_url: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn new(session: &Session, cases: Vec<CaseReport>) -> Self {
        Self {
            run_id: session.run_id,
            host: session.host.clone(),
            compiler_url: session.config.compiler_url.clone(),
            started_at: session.started_at,
            elapsed_secs: session.elapsed_secs(),
            cases,
        }
    }

    pub fn passed(&self) -> usize {
        self.count(|v| matches!(v, CaseVerdict::Pass))
    }

    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, CaseVerdict::Fail))
    }

    pub fn errored(&self) -> usize {
        self.count(|v| matches!(v, CaseVerdict::Error { .. }))
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.cases.len()
    }

    fn count(&self, pred: impl Fn(&CaseVerdict) -> bool) -> usize {
        self.cases.iter().filter(|c| pred(&c.verdict)).count()
    }
}

/// One case block in the transcript format the harness has always printed:
///
/// ```text
/// Running Test: Hello World...
///   [PASS] Status matches success
///   Output: Hello World
/// ------------------------------
/// ```
pub fn render_case(report: &CaseReport) -> String {
    let mut out = format!("Running Test: {}...\n", report.name);

    match &report.verdict {
        CaseVerdict::Error { message } => {
            out.push_str(&format!("  [ERROR] {}\n", message));
        }
        _ => {
            for check in &report.checks {
                let tag = if check.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}\n", tag, check.label));
            }
            if let Some(output) = &report.output {
                out.push_str(&format!("  Output: {}\n", output));
            }
        }
    }

    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
    out
}

pub fn render_summary(run: &RunReport) -> String {
    format!(
        "Ran {} cases: {} passed, {} failed, {} errored (in {:.2}s)\n",
        run.cases.len(),
        run.passed(),
        run.failed(),
        run.errored(),
        run.elapsed_secs
    )
}
