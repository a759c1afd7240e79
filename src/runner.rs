use std::time::Instant;

use regex::Regex;

use crate::client::CompileClient;
use crate::protocol::{CompileResponse, CompileStatus};
use crate::report::{CaseReport, CaseVerdict, Check};
use crate::suite::TestCase;

/// Drives a suite against the service, one case at a time.
pub struct Runner {
    client: CompileClient,
}

impl Runner {
    pub fn new(client: CompileClient) -> Self {
        Self { client }
    }

    /// Submit one case and grade the response.
    pub async fn run_case(&self, case: &TestCase) -> CaseReport {
        tracing::info!("running case '{}'", case.name);
        let start = Instant::now();

        let outcome = self.client.submit(&case.files, &case.stdin).await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        match outcome {
            Ok(resp) => grade(case, &resp, duration_ms),
            Err(e) => {
                tracing::warn!("case '{}' produced no verdict: {}", case.name, e);
                CaseReport {
                    name: case.name.clone(),
                    verdict: CaseVerdict::Error {
                        message: e.to_string(),
                    },
                    checks: Vec::new(),
                    output: None,
                    duration_ms,
                }
            }
        }
    }

    pub async fn run_all(&self, cases: &[TestCase]) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(self.run_case(case).await);
        }
        reports
    }
}

fn grade(case: &TestCase, resp: &CompileResponse, duration_ms: f64) -> CaseReport {
    let expect = &case.expect;
    let mut checks = Vec::new();

    let status_ok = resp.status == Some(expect.status);
    checks.push(if status_ok {
        Check::pass(format!("Status matches {}", expect.status))
    } else {
        let got = match resp.status {
            Some(status) => status.to_string(),
            None if resp.error.is_empty() => "no status".to_string(),
            None => format!("no status ({})", resp.error),
        };
        Check::fail(format!("Expected {}, got {}", expect.status, got))
    });

    let output = resp.output.trim();
    if status_ok && expect.status == CompileStatus::Success {
        if let Some(want) = &expect.output {
            let want = want.trim();
            checks.push(if output == want {
                Check::pass(format!("Output equals \"{}\"", want))
            } else {
                Check::fail(format!("Expected output \"{}\", got \"{}\"", want, output))
            });
        }

        if let Some(want) = &expect.output_contains {
            checks.push(if output.contains(want.as_str()) {
                Check::pass(format!("Output contains \"{}\"", want))
            } else {
                Check::fail(format!("Output does not contain \"{}\"", want))
            });
        }

        if let Some(pattern) = &expect.output_matches {
            // Patterns are validated at suite load; a bad one still grades
            // as a failed check rather than a crash.
            checks.push(match Regex::new(pattern) {
                Ok(re) if re.is_match(output) => {
                    Check::pass(format!("Output matches /{}/", pattern))
                }
                Ok(_) => Check::fail(format!("Output does not match /{}/", pattern)),
                Err(e) => Check::fail(format!("Invalid pattern /{}/: {}", pattern, e)),
            });
        }
    }

    if expect.ai_suggestion {
        checks.push(match &resp.ai_suggestion {
            Some(s) if !s.explanation.trim().is_empty() => {
                Check::pass(format!("AI Suggestion received: {}", s.explanation.trim()))
            }
            Some(_) => Check::fail("AI Suggestion has no explanation"),
            None => Check::fail("AI Suggestion missing"),
        });
    }

    let passed = checks.iter().all(|c| c.passed);
    CaseReport {
        name: case.name.clone(),
        verdict: if passed {
            CaseVerdict::Pass
        } else {
            CaseVerdict::Fail
        },
        checks,
        output: match resp.status {
            Some(CompileStatus::Success) => Some(output.to_string()),
            _ => None,
        },
        duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{AiSuggestion, SourceFile};
    use crate::suite::Expectation;

    fn case(expect: Expectation) -> TestCase {
        TestCase {
            name: "A Case".to_string(),
            files: vec![SourceFile::new("main.cpp", "int main() { return 0; }")],
            stdin: String::new(),
            expect,
        }
    }

    fn response(raw: &str) -> CompileResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_grade_success_with_output() {
        let case = case(Expectation {
            output: Some("Hello World".to_string()),
            ..Default::default()
        });
        let resp = response(r#"{"status": "success", "output": "Hello World\n"}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Pass);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.output.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_grade_wrong_status() {
        let case = case(Expectation {
            status: CompileStatus::Error,
            ..Default::default()
        });
        let resp = response(r#"{"status": "success", "output": ""}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Fail);
        assert_eq!(report.checks[0].label, "Expected error, got success");
    }

    #[test]
    fn test_grade_missing_status_carries_service_error() {
        let case = case(Expectation::default());
        let resp = response(r#"{"error": "No source files provided."}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Fail);
        assert_eq!(
            report.checks[0].label,
            "Expected success, got no status (No source files provided.)"
        );
        assert!(report.output.is_none());
    }

    #[test]
    fn test_grade_output_mismatch() {
        let case = case(Expectation {
            output: Some("Hello User".to_string()),
            ..Default::default()
        });
        let resp = response(r#"{"status": "success", "output": "Hello "}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Fail);
        assert!(report.checks[1].label.contains("Expected output"));
    }

    #[test]
    fn test_grade_output_contains_and_matches() {
        let case = case(Expectation {
            output_contains: Some("red-blue".to_string()),
            output_matches: Some(r"^red-\w+$".to_string()),
            ..Default::default()
        });
        let resp = response(r#"{"status": "success", "output": "red-blue\n"}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Pass);
        assert_eq!(report.checks.len(), 3);
    }

    #[test]
    fn test_grade_skips_output_checks_on_error_expectation() {
        let case = case(Expectation {
            status: CompileStatus::Error,
            output: Some("ignored".to_string()),
            ..Default::default()
        });
        let resp = response(r#"{"status": "error", "error": "boom"}"#);

        let report = grade(&case, &resp, 1.0);
        // Only the status check runs; there is no program output to grade.
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.verdict, CaseVerdict::Pass);
    }

    #[test]
    fn test_grade_ai_suggestion_required_and_present() {
        let case = case(Expectation {
            status: CompileStatus::Error,
            ai_suggestion: true,
            ..Default::default()
        });
        let mut resp = response(r#"{"status": "error", "error": "expected ';'"}"#);
        resp.ai_suggestion = Some(AiSuggestion {
            fixed_files: Vec::new(),
            explanation: "A semicolon is missing.".to_string(),
        });

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Pass);
        assert!(report.checks[1]
            .label
            .starts_with("AI Suggestion received: A semicolon is missing."));
    }

    #[test]
    fn test_grade_ai_suggestion_missing() {
        let case = case(Expectation {
            status: CompileStatus::Error,
            ai_suggestion: true,
            ..Default::default()
        });
        let resp = response(r#"{"status": "error", "error": "expected ';'"}"#);

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Fail);
        assert_eq!(report.checks[1].label, "AI Suggestion missing");
    }

    #[test]
    fn test_grade_ai_suggestion_empty_explanation() {
        let case = case(Expectation {
            status: CompileStatus::Error,
            ai_suggestion: true,
            ..Default::default()
        });
        let mut resp = response(r#"{"status": "error", "error": "boom"}"#);
        resp.ai_suggestion = Some(AiSuggestion {
            fixed_files: Vec::new(),
            explanation: "   ".to_string(),
        });

        let report = grade(&case, &resp, 1.0);
        assert_eq!(report.verdict, CaseVerdict::Fail);
        assert_eq!(report.checks[1].label, "AI Suggestion has no explanation");
    }
}
