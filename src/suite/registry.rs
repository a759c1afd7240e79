use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs;

use super::types::{validate_case, Expectation, TestCase};
use crate::error::{ProbeError, Result};
use crate::protocol::{CompileStatus, SourceFile};

/// One YAML suite file: a named group of test cases.
#[derive(Debug, Deserialize)]
pub struct SuiteFile {
    pub name: String,
    pub cases: Vec<TestCase>,
}

/// Loads test suites from a directory of YAML files.
pub struct SuiteRegistry {
    suite_dir: PathBuf,
}

impl SuiteRegistry {
    pub fn new(suite_dir: PathBuf) -> Self {
        Self { suite_dir }
    }

    /// Load every `*.yaml`/`*.yml` file under the suite directory, in
    /// file-name order. Every case is validated; a run with zero cases is
    /// always a configuration mistake, so it is an error.
    pub async fn load_all(&self) -> Result<Vec<TestCase>> {
        if !self.suite_dir.is_dir() {
            return Err(ProbeError::Suite(format!(
                "{} is not a directory",
                self.suite_dir.display()
            )));
        }

        let mut entries = fs::read_dir(&self.suite_dir).await?;
        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match path.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => paths.push(path),
                _ => continue,
            }
        }

        paths.sort();

        let mut cases = Vec::new();
        for path in paths {
            let content = fs::read_to_string(&path).await?;
            let suite: SuiteFile =
                serde_yaml::from_str(&content).map_err(|e| ProbeError::SuiteFile {
                    path: path.clone(),
                    source: e,
                })?;

            for case in &suite.cases {
                validate_case(case).map_err(ProbeError::Suite)?;
            }

            tracing::debug!(
                "loaded suite '{}' from {} ({} cases)",
                suite.name,
                path.display(),
                suite.cases.len()
            );
            cases.extend(suite.cases);
        }

        if cases.is_empty() {
            return Err(ProbeError::Suite(format!(
                "no test cases found under {}",
                self.suite_dir.display()
            )));
        }

        Ok(cases)
    }
}

/// The canonical smoke suite: the four checks this harness runs against a
/// fresh deployment when no suite directory is configured.
pub fn builtin_suite() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "Hello World".to_string(),
            files: vec![SourceFile::new(
                "main.cpp",
                "#include <iostream>\nint main() { std::cout << \"Hello World\"; return 0; }",
            )],
            stdin: String::new(),
            expect: Expectation {
                output: Some("Hello World".to_string()),
                ..Default::default()
            },
        },
        TestCase {
            name: "Input Handling".to_string(),
            files: vec![SourceFile::new(
                "main.cpp",
                "#include <iostream>\n#include <string>\nint main() { std::string s; std::cin >> s; std::cout << \"Hello \" << s; return 0; }",
            )],
            stdin: "User".to_string(),
            expect: Expectation {
                output: Some("Hello User".to_string()),
                ..Default::default()
            },
        },
        TestCase {
            name: "Compile Error (Missing Semicolon)".to_string(),
            files: vec![SourceFile::new(
                "main.cpp",
                "#include <iostream>\nint main() { std::cout << \"Error\" return 0; }",
            )],
            stdin: String::new(),
            expect: Expectation {
                status: CompileStatus::Error,
                ai_suggestion: true,
                ..Default::default()
            },
        },
        TestCase {
            name: "Compile Error (Missing Header)".to_string(),
            files: vec![SourceFile::new(
                "main.cpp",
                "int main() { std::vector<int> v; return 0; }",
            )],
            stdin: String::new(),
            expect: Expectation {
                status: CompileStatus::Error,
                ai_suggestion: true,
                ..Default::default()
            },
        },
    ]
}
