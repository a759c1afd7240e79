use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::protocol::{CompileStatus, SourceFile};

/// One submission to grade: source files, optional stdin, and what the
/// service is expected to answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub files: Vec<SourceFile>,
    #[serde(default)]
    pub stdin: String,
    #[serde(default)]
    pub expect: Expectation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expectation {
    /// Required JSON status; defaults to `success`.
    #[serde(default)]
    pub status: CompileStatus,
    /// Exact match against the trimmed program output.
    #[serde(default)]
    pub output: Option<String>,
    /// Substring match against the trimmed program output.
    #[serde(default)]
    pub output_contains: Option<String>,
    /// Regex match against the trimmed program output.
    #[serde(default)]
    pub output_matches: Option<String>,
    /// When true, the response must carry an AI suggestion with a non-empty
    /// explanation.
    #[serde(default)]
    pub ai_suggestion: bool,
}

/// Validates a case before it is submitted:
/// - non-empty name, at least one source file
/// - plain file names (they become files inside the service's sandbox)
/// - `output_matches` compiles as a regex
pub fn validate_case(case: &TestCase) -> Result<(), String> {
    if case.name.trim().is_empty() {
        return Err("Case name cannot be empty".to_string());
    }

    if case.files.is_empty() {
        return Err(format!("Case '{}' has no source files", case.name));
    }

    for file in &case.files {
        validate_file_name(&file.name).map_err(|e| format!("Case '{}': {}", case.name, e))?;
    }

    if let Some(pattern) = &case.expect.output_matches {
        Regex::new(pattern)
            .map_err(|e| format!("Case '{}': invalid output_matches pattern: {}", case.name, e))?;
    }

    Ok(())
}

/// File names travel to the service verbatim and land on its filesystem.
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("File name cannot be empty".to_string());
    }

    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(format!(
            "Invalid file name '{}': path traversal not allowed",
            name
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_with_file(name: &str) -> TestCase {
        TestCase {
            name: "A Case".to_string(),
            files: vec![SourceFile::new(name, "int main() { return 0; }")],
            stdin: String::new(),
            expect: Expectation::default(),
        }
    }

    #[test]
    fn test_validate_file_name_valid() {
        assert!(validate_file_name("main.cpp").is_ok());
        assert!(validate_file_name("util_v2.cpp").is_ok());
        assert!(validate_file_name("with space.cpp").is_ok());
    }

    #[test]
    fn test_validate_file_name_invalid() {
        // Empty
        assert!(validate_file_name("").is_err());

        // Path traversal
        assert!(validate_file_name("../main.cpp").is_err());
        assert!(validate_file_name("sub/main.cpp").is_err());
        assert!(validate_file_name("sub\\main.cpp").is_err());
        assert!(validate_file_name("..").is_err());
    }

    #[test]
    fn test_validate_case_valid() {
        assert!(validate_case(&case_with_file("main.cpp")).is_ok());
    }

    #[test]
    fn test_validate_case_empty_name() {
        let mut case = case_with_file("main.cpp");
        case.name = "  ".to_string();
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn test_validate_case_no_files() {
        let mut case = case_with_file("main.cpp");
        case.files.clear();
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn test_validate_case_bad_pattern() {
        let mut case = case_with_file("main.cpp");
        case.expect.output_matches = Some("[unclosed".to_string());
        let err = validate_case(&case).unwrap_err();
        assert!(err.contains("output_matches"));
    }

    #[test]
    fn test_expectation_defaults_to_success() {
        let expect = Expectation::default();
        assert_eq!(expect.status, CompileStatus::Success);
        assert!(!expect.ai_suggestion);
        assert!(expect.output.is_none());
    }
}
