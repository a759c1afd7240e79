use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /compile`. The service expects the file list JSON-encoded
/// into the `codeFiles` string field (it parses that field itself), not
/// inlined as an array.
#[derive(Debug, Serialize)]
pub struct CompileRequest {
    #[serde(rename = "codeFiles")]
    pub code_files: String,
    pub stdin: String,
}

impl CompileRequest {
    pub fn new(files: &[SourceFile], stdin: &str) -> Self {
        Self {
            code_files: serde_json::to_string(files).unwrap_or_default(),
            stdin: stdin.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompileStatus {
    #[default]
    Success,
    Error,
}

impl std::fmt::Display for CompileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CompileStatus::Success => "success",
            CompileStatus::Error => "error",
        })
    }
}

/// Returned by the service when a build or run fails and its AI analysis
/// produced a diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSuggestion {
    #[serde(default)]
    pub fixed_files: Vec<SourceFile>,
    #[serde(default)]
    pub explanation: String,
}

/// Response body of `POST /compile`. `status` is absent on service-level
/// failures (400/500 bodies carry only `error`/`details`).
#[derive(Debug, Clone, Deserialize)]
pub struct CompileResponse {
    pub status: Option<CompileStatus>,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: String,
    pub ai_suggestion: Option<AiSuggestion>,
    pub details: Option<String>,
}
