use std::time::Duration;

use tokio::time::sleep;
use url::Url;

use crate::error::{ProbeError, Result};
use crate::protocol::{CompileRequest, CompileResponse, SourceFile};

const READY_ATTEMPTS: u32 = 50;
const READY_DELAY: Duration = Duration::from_millis(100);

/// Client for the remote compile-and-run service.
#[derive(Debug, Clone)]
pub struct CompileClient {
    http: reqwest::Client,
    base_url: Url,
    compile_url: Url,
}

impl CompileClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ProbeError::BadUrl {
            url: base_url.into(),
            source: e,
        })?;
        let compile_url = parsed.join("compile").map_err(|e| ProbeError::BadUrl {
            url: base_url.into(),
            source: e,
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
            compile_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Submit one set of source files and parse the service's verdict. The
    /// verdict lives in the JSON body; the HTTP status is deliberately not
    /// consulted.
    pub async fn submit(&self, files: &[SourceFile], stdin: &str) -> Result<CompileResponse> {
        let req = CompileRequest::new(files, stdin);

        tracing::debug!("submitting {} file(s) to {}", files.len(), self.compile_url);
        let resp = self
            .http
            .post(self.compile_url.clone())
            .json(&req)
            .send()
            .await?;

        let raw = resp.text().await?;
        serde_json::from_str(&raw).map_err(|e| ProbeError::InvalidResponse {
            reason: e.to_string(),
            raw: snippet(&raw),
        })
    }

    /// Poll until the service answers anything at all. An HTTP error status
    /// still counts as alive; only transport failures keep us waiting.
    pub async fn wait_until_ready(&self) -> Result<()> {
        for _ in 0..READY_ATTEMPTS {
            if self.http.get(self.base_url.clone()).send().await.is_ok() {
                return Ok(());
            }
            sleep(READY_DELAY).await;
        }
        Err(ProbeError::Unreachable(self.base_url.to_string()))
    }
}

fn snippet(raw: &str) -> String {
    const MAX_CHARS: usize = 200;
    let trimmed = raw.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        trimmed.into()
    } else {
        let mut cut: String = trimmed.chars().take(MAX_CHARS).collect();
        cut.push_str("...");
        cut
    }
}
