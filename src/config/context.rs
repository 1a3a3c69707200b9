use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default base address when no `BASE_URL` override is present
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// When the engine should capture a given artifact for a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapturePolicy {
    On,
    Off,
    OnFirstRetry,
    OnlyOnFailure,
    RetainOnFailure,
}

/// Options shared by every test unless a profile overrides them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunContext {
    /// Base network address for page navigation and API calls
    pub base_url: String,

    pub trace: CapturePolicy,
    pub screenshot: CapturePolicy,
    pub video: CapturePolicy,

    /// Locale emulation
    pub locale: String,

    /// Timezone emulation
    pub timezone_id: String,

    /// Headers attached to every request
    pub extra_headers: BTreeMap<String, String>,
}

impl RunContext {
    pub(crate) fn resolve(base_url_override: Option<&str>) -> Self {
        let mut extra_headers = BTreeMap::new();
        extra_headers.insert("x-e2e".to_string(), "1".to_string());

        Self {
            base_url: base_url_override.unwrap_or(DEFAULT_BASE_URL).to_string(),
            trace: CapturePolicy::OnFirstRetry,
            screenshot: CapturePolicy::OnlyOnFailure,
            video: CapturePolicy::RetainOnFailure,
            locale: "en-US".to_string(),
            timezone_id: "UTC".to_string(),
            extra_headers,
        }
    }
}
