use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest {
    pub app: String,
    pub joinable: bool,
    pub screen: Screen,
}

#[derive(Debug, Clone, Serialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 60,
        }
    }
}

impl SessionRequest {
    pub fn for_app(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            joinable: false,
            screen: Screen::default(),
        }
    }
}

/// Envelope every gateway endpoint answers with. Callers must check
/// `status_code` before trusting `metadata`.
#[derive(Debug, Deserialize)]
pub struct GatewayResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSummary {
    #[serde(default)]
    pub name: Option<String>,
}

impl GatewayResponse {
    pub fn has_status(&self, expected: u16) -> bool {
        self.status_code == Some(expected)
    }

    /// Names in upstream order; entries without a `name` are skipped.
    pub fn application_names(&self) -> Option<Vec<String>> {
        let entries: Vec<ApplicationSummary> =
            serde_json::from_value(self.metadata.clone()?).ok()?;
        Some(entries.into_iter().filter_map(|entry| entry.name).collect())
    }
}
