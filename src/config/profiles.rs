use serde::{Deserialize, Serialize};

/// Browser engine a profile runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEngine {
    Chromium,
    Firefox,
    Webkit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A named browser/device emulation variant. The engine runs the full spec
/// set once per profile, independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub engine: BrowserEngine,
    pub viewport: Viewport,
    pub device_scale_factor: f64,
    pub is_mobile: bool,
    pub has_touch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Profile {
    fn desktop(name: &str, engine: BrowserEngine) -> Self {
        Self {
            name: name.to_string(),
            engine,
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            device_scale_factor: 1.0,
            is_mobile: false,
            has_touch: false,
            user_agent: None,
        }
    }

    fn emulated(
        name: &str,
        engine: BrowserEngine,
        viewport: Viewport,
        device_scale_factor: f64,
        user_agent: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            engine,
            viewport,
            device_scale_factor,
            is_mobile: true,
            has_touch: true,
            user_agent: Some(user_agent.to_string()),
        }
    }
}

/// The declared browser/device matrix: three desktop engines, two phones,
/// one tablet.
pub(crate) fn default_profiles() -> Vec<Profile> {
    vec![
        Profile::desktop("chromium", BrowserEngine::Chromium),
        Profile::desktop("firefox", BrowserEngine::Firefox),
        Profile::desktop("webkit", BrowserEngine::Webkit),
        // Pixel 7
        Profile::emulated(
            "mobile-chrome",
            BrowserEngine::Chromium,
            Viewport {
                width: 412,
                height: 915,
            },
            2.625,
            "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/114.0.0.0 Mobile Safari/537.36",
        ),
        // iPhone 14
        Profile::emulated(
            "mobile-safari",
            BrowserEngine::Webkit,
            Viewport {
                width: 390,
                height: 664,
            },
            3.0,
            "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1",
        ),
        // iPad (gen 7) landscape
        Profile::emulated(
            "tablet",
            BrowserEngine::Webkit,
            Viewport {
                width: 1080,
                height: 810,
            },
            2.0,
            "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1",
        ),
    ]
}
