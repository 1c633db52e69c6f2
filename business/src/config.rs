use log::{info, warn};
use serde::Deserialize;

/// Environment variables read by [`BusinessConfig::from_env`].
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    institutions_api_base_url: Option<String>,
    institutions_use_fixtures: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Serve the list from the built-in demo records instead of the API.
    pub use_fixtures: bool,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            use_fixtures: false,
        }
    }

    /// Defaults overridden by `INSTITUTIONS_API_BASE_URL` and
    /// `INSTITUTIONS_USE_FIXTURES`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let raw: RawConfig = serde_env::from_iter(vars).unwrap_or_else(|err| {
            warn!("Ignoring invalid institutions configuration: {err}");
            RawConfig::default()
        });

        let defaults = Self::default();
        let config = Self {
            api_base_url: raw
                .institutions_api_base_url
                .unwrap_or(defaults.api_base_url),
            use_fixtures: raw.institutions_use_fixtures.unwrap_or(defaults.use_fixtures),
        };
        info!(
            "Institutions API at {:?} (fixtures: {})",
            config.api_base_url, config.use_fixtures
        );
        config
    }

    /// Collection endpoint, `{base}/institution`.
    pub fn institution_url(&self) -> String {
        format!("{}/institution", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                String::new()
            } else {
                "http://localhost:8080".to_string()
            },
            use_fixtures: true,
        }
    }
}
