use derive_builder::Builder;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mangadex.org";

/// Settings fixed at client construction.
#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned", setter(into), build_fn(error = "crate::MangadexError"))]
pub struct ClientConfig {
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    pub(crate) base_url: String,
    /// Applies to the whole request, connect through body.
    #[builder(default = "Duration::from_secs(5)")]
    pub(crate) timeout: Duration,
    #[builder(default = "default_user_agent()")]
    pub(crate) user_agent: String,
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            user_agent: default_user_agent(),
        }
    }
}
