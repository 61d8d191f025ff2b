/// Deployment the quote widget is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Sent as `X-CSRF-Token` on quote requests when the backend demands it.
    pub csrf_token: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Courier codes offered in the courier field, in display order.
    pub couriers: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[redacted]"))
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("couriers", &self.couriers)
            .finish()
    }
}
