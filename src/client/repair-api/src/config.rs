//! Backend connection settings.

use std::time::Duration;

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Default address of the client portal, linked from the staff console.
pub const DEFAULT_PORTAL_URL: &str = "http://localhost:3001";
/// Default transport timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base API URL, without trailing slash.
    pub base_url: String,
    /// Companion client-portal URL (staff console only).
    pub portal_url: String,
    /// Transport timeout per request.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads `REPAIR_API_URL`, `REPAIR_PORTAL_URL` and
    /// `REPAIR_HTTP_TIMEOUT_SECS`, keeping defaults for unset or invalid
    /// values. A zero timeout would fail every request and counts as invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("REPAIR_API_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }

        if let Some(url) = lookup("REPAIR_PORTAL_URL").filter(|v| !v.trim().is_empty()) {
            config.portal_url = url;
        }

        if let Some(secs) = lookup("REPAIR_HTTP_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(s) if s > 0 => config.timeout = Duration::from_secs(s),
                _ => {},
            }
        }

        config.normalized()
    }

    /// Builder-style override of the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.portal_url = self.portal_url.trim().to_string();
        self
    }
}
