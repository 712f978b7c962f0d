//! Service configuration from the environment.

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Host or IP to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Reads `MEDLENS_HOST` and `MEDLENS_PORT`, falling back to defaults.
    ///
    /// An unparseable port is ignored.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("MEDLENS_HOST").ok(),
            std::env::var("MEDLENS_PORT").ok(),
        )
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: host.filter(|h| !h.trim().is_empty()).unwrap_or(defaults.host),
            port: port.and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
        }
    }

    /// Returns `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
