//! Centralized configuration for Ladle.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

/// Central configuration for all Ladle components.
///
/// Groups related settings into logical sections. Defaults are suitable for
/// local development; the CLI overrides individual fields from flags.
#[derive(Debug, Clone, Default)]
pub struct LadleConfig {
    pub server: ServerConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind the listener to
    pub host: String,
    /// Port to bind the listener to
    pub port: u16,
}

impl ServerConfig {
    /// Returns the `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        let config = LadleConfig::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_bind_address_reflects_overrides() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(server.bind_address(), "0.0.0.0:8080");
    }
}
