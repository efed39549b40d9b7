//! Server configuration.

use std::path::PathBuf;

/// People directory server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Optional JSON file with people loaded at startup
    pub seed_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Returns the `host:port` pair the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_ms: 5000, // 5 seconds default
            seed_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.seed_file.is_none());
    }
}
