// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, DataConfig, HealthConfig, HttpConfig, LoggingConfig, SearchConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("CLIENTDESK").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "clientdesk/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("data.seed_file", "data/clients.toml")?
            .set_default("data.delete_policy", "restrict")?
            .set_default("search.scope", "all")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchScope;
    use crate::store::DeletePolicy;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.liveness_path, "/healthz");
        assert_eq!(cfg.data.delete_policy, DeletePolicy::Restrict);
        assert_eq!(cfg.search.scope, SearchScope::All);
        assert_eq!(cfg.performance.max_connections, None);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[data]
seed_file = "elsewhere.toml"
delete_policy = "cascade"

[search]
scope = "company"

[health]
enabled = false
"#
        )
        .unwrap();

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.data.seed_file, "elsewhere.toml");
        assert_eq!(cfg.data.delete_policy, DeletePolicy::Cascade);
        assert_eq!(cfg.search.scope, SearchScope::Company);
        assert!(!cfg.health.enabled);
        assert_eq!(cfg.health.readiness_path, "/readyz");
    }
}
