// Configuration module entry point
// Loads the startup configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, ServerConfig, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_SERVER_NAME,
};

/// Environment variable naming a config file, e.g. `SPA_PREVIEW_CONFIG=~/preview.toml`
///
/// No file is looked up implicitly; the working directory is the content
/// being served.
pub const CONFIG_FILE_ENV: &str = "SPA_PREVIEW_CONFIG";

/// Environment variable prefix, e.g. `SPA_PREVIEW__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "SPA_PREVIEW";

impl Config {
    /// Load configuration from the environment, plus the file named by
    /// `SPA_PREVIEW_CONFIG` when set
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var(CONFIG_FILE_ENV).ok();
        Self::build(config_path.as_deref())
    }

    /// Load configuration from specified file path (extension inferred)
    ///
    /// The file must exist.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(Some(config_path))
    }

    /// Every key has a default so a bare invocation listens on `0.0.0.0:5001`
    fn build(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", types::DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// URL printed at startup for the developer to open
    ///
    /// Wildcard binds are shown as `localhost`.
    pub fn visit_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "localhost",
            other => other,
        };
        format!("http://{host}:{}", self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5001);
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.http.server_name, "spa-preview");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let cfg = Config::build(None).unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.logging.access_log_file.is_none());
    }

    #[test]
    fn test_served_directory_config_ignored() {
        // A project that ships its own spa-preview.json must not move the port
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("spa-preview.json"), r#"{"server":{"port":9999}}"#).unwrap();
        std::fs::write(dir.path().join("spa-preview.toml"), "[server]\nport = 9999\n").unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let cfg = Config::build(None);
        std::env::set_current_dir(previous).unwrap();

        assert_eq!(cfg.unwrap().server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(Config::load_from("does-not-exist/spa-preview-test").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 8088\nworkers = 2\n\n[logging]\naccess_log = false\n",
        )
        .unwrap();

        let base = dir.path().join("custom");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.workers, Some(2));
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.http.server_name, "spa-preview");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:5001".parse::<SocketAddr>().unwrap()
        );

        let mut bad = Config::default();
        bad.server.host = "not a host".to_string();
        assert!(bad.get_socket_addr().is_err());
    }

    #[test]
    fn test_visit_url() {
        let mut cfg = Config::default();
        assert_eq!(cfg.visit_url(), "http://localhost:5001");

        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 8080;
        assert_eq!(cfg.visit_url(), "http://127.0.0.1:8080");
    }
}
