use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the built SPA
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Origin of the REST backend, e.g. "http://127.0.0.1:8000"
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[upstream]
base_url = "http://127.0.0.1:8000"
timeout_secs = 30
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if !config.upstream.base_url.starts_with("http://")
        && !config.upstream.base_url.starts_with("https://")
    {
        anyhow::bail!(
            "upstream.base_url must start with http:// or https://, got '{}'",
            config.upstream.base_url
        );
    }
    Ok(config)
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid server address '{}': {}", addr, e))
    }

    /// Resolves a relative static dir against the executable directory
    pub fn static_dir(&self) -> PathBuf {
        let dir = Path::new(&self.server.static_dir);
        if dir.is_absolute() {
            return dir.to_path_buf();
        }
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let resolved = exe_dir.join(dir);
                if resolved.exists() {
                    return resolved;
                }
            }
        }
        // `cargo run` from the workspace root
        PathBuf::from(&self.server.static_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_timeout_defaults_when_missing() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            static_dir = "/srv/agency"

            [upstream]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.static_dir(), PathBuf::from("/srv/agency"));
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let result = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            static_dir = "dist"

            [upstream]
            base_url = "api.example.com"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("[server]\nhost = \"0.0.0.0\"\nport = 1\nstatic_dir = \"d\"\n").is_err());
    }
}
