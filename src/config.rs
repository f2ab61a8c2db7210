use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub seed: SeedConfig,

    pub observability: ObservabilityConfig,

    /// File this config was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Tokio worker threads; 0 lets tokio use one per core.
    pub worker_threads: usize,

    /// Upper bound of the SQLite connection pool.
    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/bloggr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Memory per password hash, in KiB.
    pub argon2_memory_cost_kib: u32,

    /// Passes over memory.
    pub argon2_time_cost: u32,

    /// Lanes.
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the example users and posts when the user table is empty.
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Reads the first config file found in [`Config::search_paths`], or
    /// falls back to defaults when none exists.
    ///
    /// Runs before tracing is installed, so nothing is logged here; callers
    /// report [`Config::source`] once logging is up.
    pub fn load() -> Result<Self> {
        match Self::search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;

        let mut config: Self =
            toml::from_str(&raw).with_context(|| format!("Invalid TOML in {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// `./config.toml`, then the platform config dir, then `~/.bloggr`.
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];
        paths.extend(dirs::config_dir().map(|dir| dir.join("bloggr").join("config.toml")));
        paths.extend(dirs::home_dir().map(|home| home.join(".bloggr").join("config.toml")));
        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        argon2::Params::new(
            self.security.argon2_memory_cost_kib,
            self.security.argon2_time_cost,
            self.security.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(())
    }

    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.database_path, "sqlite:data/bloggr.db");
        assert_eq!(config.server.port, 8000);
        assert!(config.seed.enabled);
        assert!(config.source.is_none());
        assert_eq!(config.listen_address(), "127.0.0.1:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[security]"));
    }

    #[test]
    fn search_starts_in_working_directory() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from("config.toml"));
        assert!(paths.iter().skip(1).all(|p| p.ends_with("config.toml")));
    }

    #[test]
    fn loads_partial_file_from_path() {
        let path =
            std::env::temp_dir().join(format!("bloggr-config-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[seed]\nenabled = false\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.seed.enabled);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));

        std::fs::remove_file(&path).ok();
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 9090
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 9090);

        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.security.argon2_time_cost, 3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.security.argon2_time_cost = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.database_path = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
