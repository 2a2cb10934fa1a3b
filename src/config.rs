use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const HTTP_ADDR_VAR: &str = "CRONOGRAMA_HTTP_ADDR";
pub const DATA_DIR_VAR: &str = "CRONOGRAMA_DATA_DIR";
pub const TASK_DB_VAR: &str = "CRONOGRAMA_TASK_DB";
pub const STORE_VAR: &str = "CRONOGRAMA_STORE";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const FALLBACK_DATA_DIR: &str = ".cronograma";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddress { value: String, reason: String },
    UnknownStore(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddress { value, reason } => {
                write!(f, "{HTTP_ADDR_VAR}='{value}' is not a socket address: {reason}")
            }
            ConfigError::UnknownStore(value) => {
                write!(f, "{STORE_VAR}='{value}' must be 'json' or 'sqlite'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub data_dir: PathBuf,
    /// SQLite file backing the task resource; in-memory when unset.
    pub task_db: Option<PathBuf>,
    pub store: StoreKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = non_empty(HTTP_ADDR_VAR).unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err: std::net::AddrParseError| ConfigError::InvalidAddress {
                value: raw_addr.clone(),
                reason: err.to_string(),
            })?;

        let data_dir = non_empty(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let task_db = non_empty(TASK_DB_VAR).map(PathBuf::from);

        let store = match non_empty(STORE_VAR) {
            None => StoreKind::Json,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "json" => StoreKind::Json,
                "sqlite" => StoreKind::Sqlite,
                _ => return Err(ConfigError::UnknownStore(value)),
            },
        };

        Ok(Self {
            http_addr,
            data_dir,
            task_db,
            store,
        })
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join("projects.sqlite")
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "cronograma")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.task_db, None);
        assert_eq!(config.store, StoreKind::Json);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            (HTTP_ADDR_VAR, "127.0.0.1:8080"),
            (DATA_DIR_VAR, "/tmp/cronograma-data"),
            (TASK_DB_VAR, "/tmp/tasks.sqlite"),
            (STORE_VAR, "SQLite"),
        ])
        .unwrap();
        assert_eq!(config.http_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cronograma-data"));
        assert_eq!(config.task_db, Some(PathBuf::from("/tmp/tasks.sqlite")));
        assert_eq!(config.store, StoreKind::Sqlite);
        assert_eq!(
            config.sqlite_path(),
            PathBuf::from("/tmp/cronograma-data/projects.sqlite")
        );
    }

    #[test]
    fn bad_address_is_reported() {
        let err = config_from(&[(HTTP_ADDR_VAR, "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
        assert!(err.to_string().contains(HTTP_ADDR_VAR));
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = config_from(&[(STORE_VAR, "postgres")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownStore("postgres".into()));
    }
}
