use anyhow::{bail, Context, Result};
use coffer_core::{KvStore, MemoryStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Broker configuration, environment-driven.
///
/// `COFFER__STORE` selects the backing store by name (`memory` by default);
/// `COFFER__SQLITE_PATH` points the sqlite store at its database file.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub store: String,
    pub sqlite_path: Option<PathBuf>,
}

impl BrokerConfig {
    pub fn from_env() -> Self {
        let store = std::env::var("COFFER__STORE").unwrap_or_else(|_| "memory".into());
        let sqlite_path = std::env::var("COFFER__SQLITE_PATH").ok().map(PathBuf::from);
        Self { store, sqlite_path }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            store: "memory".into(),
            sqlite_path: None,
        }
    }
}

/// Bind the store named by the configuration.
pub fn bind_store(config: &BrokerConfig) -> Result<Arc<dyn KvStore>> {
    match config.store.as_str() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "sqlite" => {
            let path = config
                .sqlite_path
                .clone()
                .context("sqlite store requires COFFER__SQLITE_PATH")?;
            let store = SqliteStore::open(&path)
                .with_context(|| format!("failed to open sqlite store at {}", path.display()))?;
            Ok(Arc::new(store))
        }
        other => bail!("unsupported store `{other}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_binds_by_default() {
        let config = BrokerConfig::default();
        assert!(bind_store(&config).is_ok());
    }

    #[test]
    fn sqlite_store_requires_a_path() {
        let config = BrokerConfig {
            store: "sqlite".into(),
            sqlite_path: None,
        };
        assert!(bind_store(&config).is_err());
    }

    #[test]
    fn unknown_store_names_are_rejected() {
        let config = BrokerConfig {
            store: "etcd".into(),
            sqlite_path: None,
        };
        assert!(bind_store(&config).is_err());
    }
}
