// db/persistence.rs
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use super::db::StoreError;
use crate::config::{Config, PersistenceKind};

/// Key/value backend mirroring each collection as one JSON document.
#[async_trait]
pub trait Persistence: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn persistence_error(key: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::Persistence {
        key: key.to_string(),
        message: err.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct MemoryPersistence {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl Persistence for MemoryPersistence {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|e| persistence_error(key, e))?;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|e| persistence_error(key, e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per collection.
#[derive(Debug)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FilePersistence { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Persistence for FilePersistence {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence_error(key, e)),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| persistence_error(key, e))?;

        // Write then rename
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| persistence_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| persistence_error(key, e))?;

        tracing::debug!("Persisted {} ({} bytes)", key, value.len());
        Ok(())
    }
}

pub struct RedisPersistence {
    conn: ConnectionManager,
}

impl RedisPersistence {
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("✅ Redis connection established successfully");
        Ok(RedisPersistence { conn })
    }
}

#[async_trait]
impl Persistence for RedisPersistence {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| persistence_error(key, e))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(key, value)
            .await
            .map_err(|e| persistence_error(key, e))?;
        tracing::debug!("Redis SET: {}", key);
        Ok(())
    }
}

/// Picks the backend named in config. An unreachable or unconfigured Redis
/// falls back to memory.
pub async fn from_config(config: &Config) -> Arc<dyn Persistence> {
    match config.persistence {
        PersistenceKind::Memory => Arc::new(MemoryPersistence::default()),
        PersistenceKind::File => Arc::new(FilePersistence::new(config.data_dir.clone())),
        PersistenceKind::Redis => {
            let Some(redis_url) = config.redis_url.as_deref() else {
                tracing::warn!("⚠️  PERSISTENCE=redis but REDIS_URL is not set - keeping data in memory");
                return Arc::new(MemoryPersistence::default());
            };

            match RedisPersistence::connect(redis_url).await {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    tracing::warn!("⚠️  Redis connection failed: {} - keeping data in memory", e);
                    Arc::new(MemoryPersistence::default())
                }
            }
        }
    }
}
