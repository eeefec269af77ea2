//! Redis cache backend
//!
//! Uses a [`ConnectionManager`] so transient connection loss is retried
//! internally; the connection handle is cheap to clone per command.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{CacheStats, CacheStore};
use crate::errors::CacheError;

#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value: Option<String> = self.manager.clone().get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let _: () = self.manager.clone().set_ex(key, value, ttl_secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _: () = self.manager.clone().del(key).await?;
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let pattern = format!("{}*", prefix);
        let mut conn = self.manager.clone();
        let mut removed = 0u64;
        let mut cursor = 0u64;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await?;
            if !keys.is_empty() {
                let _: () = conn.del(&keys).await?;
                removed += keys.len() as u64;
            }
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }
        Ok(removed)
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut self.manager.clone())
            .await?;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let info: String = redis::cmd("INFO")
            .query_async(&mut self.manager.clone())
            .await?;
        let mut stats = CacheStats::default();
        for line in info.lines() {
            if let Some((key, value)) = line.split_once(':') {
                match key {
                    "used_memory_human" => stats.used_memory = Some(value.trim().to_string()),
                    "connected_clients" => stats.connected_clients = value.trim().parse().ok(),
                    "total_commands_processed" => {
                        stats.total_commands_processed = value.trim().parse().ok()
                    }
                    _ => {}
                }
            }
        }
        Ok(stats)
    }
}
