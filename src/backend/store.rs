// Store backend
//
// This module manages the single live connection to the key-value store.
// StoreManager owns the connection lifecycle; tools only ever receive a
// shared handle to issue commands, never the ability to mutate connection
// state themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use tokio::sync::Mutex;

use crate::errors::ToolError;

/// Commands the store handlers need from a live connection.
///
/// The real implementation wraps a redis multiplexed connection; tests
/// substitute an in-memory store behind the same trait.
#[async_trait]
pub trait StoreConn: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ToolError>;
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), ToolError>;
    async fn del(&self, keys: &[String]) -> Result<u64, ToolError>;
    /// One SCAN page: returns the next cursor and a batch of matching keys.
    /// A next cursor of zero means the traversal is exhausted.
    async fn scan_page(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), ToolError>;
    async fn ttl(&self, key: &str) -> Result<i64, ToolError>;
    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, ToolError>;
    async fn dbsize(&self) -> Result<u64, ToolError>;
    async fn flush_all(&self) -> Result<(), ToolError>;
}

/// Performs the backend-specific handshake. Split out of StoreManager so
/// tests can count or forbid connection attempts.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Arc<dyn StoreConn>, ToolError>;
}

#[derive(Default)]
struct ConnSlot {
    conn: Option<Arc<dyn StoreConn>>,
    /// Outcome of the most recent failed attempt, handed to callers that
    /// queued behind it.
    last_failure: Option<ToolError>,
}

/// Owns at most one live store connection.
///
/// `ensure_ready` is idempotent: once a connection exists, repeated calls
/// return the same handle without side effects. The handshake is a
/// resolved-once affair: every call that arrives while an attempt is in
/// flight waits behind it and receives that attempt's outcome, success or
/// failure alike. Only a call arriving after a failed attempt resolved
/// starts a fresh one, so N racing calls never produce more than one
/// handshake.
pub struct StoreManager {
    url: Option<String>,
    connector: Arc<dyn StoreConnector>,
    /// Bumped once per resolved attempt. Callers snapshot it before
    /// queuing on the slot lock; a changed value afterwards means the
    /// attempt they waited behind has resolved.
    epoch: AtomicU64,
    slot: Mutex<ConnSlot>,
}

impl StoreManager {
    /// Create a manager that connects over the redis protocol.
    pub fn new(url: Option<String>) -> Self {
        Self::with_connector(url, Arc::new(RedisConnector))
    }

    /// Create a manager with a custom handshake implementation.
    pub fn with_connector(url: Option<String>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            url,
            connector,
            epoch: AtomicU64::new(0),
            slot: Mutex::new(ConnSlot::default()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Return a ready connection handle, connecting first if necessary.
    ///
    /// With no connection URL configured this fails fast with a
    /// configuration error and never attempts any I/O.
    pub async fn ensure_ready(&self) -> Result<Arc<dyn StoreConn>, ToolError> {
        let url = self.url.as_deref().ok_or_else(|| {
            ToolError::NotConfigured(
                "store connection URL is not set (configure store.url or KVCLOUD_STORE_URL)"
                    .to_string(),
            )
        })?;

        let entered_at = self.epoch.load(Ordering::Acquire);

        // An in-flight attempt holds this lock across its handshake, so
        // acquiring it means waiting for that attempt to resolve.
        let mut slot = self.slot.lock().await;
        if let Some(conn) = slot.conn.as_ref() {
            return Ok(conn.clone());
        }
        if self.epoch.load(Ordering::Acquire) != entered_at {
            // The attempt this call queued behind resolved while we
            // waited; its failure is this call's outcome too.
            if let Some(err) = slot.last_failure.clone() {
                return Err(err);
            }
        }

        // First call, or the first to arrive after a resolved failure:
        // this call owns a fresh attempt.
        info!("Connecting to key-value store");
        let result = self.connector.connect(url).await;
        match &result {
            Ok(conn) => {
                slot.conn = Some(conn.clone());
                slot.last_failure = None;
            }
            Err(err) => {
                slot.last_failure = Some(err.clone());
            }
        }
        self.epoch.fetch_add(1, Ordering::AcqRel);
        result
    }
}

/// Handshake over the redis protocol.
pub struct RedisConnector;

#[async_trait]
impl StoreConnector for RedisConnector {
    async fn connect(&self, url: &str) -> Result<Arc<dyn StoreConn>, ToolError> {
        let client = redis::Client::open(url)
            .map_err(|e| ToolError::Connection(format!("invalid store URL: {}", e)))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| ToolError::Connection(e.to_string()))?;
        Ok(Arc::new(RedisConn { conn }))
    }
}

/// A live redis connection. The multiplexed connection is cheaply
/// cloneable and interleaves commands from concurrent handlers safely.
pub struct RedisConn {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisConn {
    fn backend_err(e: redis::RedisError) -> ToolError {
        ToolError::Backend(e.to_string())
    }
}

#[async_trait]
impl StoreConn for RedisConn {
    async fn get(&self, key: &str) -> Result<Option<String>, ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), ToolError> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }
        cmd.query_async(&mut conn).await.map_err(Self::backend_err)
    }

    async fn del(&self, keys: &[String]) -> Result<u64, ToolError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn scan_page(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn ttl(&self, key: &str) -> Result<i64, ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("EXPIRE")
            .arg(key)
            .arg(seconds)
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn dbsize(&self) -> Result<u64, ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }

    async fn flush_all(&self) -> Result<(), ToolError> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHALL")
            .query_async(&mut conn)
            .await
            .map_err(Self::backend_err)
    }
}
