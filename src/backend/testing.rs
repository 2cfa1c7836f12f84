// Test doubles for the backend seams.
//
// These live behind #[cfg(test)] and back the tests for the dispatcher,
// the store tools, and the resource manager without any real network I/O.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::control::{ControlRequest, ControlTransport};
use crate::backend::store::{StoreConn, StoreConnector, StoreManager};
use crate::errors::ToolError;

/// In-memory stand-in for the key-value store. Keys are held in a
/// BTreeMap so SCAN pages are deterministic.
pub struct MemoryStore {
    data: Mutex<BTreeMap<String, String>>,
    ttls: Mutex<BTreeMap<String, i64>>,
    /// set() against any of these keys reports a backend error, for
    /// exercising per-item failure reporting.
    fail_keys: Mutex<HashSet<String>>,
    del_calls: AtomicUsize,
    scan_calls: AtomicUsize,
    flush_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(BTreeMap::new()),
            ttls: Mutex::new(BTreeMap::new()),
            fail_keys: Mutex::new(HashSet::new()),
            del_calls: AtomicUsize::new(0),
            scan_calls: AtomicUsize::new(0),
            flush_calls: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, key: String, value: String) {
        self.data.lock().unwrap().insert(key, value);
    }

    pub fn fail_on(&self, key: &str) {
        self.fail_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    pub fn del_calls(&self) -> usize {
        self.del_calls.load(Ordering::SeqCst)
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn flush_calls(&self) -> usize {
        self.flush_calls.load(Ordering::SeqCst)
    }
}

/// Minimal glob matching: `*` matches any run of characters, `?` any
/// single character. Enough to mimic the backend's MATCH semantics in
/// tests.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    fn inner(p: &[u8], t: &[u8]) -> bool {
        match (p.first(), t.first()) {
            (None, None) => true,
            (Some(b'*'), _) => inner(&p[1..], t) || (!t.is_empty() && inner(p, &t[1..])),
            (Some(b'?'), Some(_)) => inner(&p[1..], &t[1..]),
            (Some(a), Some(b)) if a == b => inner(&p[1..], &t[1..]),
            _ => false,
        }
    }
    inner(pattern.as_bytes(), text.as_bytes())
}

#[async_trait]
impl StoreConn for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ToolError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), ToolError> {
        if self.fail_keys.lock().unwrap().contains(key) {
            return Err(ToolError::Backend(format!("write rejected for '{}'", key)));
        }
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        if let Some(ttl) = ttl_seconds {
            self.ttls.lock().unwrap().insert(key.to_string(), ttl as i64);
        }
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<u64, ToolError> {
        self.del_calls.fetch_add(1, Ordering::SeqCst);
        let mut data = self.data.lock().unwrap();
        let mut removed = 0;
        for key in keys {
            if data.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn scan_page(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> Result<(u64, Vec<String>), ToolError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        let matching: Vec<String> = self
            .data
            .lock()
            .unwrap()
            .keys()
            .filter(|k| glob_match(pattern, k))
            .cloned()
            .collect();

        let start = cursor as usize;
        let end = (start + count.max(1)).min(matching.len());
        let batch = matching[start.min(matching.len())..end].to_vec();
        let next = if end >= matching.len() { 0 } else { end as u64 };
        Ok((next, batch))
    }

    async fn ttl(&self, key: &str) -> Result<i64, ToolError> {
        if !self.data.lock().unwrap().contains_key(key) {
            return Ok(-2);
        }
        Ok(self.ttls.lock().unwrap().get(key).copied().unwrap_or(-1))
    }

    async fn expire(&self, key: &str, seconds: i64) -> Result<bool, ToolError> {
        if !self.data.lock().unwrap().contains_key(key) {
            return Ok(false);
        }
        self.ttls.lock().unwrap().insert(key.to_string(), seconds);
        Ok(true)
    }

    async fn dbsize(&self) -> Result<u64, ToolError> {
        Ok(self.data.lock().unwrap().len() as u64)
    }

    async fn flush_all(&self) -> Result<(), ToolError> {
        self.flush_calls.fetch_add(1, Ordering::SeqCst);
        self.data.lock().unwrap().clear();
        self.ttls.lock().unwrap().clear();
        Ok(())
    }
}

/// Connector that hands out a prepared MemoryStore.
pub struct StubConnector {
    store: Arc<MemoryStore>,
}

impl StubConnector {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StoreConnector for StubConnector {
    async fn connect(&self, _url: &str) -> Result<Arc<dyn StoreConn>, ToolError> {
        Ok(self.store.clone())
    }
}

/// A manager already wired to the given in-memory store.
pub fn manager_with(store: Arc<MemoryStore>) -> StoreManager {
    StoreManager::with_connector(
        Some("redis://stub".to_string()),
        Arc::new(StubConnector::new(store)),
    )
}

/// Counts handshake attempts; each attempt yields a fresh empty store
/// after a short pause so concurrent callers genuinely overlap.
pub struct CountingConnector {
    attempts: AtomicUsize,
}

impl CountingConnector {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for CountingConnector {
    async fn connect(&self, _url: &str) -> Result<Arc<dyn StoreConn>, ToolError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(Arc::new(MemoryStore::new()))
    }
}

/// Fails the first `failures` handshake attempts, then succeeds. Each
/// attempt pauses first so concurrent callers genuinely overlap it.
pub struct FailingConnector {
    failures: usize,
    attempts: AtomicUsize,
}

impl FailingConnector {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for FailingConnector {
    async fn connect(&self, _url: &str) -> Result<Arc<dyn StoreConn>, ToolError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        if attempt < self.failures {
            return Err(ToolError::Connection("handshake refused".to_string()));
        }
        Ok(Arc::new(MemoryStore::new()))
    }
}

/// Connector that must never be reached.
pub struct PanicConnector;

#[async_trait]
impl StoreConnector for PanicConnector {
    async fn connect(&self, _url: &str) -> Result<Arc<dyn StoreConn>, ToolError> {
        panic!("connection attempted against an unconfigured backend");
    }
}

/// Records every control-plane request and answers with a fixed value.
pub struct RecordingTransport {
    response: Value,
    requests: Mutex<Vec<(String, String, Option<Value>)>>,
}

impl RecordingTransport {
    pub fn new(response: Value) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// (method + url, token, body) triples in call order.
    pub fn requests(&self) -> Vec<(String, String, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlTransport for RecordingTransport {
    async fn send(&self, request: ControlRequest) -> Result<Value, ToolError> {
        self.requests.lock().unwrap().push((
            format!("{} {}", request.method, request.url),
            request.token,
            request.body,
        ));
        Ok(self.response.clone())
    }
}

/// Transport that must never be reached.
pub struct PanicTransport;

#[async_trait]
impl ControlTransport for PanicTransport {
    async fn send(&self, _request: ControlRequest) -> Result<Value, ToolError> {
        panic!("control-plane request attempted without configuration");
    }
}

#[cfg(test)]
mod tests {
    use super::glob_match;

    #[test]
    fn glob_basics() {
        assert!(glob_match("*", "anything"));
        assert!(glob_match("session:*", "session:42"));
        assert!(!glob_match("session:*", "config:main"));
        assert!(glob_match("user:?", "user:7"));
        assert!(!glob_match("user:?", "user:42"));
        assert!(glob_match("exact", "exact"));
    }
}
