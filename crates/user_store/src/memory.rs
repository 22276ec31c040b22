//! In-memory user store implementation for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, Semaphore, SemaphorePermit};

use crate::{User, UserStore, UserStoreError, UserStoreResult};

/// In-memory user store for testing purposes.
///
/// Mirrors the PostgreSQL store's contract: ids are generated by the store,
/// a duplicate email makes the insert a silent no-op, and every operation
/// passes through a bounded gate the way pooled connections do. Clones share
/// the same state, so tests can keep a handle while the server owns another.
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<i32, User>>>,
    next_id: Arc<AtomicI32>,
    gate: Arc<Semaphore>,
    queries: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// Tracks one in-flight operation; releases the gate slot on drop.
struct OpGuard<'a> {
    _permit: SemaphorePermit<'a>,
    in_flight: &'a AtomicUsize,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryUserStore {
    /// Creates a new in-memory user store with the default gate capacity.
    pub fn new() -> Self {
        // Matches the real pool's default maximum.
        Self::with_capacity(20)
    }

    /// Creates a store whose gate admits at most `capacity` concurrent
    /// operations.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
            gate: Arc::new(Semaphore::new(capacity)),
            queries: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of storage operations performed so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Highest number of operations that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn checkout(&self) -> OpGuard<'_> {
        let permit = self.gate.acquire().await.expect("gate is never closed");
        self.queries.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        OpGuard {
            _permit: permit,
            in_flight: &self.in_flight,
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> UserStoreResult<Vec<User>> {
        let _op = self.checkout().await;
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn add_user(&self, name: &str, email: &str) -> UserStoreResult<()> {
        let _op = self.checkout().await;
        let mut users = self.users.write().await;

        // Unique email behaves like the conflict-ignore insert: succeed
        // without creating a row.
        if users.values().any(|u| u.email == email) {
            return Ok(());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
        );
        Ok(())
    }

    async fn update_user(&self, id: i32, name: &str, email: &str) -> UserStoreResult<()> {
        let _op = self.checkout().await;
        let mut users = self.users.write().await;

        let user = users
            .get_mut(&id)
            .ok_or_else(|| UserStoreError::not_found("User", id.to_string()))?;
        user.name = name.to_string();
        user.email = email.to_string();
        Ok(())
    }

    async fn delete_user(&self, id: i32) -> UserStoreResult<()> {
        let _op = self.checkout().await;
        let mut users = self.users.write().await;

        if users.remove(&id).is_none() {
            return Err(UserStoreError::not_found("User", id.to_string()));
        }
        Ok(())
    }

    async fn count_users(&self) -> UserStoreResult<i64> {
        let _op = self.checkout().await;
        let users = self.users.read().await;
        Ok(users.len() as i64)
    }

    async fn search_users(&self, query: &str) -> UserStoreResult<Vec<User>> {
        let _op = self.checkout().await;
        let users = self.users.read().await;
        let query = query.to_lowercase();

        Ok(users
            .values()
            .filter(|u| {
                u.name.to_lowercase().contains(&query) || u.email.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_and_list_users() {
        let store = MemoryUserStore::new();
        store.add_user("Alice", "alice@example.com").await.unwrap();
        store.add_user("Bob", "bob@example.com").await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users
            .iter()
            .any(|u| u.name == "Alice" && u.email == "alice@example.com"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_silent_noop() {
        let store = MemoryUserStore::new();
        store.add_user("Alice", "alice@example.com").await.unwrap();
        store
            .add_user("Alice Again", "alice@example.com")
            .await
            .unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice");
    }

    #[tokio::test]
    async fn update_missing_user_reports_not_found() {
        let store = MemoryUserStore::new();
        let err = store
            .update_user(42, "Nobody", "nobody@example.com")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = MemoryUserStore::new();
        store.add_user("Alice", "alice@example.com").await.unwrap();
        let id = store.list_users().await.unwrap()[0].id;

        store.delete_user(id).await.unwrap();
        assert!(store.list_users().await.unwrap().is_empty());

        let err = store.delete_user(id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_matches_name_and_email_case_insensitively() {
        let store = MemoryUserStore::new();
        store.add_user("Alice", "alice@wonderland.io").await.unwrap();
        store
            .add_user("Bob", "contact@ALIceCorp.com")
            .await
            .unwrap();
        store.add_user("Carol", "carol@example.com").await.unwrap();

        let hits = store.search_users("ali").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|u| u.name == "Alice"));
        assert!(hits.iter().any(|u| u.name == "Bob"));
    }

    #[tokio::test]
    async fn query_count_tracks_operations() {
        let store = MemoryUserStore::new();
        assert_eq!(store.query_count(), 0);

        store.add_user("Alice", "alice@example.com").await.unwrap();
        store.list_users().await.unwrap();
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn bounded_gate_never_exceeds_capacity() {
        let store = MemoryUserStore::with_capacity(4);

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .add_user(&format!("user{i}"), &format!("user{i}@example.com"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(store.peak_in_flight() <= 4);
        assert_eq!(store.count_users().await.unwrap(), 32);
    }
}
