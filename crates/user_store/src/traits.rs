//! User store trait definition.

use async_trait::async_trait;

use crate::{User, UserStoreResult};

/// Trait for user storage operations.
///
/// Each method performs at most one statement against the backing store;
/// callers never hold a storage resource across two round trips.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lists all users. Result order is unspecified.
    async fn list_users(&self) -> UserStoreResult<Vec<User>>;

    /// Inserts a new user. A duplicate email is silently ignored: the call
    /// succeeds and no row is created.
    async fn add_user(&self, name: &str, email: &str) -> UserStoreResult<()>;

    /// Updates a user's name and email in place.
    ///
    /// Returns a not-found error when no row matched the id.
    async fn update_user(&self, id: i32, name: &str, email: &str) -> UserStoreResult<()>;

    /// Deletes a user by id.
    ///
    /// Returns a not-found error when no row matched the id.
    async fn delete_user(&self, id: i32) -> UserStoreResult<()>;

    /// Counts all users.
    async fn count_users(&self) -> UserStoreResult<i64>;

    /// Finds users whose name or email contains `query`, case-insensitively.
    async fn search_users(&self, query: &str) -> UserStoreResult<Vec<User>>;
}
