//! User entity definitions.

use serde::{Deserialize, Serialize};

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier, generated by the storage layer.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Email address, unique across all users.
    pub email: String,
}
