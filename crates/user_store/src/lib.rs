//! User storage for the portfolio backend
//!
//! This crate provides a storage abstraction over the `users` table: a
//! [`UserStore`] trait, a PostgreSQL implementation backed by a bounded
//! connection pool, and an in-memory implementation for tests.

mod entities;
mod error;
mod memory;
mod postgres;
mod traits;

pub use entities::*;
pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use traits::*;
