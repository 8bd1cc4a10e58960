//! Faculty Database Library
//!
//! PostgreSQL repositories over a shared `PgPool`. Each repository is cheap to
//! clone and owns the SQL for one table.

pub mod db;

pub use db::*;
