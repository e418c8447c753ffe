//! Database module

pub mod connection;
pub mod schema;

pub use connection::Database;
