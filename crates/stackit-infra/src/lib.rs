//! Infrastructure layer for StackIt.
//!
//! Contains implementations of the ports defined in `stackit-core`:
//! SQLite storage for questions and answers, HS256 bearer token
//! verification, and the server configuration loader.

pub mod config;
pub mod sqlite;
pub mod token;
