//! Shared domain types for StackIt.
//!
//! Questions, answers, caller identity, server configuration, and the error
//! enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod answer;
pub mod config;
pub mod error;
pub mod identity;
pub mod question;
