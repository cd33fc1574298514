//! Request extractors: identity gate, JSON bodies, list query parameters.

pub mod auth;
pub mod json;
pub mod query;
