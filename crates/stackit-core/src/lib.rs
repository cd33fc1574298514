//! Business rules and repository trait definitions for StackIt.
//!
//! This crate defines the "ports" (repository and token verification traits)
//! that the infrastructure layer implements. It depends only on
//! `stackit-types` -- never on `stackit-infra` or any database/IO crate.

pub mod auth;
pub mod repository;
pub mod service;
