//! # ticklist Shared Library
//!
//! This crate contains the types and business logic shared by the ticklist
//! API server: database models, authentication primitives, and the database
//! connection layer.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL operations
//! - `auth`: Password hashing, token issuance/validation, auth middleware
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the ticklist shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
