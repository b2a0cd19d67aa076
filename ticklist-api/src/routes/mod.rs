/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, login, logout, refresh, me)
/// - `tasks`: Task CRUD endpoints

use serde::Serialize;

pub mod auth;
pub mod health;
pub mod tasks;

/// Body for endpoints whose success response is just a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}
