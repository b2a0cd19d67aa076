/// Middleware modules for the API server
///
/// Authentication middleware lives in `ticklist_shared::auth::middleware`
/// so it can be exercised directly against the shared models. This module
/// holds the HTTP-layer middleware that has no auth dependency.

pub mod security;
