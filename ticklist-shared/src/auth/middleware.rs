/// Authentication middleware for Axum
///
/// This module provides the two token-validation middlewares plus the
/// `CurrentUser` extractor handlers use to reach the authenticated user.
///
/// # Middleware Types
///
/// - **Access Middleware**: Validates Bearer tokens from the Authorization
///   header; guards every task route plus logout and `/auth/me`
/// - **Renewal Middleware**: Validates the renewal token from the
///   `refreshToken` cookie; guards only `/auth/refresh-token`
///
/// Both validate the signature and expiry, load the user, and compare the
/// token's embedded `token_version` with the stored one. A token minted
/// before the user's last logout fails the comparison and is rejected even
/// though its signature and expiry are still good.
///
/// # Request Extensions
///
/// After successful authentication, middleware adds `CurrentUser` (the full
/// user row) to the request extensions. Handlers extract it by taking a
/// `CurrentUser` argument; if the middleware did not run, extraction fails
/// with 401 `Not authenticated`.
use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;

use super::cookie::{extract_cookie, RENEWAL_COOKIE};
use super::jwt::{validate_token, JwtError};
use crate::models::user::User;

/// Error type for authentication middleware
///
/// Every variant maps to a `{"message": ...}` JSON body; the display string
/// is the client-visible message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Authorization header missing or not a Bearer token
    #[error("No token provided")]
    NoToken,

    /// Access token signature/expiry checked out but exp is in the past
    #[error("Token expired")]
    TokenExpired,

    /// Access token failed signature, issuer, or format checks
    #[error("Invalid token")]
    TokenInvalid,

    /// Token subject no longer resolves to a user
    #[error("User not found")]
    UserNotFound,

    /// Token was minted under a previous session epoch
    #[error("Token version mismatch")]
    TokenVersionMismatch,

    /// The refreshToken cookie is absent
    #[error("No refresh token provided")]
    NoRenewalToken,

    /// Renewal token failed validation, user load, or epoch check
    #[error("Invalid refresh token")]
    RenewalInvalid,

    /// Handler required an authenticated user but none was attached
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Database error during user load
    #[error("Internal server error")]
    Database(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Database(ref detail) = self {
            tracing::error!(error = %detail, "database error during authentication");
        }

        let status = self.status();
        let body = Json(json!({ "message": self.to_string() }));

        (status, body).into_response()
    }
}

/// The authenticated user attached to the request by the auth middleware
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::middleware::CurrentUser;
///
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }
}

/// Access-token authentication middleware
///
/// Validates JWT tokens from the `Authorization: Bearer <token>` header,
/// loads the user, and checks the session epoch.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - Authorization header is missing or not `Bearer` (`No token provided`)
/// - Token has expired (`Token expired`)
/// - Token fails signature/issuer checks (`Invalid token`)
/// - Subject doesn't resolve to a user (`User not found`)
/// - Token's epoch is stale (`Token version mismatch`)
pub async fn access_auth_middleware(
    pool: PgPool,
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::NoToken)?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::NoToken)?;

    // Validate signature, expiry, issuer
    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    })?;

    // Load the user and compare session epochs
    let user = User::find_by_id(&pool, claims.sub)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?
        .ok_or(AuthError::UserNotFound)?;

    if user.token_version != claims.token_version {
        return Err(AuthError::TokenVersionMismatch);
    }

    // Add the authenticated user to request extensions
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Renewal-token authentication middleware
///
/// Validates the renewal token from the `refreshToken` cookie. Apart from
/// the missing-cookie case, every failure collapses into a single
/// `Invalid refresh token` message so the response doesn't reveal which
/// check failed.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - The cookie is absent (`No refresh token provided`)
/// - Validation, user load, or the epoch check fails (`Invalid refresh token`)
pub async fn renewal_auth_middleware(
    pool: PgPool,
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract the renewal token from the cookie header
    let token =
        extract_cookie(req.headers(), RENEWAL_COOKIE).ok_or(AuthError::NoRenewalToken)?;

    // Validate signature, expiry, issuer
    let claims = validate_token(&token, &secret).map_err(|_| AuthError::RenewalInvalid)?;

    // Load the user and compare session epochs
    let user = User::find_by_id(&pool, claims.sub)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?
        .ok_or(AuthError::RenewalInvalid)?;

    if user.token_version != claims.token_version {
        return Err(AuthError::RenewalInvalid);
    }

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Creates an access-token middleware closure
///
/// Helper that captures the pool and secret and returns a middleware
/// function suitable for `axum::middleware::from_fn`.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use sqlx::PgPool;
/// use ticklist_shared::auth::middleware::create_access_middleware;
///
/// fn protected_routes(pool: PgPool) -> Router {
///     Router::new()
///         .route("/tasks", get(|| async { "OK" }))
///         .layer(middleware::from_fn(create_access_middleware(
///             pool,
///             "access-secret",
///         )))
/// }
/// ```
pub fn create_access_middleware(
    pool: PgPool,
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let pool = pool.clone();
        let secret = secret.clone();
        Box::pin(access_auth_middleware(pool, secret, req, next))
    }
}

/// Creates a renewal-token middleware closure
///
/// Same shape as [`create_access_middleware`] but validates the cookie
/// against the renewal secret.
pub fn create_renewal_middleware(
    pool: PgPool,
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let pool = pool.clone();
        let secret = secret.clone();
        Box::pin(renewal_auth_middleware(pool, secret, req, next))
    }
}
