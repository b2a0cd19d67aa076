/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Signup
/// - Login
/// - Logout (session epoch bump)
/// - Access-token renewal
/// - Current-user lookup
///
/// # Endpoints
///
/// - `POST /auth/signup` - Register a new user and get tokens
/// - `POST /auth/login` - Login, get tokens plus the renewal cookie
/// - `POST /auth/logout` - Invalidate every outstanding token
/// - `POST /auth/refresh-token` - Exchange the renewal cookie for a new access token
/// - `GET /auth/me` - Fetch the authenticated user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::AppJson,
    routes::MessageResponse,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use ticklist_shared::{
    auth::{
        cookie::{build_renewal_cookie, clear_renewal_cookie},
        jwt::{self, Claims},
        middleware::CurrentUser,
        password,
    },
    models::user::{normalize_email, CreateUser, PublicUser, User},
};

/// Signup / login request
///
/// Both fields are declared optional so that a missing field produces the
/// documented 400 (signup) or 401 (login) instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Email address
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// Response for signup and login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token (60 minutes)
    pub access_token: String,

    /// Renewal token (7 days), also set as a cookie on login
    pub refresh_token: String,

    /// The authenticated user, without the password hash
    pub user: PublicUser,
}

/// Response for the refresh-token endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewedTokenResponse {
    /// New access token (60 minutes)
    pub access_token: String,
}

/// Register a new user
///
/// Creates the user with a freshly hashed password and returns a token
/// pair bound to session epoch 0. No cookie is set here; the renewal
/// cookie only appears on login.
///
/// # Endpoint
///
/// ```text
/// POST /auth/signup
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing fields, or email already registered
/// - `500 Internal Server Error`: Server error
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    let password = req.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".to_string(),
        ));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&password)?;

    // The unique index on email backstops the check above; a concurrent
    // signup surfaces here as DuplicateEmail via the sqlx conversion.
    let user = User::create(
        &state.db,
        CreateUser {
            email,
            password_hash,
        },
    )
    .await?;

    let tokens = jwt::issue_token_pair(
        user.id,
        user.token_version,
        &state.config.jwt.access_secret,
        &state.config.jwt.renewal_secret,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.renewal_token,
            user: PublicUser::from(user),
        }),
    ))
}

/// Login
///
/// Verifies the password against the stored hash and issues a fresh token
/// pair bound to the user's current session epoch. The renewal token is
/// additionally set as an http-only cookie.
///
/// Unknown email and wrong password return the same status and message so
/// responses never reveal whether an account exists.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(req.email.as_deref().unwrap_or_default());

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(
        req.password.as_deref().unwrap_or_default(),
        &user.password_hash,
    )?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let tokens = jwt::issue_token_pair(
        user.id,
        user.token_version,
        &state.config.jwt.access_secret,
        &state.config.jwt.renewal_secret,
    )?;

    let cookie = build_renewal_cookie(&tokens.renewal_token, state.config.api.production);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.renewal_token,
            user: PublicUser::from(user),
        }),
    ))
}

/// Logout
///
/// Bumps the user's session epoch by one, which invalidates every token
/// issued before this call regardless of its stated expiry, then clears
/// the renewal cookie. Succeeds even if the user row has disappeared;
/// there is nothing left to invalidate in that case.
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<impl IntoResponse> {
    User::bump_token_version(&state.db, user.id).await?;

    Ok((
        [(header::SET_COOKIE, clear_renewal_cookie())],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Renew the access token
///
/// Guarded by the renewal middleware, so `user` here was loaded against
/// the renewal cookie and already passed the epoch check. Issues a new
/// access token only; the renewal token is not rotated.
pub async fn refresh_token(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<RenewedTokenResponse>> {
    let access_token = jwt::create_token(
        &Claims::access(user.id, user.token_version),
        &state.config.jwt.access_secret,
    )?;

    Ok(Json(RenewedTokenResponse { access_token }))
}

/// Fetch the authenticated user
///
/// Reloads the row so the response reflects the latest state, not the
/// snapshot the middleware attached.
///
/// # Errors
///
/// - `404 Not Found`: the account no longer exists
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(PublicUser::from(user)))
}
