/// JWT token generation and validation module
///
/// This module provides JWT (JSON Web Token) functionality for session
/// authentication. Tokens are signed using HS256 (HMAC-SHA256) and carry the
/// user's identity plus the session epoch (`token_version`).
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 60 minutes for access tokens, 7 days for renewal tokens
/// - **Validation**: Signature, expiration, and issuer checks
/// - **Key separation**: Access and renewal tokens are signed with different
///   secrets, so one kind can never be replayed as the other
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Token Types
///
/// - **Access Token**: Short-lived, presented as `Authorization: Bearer` on
///   every protected request
/// - **Renewal Token**: Long-lived, transported only in the `refreshToken`
///   http-only cookie and used to mint new access tokens
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// // Create access token bound to session epoch 0
/// let claims = Claims::access(user_id, 0);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// // Validate token
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.sub, user_id);
/// assert_eq!(validated.token_version, 0);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped into every token
const ISSUER: &str = "ticklist";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// JWT claims structure
///
/// Contains standard JWT claims plus the ticklist session epoch.
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "ticklist")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// - `token_version`: Session epoch the token was minted under. A token is
///   only honored while this equals the user's stored `token_version`;
///   logout bumps the stored value and strands every outstanding token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Issuer - Always "ticklist"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Session epoch (custom claim)
    pub token_version: i32,
}

impl Claims {
    /// Lifetime of an access token
    pub fn access_expiration() -> Duration {
        Duration::minutes(60)
    }

    /// Lifetime of a renewal token
    pub fn renewal_expiration() -> Duration {
        Duration::days(7)
    }

    /// Creates claims for an access token (60 minute expiry)
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID (subject)
    /// * `token_version` - The user's current session epoch
    pub fn access(user_id: Uuid, token_version: i32) -> Self {
        Self::with_expiration(user_id, token_version, Self::access_expiration())
    }

    /// Creates claims for a renewal token (7 day expiry)
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID (subject)
    /// * `token_version` - The user's current session epoch
    pub fn renewal(user_id: Uuid, token_version: i32) -> Self {
        Self::with_expiration(user_id, token_version, Self::renewal_expiration())
    }

    /// Creates claims with custom expiration
    ///
    /// # Example
    ///
    /// ```
    /// use ticklist_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    /// use uuid::Uuid;
    ///
    /// let claims = Claims::with_expiration(
    ///     Uuid::new_v4(),
    ///     0,
    ///     Duration::minutes(5), // 5 minute expiration
    /// );
    /// ```
    pub fn with_expiration(user_id: Uuid, token_version: i32, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            token_version,
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// An access/renewal token pair minted for one user session
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Short-lived bearer token
    pub access_token: String,

    /// Long-lived renewal token (cookie transport)
    pub renewal_token: String,
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 (HMAC-SHA256) with the provided secret.
///
/// # Arguments
///
/// * `claims` - Token claims
/// * `secret` - Secret key for signing (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token creation fails
///
/// # Security
///
/// The secret should be:
/// - At least 32 bytes (256 bits) for HS256
/// - Randomly generated
/// - Stored securely (environment variable or secret manager)
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "ticklist"
///
/// Note that the session-epoch comparison against the user's stored
/// `token_version` is NOT performed here; it requires a database read and
/// lives in the auth middleware.
///
/// # Errors
///
/// Returns `JwtError::Expired` if the token's `exp` is in the past, and
/// `JwtError::ValidationError` for any other failure (bad signature, wrong
/// issuer, malformed token).
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes";
///
/// let claims = Claims::access(user_id, 3);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, user_id);
/// assert_eq!(validated.token_version, 3);
/// # Ok(())
/// # }
/// ```
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Issues a fresh access/renewal token pair for a user session
///
/// Both tokens carry the same `sub` and `token_version`; they differ in
/// lifetime and signing key. Because the keys differ, a renewal token can
/// never pass validation against the access secret or vice versa.
///
/// # Arguments
///
/// * `user_id` - User ID (subject)
/// * `token_version` - The user's current session epoch
/// * `access_secret` - Signing key for the access token
/// * `renewal_secret` - Signing key for the renewal token
pub fn issue_token_pair(
    user_id: Uuid,
    token_version: i32,
    access_secret: &str,
    renewal_secret: &str,
) -> Result<TokenPair, JwtError> {
    let access_token = create_token(&Claims::access(user_id, token_version), access_secret)?;
    let renewal_token = create_token(&Claims::renewal(user_id, token_version), renewal_secret)?;

    Ok(TokenPair {
        access_token,
        renewal_token,
    })
}
