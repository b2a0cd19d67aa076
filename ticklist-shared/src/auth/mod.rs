/// Authentication utilities
///
/// This module provides the authentication primitives for ticklist:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Access/renewal token generation and validation
/// - [`cookie`]: The http-only cookie carrying the renewal token
/// - [`middleware`]: Axum middleware enforcing token + session-epoch checks
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing, separate access and renewal secrets
/// - **Session Epochs**: Logout bumps the stored `token_version`, stranding
///   every token minted before it
/// - **Constant-time Comparison**: Password verification uses constant-time
///   operations
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::auth::jwt::{create_token, validate_token, Claims};
/// use ticklist_shared::auth::password::{hash_password, verify_password};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Token generation
/// let claims = Claims::access(Uuid::new_v4(), 0);
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```
pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;
