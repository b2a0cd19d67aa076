/// Database models for ticklist
///
/// This module contains all database models and their SQL operations.
///
/// # Models
///
/// - `user`: Accounts, email lookup, and the session epoch
/// - `task`: To-do items with owner-scoped access
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
/// use ticklist_shared::models::user::{CreateUser, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```
pub mod task;
pub mod user;
