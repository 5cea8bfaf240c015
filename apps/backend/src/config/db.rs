use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile (Postgres, configured via env)
    Prod,
    /// Test database profile (self-contained SQLite in-memory)
    Test,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds a database connection spec from environment variables based on
/// profile and owner.
///
/// The Test profile always resolves to an in-memory SQLite database so the
/// test suite needs no external services; the schema is created at bootstrap.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
        DbProfile::Prod => {
            let host = host();
            let port = port();
            let db_name = must_var("PROD_DB")?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => {
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok((username, password))
        }
        DbOwner::Owner => {
            let username = must_var("CHUTES_OWNER_USER")?;
            let password = must_var("CHUTES_OWNER_PASSWORD")?;
            Ok((username, password))
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
