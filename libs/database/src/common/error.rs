/// Errors raised while bootstrapping the database
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The pool could not be opened
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection opened but did not answer the health check query
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Applying migrations failed
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
