use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{info, instrument};

use super::{check_health, PostgresConfig};
use crate::common::{DatabaseError, DatabaseResult};

/// Open a connection pool from a [`PostgresConfig`] and verify it answers.
///
/// There is no retry: an unreachable database at startup is reported to the
/// caller immediately.
///
/// # Example
/// ```ignore
/// use database::postgres::{connect_from_config, PostgresConfig};
///
/// let db = connect_from_config(PostgresConfig::new("postgresql://localhost/subs")).await?;
/// ```
#[instrument(skip_all)]
pub async fn connect_from_config(config: PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();

    let db = Database::connect(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    check_health(&db).await?;

    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Apply every pending migration of `M`.
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::postgres::run_migrations;
///
/// run_migrations::<Migrator>(&db, "subscriptions_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> DatabaseResult<()> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

/// Close the pool, logging rather than failing on error.
pub async fn close(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection closed successfully"),
        Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
    }
}
