use crate::error::DbError;
use crate::schema::SCHEMA_STATEMENTS;
use dotenvy::dotenv;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// This function reads the `DATABASE_URL` from the environment (a `.env` file is
/// loaded first when one exists) and returns a pool that is shared by every
/// request handler.
pub async fn connect(max_connections: u32, acquire_timeout: Duration) -> Result<PgPool, DbError> {
    // A missing .env file is fine as long as DATABASE_URL is set some other way.
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_e| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Creates every table of the schema that does not exist yet.
///
/// Statements run in foreign-key dependency order inside one transaction, so a
/// failure leaves the database untouched.
pub async fn create_schema(pool: &PgPool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(tables = SCHEMA_STATEMENTS.len(), "Database schema is in place.");
    Ok(())
}
