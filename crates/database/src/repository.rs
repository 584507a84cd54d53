use crate::DbError;
use crate::table::{BindKey, Table};
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL used by the CRUD endpoints.
///
/// Every operation is generic over [`Table`], so the eleven tables share one
/// implementation and differ only in the metadata their records declare.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetches every row of the table, ordered by primary key.
    pub async fn list<T: Table>(&self) -> Result<Vec<T>, DbError> {
        let sql = select_sql::<T>();
        tracing::debug!(table = T::TABLE, %sql, "Listing rows.");
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Fetches the row identified by `key`.
    pub async fn find<T: Table>(&self, key: &T::Key) -> Result<T, DbError> {
        let sql = find_sql::<T>(false);
        key.bind_key(sqlx::query_as::<_, T>(&sql))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Inserts a complete record and returns the stored row.
    ///
    /// A duplicate primary key or a dangling foreign key surfaces as
    /// `DbError::ConstraintViolation`.
    pub async fn create<T: Table>(&self, record: &T) -> Result<T, DbError> {
        let sql = insert_sql::<T>();
        tracing::debug!(table = T::TABLE, %sql, "Inserting row.");
        let created = record
            .bind_columns(sqlx::query_as::<_, T>(&sql))
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    /// Overwrites every column, key columns included, of the row identified by `key`.
    ///
    /// The row is locked before it is written; a missing row yields
    /// `DbError::NotFound` and nothing is written.
    pub async fn replace<T: Table>(&self, key: &T::Key, record: &T) -> Result<T, DbError> {
        let mut tx = self.pool.begin().await?;

        let lock = find_sql::<T>(true);
        key.bind_key(sqlx::query_as::<_, T>(&lock))
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound)?;

        let sql = update_sql::<T>();
        tracing::debug!(table = T::TABLE, %sql, "Replacing row.");
        let query = record.bind_columns(sqlx::query_as::<_, T>(&sql));
        let updated = key.bind_key(query).fetch_one(&mut *tx).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Removes the row identified by `key` and returns it. Dependent rows go with it
    /// through the cascading foreign keys.
    pub async fn delete<T: Table>(&self, key: &T::Key) -> Result<T, DbError> {
        let mut tx = self.pool.begin().await?;

        let lock = find_sql::<T>(true);
        key.bind_key(sqlx::query_as::<_, T>(&lock))
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound)?;

        let sql = delete_sql::<T>();
        tracing::debug!(table = T::TABLE, %sql, "Deleting row.");
        let deleted = key
            .bind_key(sqlx::query_as::<_, T>(&sql))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(deleted)
    }
}

fn column_list<T: Table>() -> String {
    T::COLUMNS.join(", ")
}

/// `k1 = $n, k2 = $n+1, ...` with placeholders starting after `offset` bound values.
fn key_predicate<T: Table>(offset: usize) -> String {
    T::KEY_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", offset + i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn select_sql<T: Table>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list::<T>(),
        T::TABLE,
        T::KEY_COLUMNS.join(", ")
    )
}

fn find_sql<T: Table>(for_update: bool) -> String {
    let mut sql = format!(
        "SELECT {} FROM {} WHERE {}",
        column_list::<T>(),
        T::TABLE,
        key_predicate::<T>(0)
    );
    if for_update {
        sql.push_str(" FOR UPDATE");
    }
    sql
}

fn insert_sql<T: Table>() -> String {
    let placeholders = (1..=T::COLUMNS.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        T::TABLE,
        column_list::<T>(),
        placeholders,
        column_list::<T>()
    )
}

fn update_sql<T: Table>() -> String {
    let assignments = T::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} RETURNING {}",
        T::TABLE,
        assignments,
        key_predicate::<T>(T::COLUMNS.len()),
        column_list::<T>()
    )
}

fn delete_sql<T: Table>() -> String {
    format!(
        "DELETE FROM {} WHERE {} RETURNING {}",
        T::TABLE,
        key_predicate::<T>(0),
        column_list::<T>()
    )
}
