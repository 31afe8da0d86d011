//! PostgreSQL implementation of the generic repository.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::Entity;
use crate::domain::repositories::{Change, ChangeSet, Repository};
use crate::error::AppError;

/// Table mapping for an entity stored in PostgreSQL.
///
/// The primary key column is always `id UUID`. `COLUMNS` lists the remaining
/// columns in the order [`PgTable::bind_columns`] binds them.
pub trait PgTable: Entity + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Builds the entity from a row selected as `id, COLUMNS...`.
    fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error>;

    /// Binds the values of `COLUMNS`, in order, onto `query`.
    fn bind_columns<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments>;
}

/// SQL generated once per table.
#[derive(Debug)]
struct Statements {
    select_all: String,
    select_by_id: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_table<E: PgTable>() -> Self {
        let table = E::TABLE;
        let columns = E::COLUMNS.join(", ");

        // $1 is always the id
        let placeholders = (2..=E::COLUMNS.len() + 1)
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            select_all: format!("SELECT id, {} FROM {} ORDER BY id", columns, table),
            select_by_id: format!("SELECT id, {} FROM {} WHERE id = $1", columns, table),
            insert: format!(
                "INSERT INTO {} (id, {}) VALUES ($1, {})",
                table, columns, placeholders
            ),
            update: format!("UPDATE {} SET {} WHERE id = $1", table, assignments),
            delete: format!("DELETE FROM {} WHERE id = $1", table),
        }
    }
}

/// PostgreSQL repository for any [`PgTable`] entity.
///
/// Uses SQLx prepared statements with bound parameters. `save_changes` runs
/// every staged change inside one transaction.
pub struct PgRepository<E> {
    pool: Arc<PgPool>,
    sql: Statements,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgTable> PgRepository<E> {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            sql: Statements::for_table::<E>(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: PgTable> Repository<E> for PgRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, AppError> {
        let rows = sqlx::query(&self.sql.select_all)
            .fetch_all(self.pool.as_ref())
            .await?;

        let records = rows
            .iter()
            .map(E::from_pg_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, AppError> {
        let row = sqlx::query(&self.sql.select_by_id)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(E::from_pg_row).transpose()?)
    }

    async fn save_changes(&self, changes: ChangeSet<E>) -> Result<u64, AppError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let staged = changes.len();
        let mut tx = self.pool.begin().await?;
        let mut affected = 0;

        for change in changes {
            let result = match &change {
                Change::Insert(record) => {
                    record
                        .bind_columns(sqlx::query(&self.sql.insert).bind(record.id()))
                        .execute(&mut *tx)
                        .await?
                }
                Change::Update(record) => {
                    record
                        .bind_columns(sqlx::query(&self.sql.update).bind(record.id()))
                        .execute(&mut *tx)
                        .await?
                }
                Change::Delete(record) => {
                    sqlx::query(&self.sql.delete)
                        .bind(record.id())
                        .execute(&mut *tx)
                        .await?
                }
            };
            affected += result.rows_affected();
        }

        tx.commit().await?;

        debug!(
            table = E::TABLE,
            staged, affected, "Committed staged changes"
        );

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;

    #[test]
    fn test_user_statements() {
        let sql = Statements::for_table::<User>();

        assert_eq!(
            sql.select_all,
            "SELECT id, full_name, email, phone FROM users ORDER BY id"
        );
        assert_eq!(
            sql.select_by_id,
            "SELECT id, full_name, email, phone FROM users WHERE id = $1"
        );
        assert_eq!(
            sql.insert,
            "INSERT INTO users (id, full_name, email, phone) VALUES ($1, $2, $3, $4)"
        );
        assert_eq!(
            sql.update,
            "UPDATE users SET full_name = $2, email = $3, phone = $4 WHERE id = $1"
        );
        assert_eq!(sql.delete, "DELETE FROM users WHERE id = $1");
    }
}
