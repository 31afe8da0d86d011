//! PostgreSQL table mapping for [`User`].

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use super::pg_repository::PgTable;
use crate::domain::entities::User;

impl PgTable for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["full_name", "email", "phone"];

    fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(User::new(
            row.try_get("id")?,
            row.try_get("full_name")?,
            row.try_get("email")?,
            row.try_get("phone")?,
        ))
    }

    fn bind_columns<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query
            .bind(self.full_name.as_str())
            .bind(self.email.as_str())
            .bind(self.phone.as_deref())
    }
}
