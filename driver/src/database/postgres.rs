use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::config::{env, env_or};
use crate::error::ConvertError;

pub use self::{bike::*, rental::*, user::*};

mod bike;
mod rental;
mod user;

const POSTGRES_URL: &str = "POSTGRES_URL";
const POSTGRES_MAX_CONNECTIONS: &str = "POSTGRES_MAX_CONNECTIONS";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let max_connections = env_or(POSTGRES_MAX_CONNECTIONS, 10u32)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&url)
            .await
            .convert_error()?;
        tracing::info!(max_connections, "connected to postgres");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let (context, message) = match &error {
                Error::PoolTimedOut => (KernelError::Timeout, "storage is busy, try again later"),
                Error::Database(database) => classify_sqlstate(database.code().as_deref()),
                _ => (KernelError::Internal, "storage failure"),
            };
            Report::from(error)
                .change_context(context)
                .attach_printable(message)
        })
    }
}

fn classify_sqlstate(code: Option<&str>) -> (KernelError, &'static str) {
    match code {
        Some("23505") => (KernelError::Conflict, "resource already exists"),
        Some("23503") => (
            KernelError::Conflict,
            "resource is still referenced by other records",
        ),
        Some("40001") | Some("40P01") => (
            KernelError::Concurrency,
            "concurrent modification, try again later",
        ),
        _ => (KernelError::Internal, "storage failure"),
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::classify_sqlstate;
    use crate::error::ConvertError;

    #[test]
    fn maps_sqlstate_to_kernel_error() {
        let context = |code| classify_sqlstate(code).0;
        assert_eq!(context(Some("23505")), KernelError::Conflict);
        assert_eq!(context(Some("23503")), KernelError::Conflict);
        assert_eq!(context(Some("40001")), KernelError::Concurrency);
        assert_eq!(context(Some("40P01")), KernelError::Concurrency);
        assert_eq!(context(Some("42P01")), KernelError::Internal);
        assert_eq!(context(None), KernelError::Internal);
    }

    #[test]
    fn pool_timeout_is_timeout() {
        let report = Err::<(), _>(sqlx::Error::PoolTimedOut)
            .convert_error()
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);

        let report = Err::<(), _>(sqlx::Error::RowNotFound)
            .convert_error()
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        assert_eq!(report.downcast_ref::<&str>(), Some(&"storage failure"));
    }
}
