use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Page, SelectLimit, SelectPage, User, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError>;
    /// Resolves a session token issued by the auth service that is still valid at `now`.
    async fn find_by_session_token(
        &self,
        con: &mut Self::Transaction,
        token: &str,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<User>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<User>, KernelError>;
}

pub trait DependOnUserQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type UserQuery: UserQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn user_query(&self) -> &Self::UserQuery;
}
