use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{
    Page, SelectLimit, SelectPage, User, UserEmail, UserId, UserName, UserRole, UserStatus,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }

    async fn find_by_session_token(
        &self,
        con: &mut PostgresTransaction,
        token: &str,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_session_token(con, token, now).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<User>, KernelError> {
        PgUserInternal::find_all(con, limit, page).await
    }
}

#[async_trait::async_trait]
impl UserModifier for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con, user).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    status: String,
}

impl TryFrom<UserRow> for User {
    type Error = Report<KernelError>;
    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(value.id),
            UserName::new(value.name),
            UserEmail::new(value.email),
            value.role.parse::<UserRole>()?,
            value.status.parse::<UserStatus>()?,
        ))
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, role, status
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_session_token(
        con: &mut PgConnection,
        token: &str,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT u.id, u.name, u.email, u.role, u.status
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<User>, KernelError> {
        let rows = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, role, status
            FROM users
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(page.offset(limit))
        .fetch_all(&mut *con)
        .await
        .convert_error()?;

        // language=postgresql
        let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(&mut *con)
            .await
            .convert_error()?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(users, *limit, *page, total))
    }

    async fn create(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, email, role, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.name().as_ref())
        .bind(user.email().as_ref())
        .bind(user.role().as_str())
        .bind(user.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
