use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::prelude::entity::User;
use kernel::KernelError;

use crate::transfer::AuthenticateDto;

#[async_trait::async_trait]
pub trait AuthenticateService: 'static + Sync + Send + DependOnUserQuery + DependOnClock {
    /// Resolves the caller behind a bearer token. Inactive accounts are refused.
    async fn current_user(&self, dto: AuthenticateDto) -> error_stack::Result<User, KernelError> {
        let token = dto.token.trim();
        if token.is_empty() {
            return Err(Report::new(KernelError::Unauthenticated)
                .attach_printable("authorization token is required"));
        }

        let mut connection = self.database_connection().transact().await?;
        let now = self.clock().now();
        let user = self
            .user_query()
            .find_by_session_token(&mut connection, token, &now)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Unauthenticated)
                    .attach_printable("invalid or expired session")
            })?;

        user.ensure_active()?;
        tracing::debug!(user_id = %user.id().as_ref(), "authenticated");
        Ok(user)
    }
}

impl<T> AuthenticateService for T where T: DependOnUserQuery + DependOnClock {}
