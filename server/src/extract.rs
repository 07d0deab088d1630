use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use error_stack::Report;

use application::service::AuthenticateService;
use application::transfer::AuthenticateDto;
use kernel::prelude::entity::User;
use kernel::KernelError;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Caller resolved from `Authorization: Bearer <token>`.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppModule> for CurrentUser {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                Report::new(KernelError::Unauthenticated)
                    .attach_printable("authorization token is required")
            })?;
        let user = state
            .current_user(AuthenticateDto {
                token: bearer.token().to_string(),
            })
            .await?;
        Ok(CurrentUser(user))
    }
}
