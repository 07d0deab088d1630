use application::transfer::{PageDto, UserDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::{UserRole, UserStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::PageResponse;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    name: String,
    email: String,
    role: UserRole,
    status: UserStatus,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            status: value.status,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<UserDto> for UserPresenter {
    type To = UserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        UserResponse::from(input)
    }
}

impl Exhaust<PageDto<UserDto>> for UserPresenter {
    type To = Json<PageResponse<UserResponse>>;
    fn emit(&self, input: PageDto<UserDto>) -> Self::To {
        Json(PageResponse::convert(input, UserResponse::from))
    }
}
