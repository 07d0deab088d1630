use application::transfer::{BikeDto, PageDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::BikeStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::PageResponse;

#[derive(Debug, Serialize)]
pub struct CreatedBikeResponse {
    id: Uuid,
}

impl IntoResponse for CreatedBikeResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BikeResponse {
    id: Uuid,
    name: String,
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    price_per_hour: Decimal,
    location: String,
    image: String,
    status: BikeStatus,
}

impl From<BikeDto> for BikeResponse {
    fn from(value: BikeDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price_per_hour: value.price_per_hour,
            location: value.location,
            image: value.image,
            status: value.status,
        }
    }
}

impl IntoResponse for BikeResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BikePresenter;

impl Exhaust<Uuid> for BikePresenter {
    type To = CreatedBikeResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedBikeResponse { id: input }
    }
}

impl Exhaust<BikeDto> for BikePresenter {
    type To = BikeResponse;
    fn emit(&self, input: BikeDto) -> Self::To {
        BikeResponse::from(input)
    }
}

impl Exhaust<PageDto<BikeDto>> for BikePresenter {
    type To = Json<PageResponse<BikeResponse>>;
    fn emit(&self, input: PageDto<BikeDto>) -> Self::To {
        Json(PageResponse::convert(input, BikeResponse::from))
    }
}

impl Exhaust<()> for BikePresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
