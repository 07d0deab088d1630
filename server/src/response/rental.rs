use application::transfer::{PageDto, ReceiptDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::RentalStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;
use crate::response::PageResponse;

#[derive(Debug, Serialize)]
pub struct RentedResponse {
    rental_id: Uuid,
}

impl IntoResponse for RentedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Billed duration in fractional hours and the amount charged.
#[derive(Debug, Serialize)]
pub struct ReturnedResponse {
    total_time: f64,
    #[serde(with = "rust_decimal::serde::float")]
    total_price: Decimal,
}

impl IntoResponse for ReturnedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: Uuid,
    user_id: Uuid,
    bike_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    end_time: Option<OffsetDateTime>,
    status: RentalStatus,
    #[serde(with = "rust_decimal::serde::float_option")]
    total_cost: Option<Decimal>,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            bike_id: value.bike_id,
            start_time: value.started_at,
            end_time: value.returned_at,
            status: value.status,
            total_cost: value.total_cost,
        }
    }
}

pub struct RentalPresenter;

impl Exhaust<Uuid> for RentalPresenter {
    type To = RentedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        RentedResponse { rental_id: input }
    }
}

impl Exhaust<ReceiptDto> for RentalPresenter {
    type To = ReturnedResponse;
    fn emit(&self, input: ReceiptDto) -> Self::To {
        ReturnedResponse {
            total_time: input.total_hours,
            total_price: input.total_cost,
        }
    }
}

impl Exhaust<Vec<RentalDto>> for RentalPresenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json(input.into_iter().map(RentalResponse::from).collect())
    }
}

impl Exhaust<PageDto<RentalDto>> for RentalPresenter {
    type To = Json<PageResponse<RentalResponse>>;
    fn emit(&self, input: PageDto<RentalDto>) -> Self::To {
        Json(PageResponse::convert(input, RentalResponse::from))
    }
}
