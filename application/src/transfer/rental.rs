use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructRental, Rental, RentalReceipt, RentalStatus};

#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bike_id: Uuid,
    pub started_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub status: RentalStatus,
    pub total_cost: Option<Decimal>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            user_id,
            bike_id,
            started_at,
            returned_at,
            status,
            total_cost,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            bike_id: bike_id.into(),
            started_at: started_at.into(),
            returned_at: returned_at.map(Into::into),
            status,
            total_cost: total_cost.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDto {
    pub total_hours: f64,
    pub total_cost: Decimal,
}

impl From<RentalReceipt> for ReceiptDto {
    fn from(value: RentalReceipt) -> Self {
        Self {
            total_hours: value.total_hours(),
            total_cost: *value.total_cost().as_ref(),
        }
    }
}

pub struct CreateRentalDto {
    pub bike_id: Uuid,
}

pub struct ReturnRentalDto {
    pub rental_id: Uuid,
}

pub struct GetRentalFromUserIdDto {
    pub user_id: Uuid,
}
