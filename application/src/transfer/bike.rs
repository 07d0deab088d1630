use rust_decimal::Decimal;
use uuid::Uuid;

use kernel::prelude::entity::{Bike, BikeStatus, DestructBike};

#[derive(Debug, Clone)]
pub struct BikeDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_hour: Decimal,
    pub location: String,
    pub image: String,
    pub status: BikeStatus,
}

impl From<Bike> for BikeDto {
    fn from(value: Bike) -> Self {
        let DestructBike {
            id,
            name,
            description,
            price,
            location,
            image,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price_per_hour: price.into(),
            location: location.into(),
            image: image.into(),
            status,
        }
    }
}

pub struct GetBikeDto {
    pub id: Uuid,
}

pub struct CreateBikeDto {
    pub name: String,
    pub description: String,
    pub price_per_hour: Decimal,
    pub location: String,
    pub image: String,
    pub status: Option<BikeStatus>,
}

pub struct UpdateBikeDto {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_per_hour: Option<Decimal>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub status: Option<BikeStatus>,
}

pub struct DeleteBikeDto {
    pub id: Uuid,
}
