use application::transfer::{CreateBikeDto, DeleteBikeDto, GetBikeDto, SelectDto, UpdateBikeDto};
use kernel::prelude::entity::BikeStatus;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::PageRequest;

#[derive(Debug, Deserialize)]
pub struct CreateBikeRequest {
    name: String,
    description: String,
    price_per_hour: Decimal,
    location: String,
    image: String,
    #[serde(default)]
    status: Option<BikeStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBikeRequest {
    name: Option<String>,
    description: Option<String>,
    price_per_hour: Option<Decimal>,
    location: Option<String>,
    image: Option<String>,
    status: Option<BikeStatus>,
}

#[derive(Debug)]
pub struct GetBikeRequest {
    id: Uuid,
}

impl GetBikeRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBikeRequest {
    id: Uuid,
}

impl DeleteBikeRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct BikeTransformer;

impl Intake<PageRequest> for BikeTransformer {
    type To = SelectDto;
    fn emit(&self, input: PageRequest) -> Self::To {
        SelectDto::from(input)
    }
}

impl Intake<GetBikeRequest> for BikeTransformer {
    type To = GetBikeDto;
    fn emit(&self, input: GetBikeRequest) -> Self::To {
        GetBikeDto { id: input.id }
    }
}

impl Intake<CreateBikeRequest> for BikeTransformer {
    type To = CreateBikeDto;
    fn emit(&self, input: CreateBikeRequest) -> Self::To {
        CreateBikeDto {
            name: input.name,
            description: input.description,
            price_per_hour: input.price_per_hour,
            location: input.location,
            image: input.image,
            status: input.status,
        }
    }
}

impl Intake<(Uuid, UpdateBikeRequest)> for BikeTransformer {
    type To = UpdateBikeDto;
    fn emit(&self, (id, req): (Uuid, UpdateBikeRequest)) -> Self::To {
        UpdateBikeDto {
            id,
            name: req.name,
            description: req.description,
            price_per_hour: req.price_per_hour,
            location: req.location,
            image: req.image,
            status: req.status,
        }
    }
}

impl Intake<DeleteBikeRequest> for BikeTransformer {
    type To = DeleteBikeDto;
    fn emit(&self, input: DeleteBikeRequest) -> Self::To {
        DeleteBikeDto { id: input.id }
    }
}
