use application::transfer::{CreateRentalDto, GetRentalFromUserIdDto, ReturnRentalDto, SelectDto};
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::PageRequest;

#[derive(Debug)]
pub struct RentBikeRequest {
    bike_id: Uuid,
}

impl RentBikeRequest {
    pub fn new(bike_id: Uuid) -> Self {
        Self { bike_id }
    }
}

#[derive(Debug)]
pub struct ReturnBikeRequest {
    rental_id: Uuid,
}

impl ReturnBikeRequest {
    pub fn new(rental_id: Uuid) -> Self {
        Self { rental_id }
    }
}

#[derive(Debug)]
pub struct GetRentalsRequest {
    user_id: Uuid,
}

impl GetRentalsRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

pub struct RentalTransformer;

impl Intake<RentBikeRequest> for RentalTransformer {
    type To = CreateRentalDto;
    fn emit(&self, input: RentBikeRequest) -> Self::To {
        CreateRentalDto {
            bike_id: input.bike_id,
        }
    }
}

impl Intake<ReturnBikeRequest> for RentalTransformer {
    type To = ReturnRentalDto;
    fn emit(&self, input: ReturnBikeRequest) -> Self::To {
        ReturnRentalDto {
            rental_id: input.rental_id,
        }
    }
}

impl Intake<GetRentalsRequest> for RentalTransformer {
    type To = GetRentalFromUserIdDto;
    fn emit(&self, input: GetRentalsRequest) -> Self::To {
        GetRentalFromUserIdDto {
            user_id: input.user_id,
        }
    }
}

impl Intake<PageRequest> for RentalTransformer {
    type To = SelectDto;
    fn emit(&self, input: PageRequest) -> Self::To {
        SelectDto::from(input)
    }
}
