mod description;
mod id;
mod image;
mod location;
mod name;
mod price;
mod status;

pub use self::{description::*, id::*, image::*, location::*, name::*, price::*, status::*};
use crate::validate::{length_between, uuid_v4, Validate};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use rust_decimal::Decimal;
use vodca::References;

// Mirrors the `NUMERIC(10, 2)` storage column.
const PRICE_SCALE: u32 = 2;
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Bike {
    id: BikeId,
    name: BikeName,
    description: BikeDescription,
    price: BikePrice,
    location: BikeLocation,
    image: BikeImage,
    status: BikeStatus,
}

impl Bike {
    pub fn new(
        id: BikeId,
        name: BikeName,
        description: BikeDescription,
        price: BikePrice,
        location: BikeLocation,
        image: BikeImage,
        status: BikeStatus,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            location,
            image,
            status,
        }
    }

    /// Checks a status change requested outside the rental flow.
    ///
    /// Only renting and returning move a bike into or out of `Booked`.
    pub fn ensure_manual_status(&self, next: &BikeStatus) -> error_stack::Result<(), KernelError> {
        match (&self.status, next) {
            (BikeStatus::Booked, BikeStatus::Booked) => Ok(()),
            (BikeStatus::Booked, _) => Err(Report::new(KernelError::Conflict)
                .attach_printable("bike is booked and its status cannot be changed")),
            (_, BikeStatus::Booked) => Err(Report::new(KernelError::Conflict)
                .attach_printable("bike can only be booked by renting it")),
            (
                BikeStatus::Available | BikeStatus::NotAvailable | BikeStatus::Maintenance,
                BikeStatus::Available | BikeStatus::NotAvailable | BikeStatus::Maintenance,
            ) => Ok(()),
        }
    }
}

impl Validate for Bike {
    fn validate(&self) -> error_stack::Result<(), KernelError> {
        uuid_v4(self.id.as_ref(), "id must be a valid UUIDv4")?;
        length_between(
            self.name.as_ref(),
            1,
            100,
            "name is required",
            "name must be less than or equal to 100",
        )?;
        length_between(
            self.description.as_ref(),
            1,
            500,
            "description is required",
            "description must be less than or equal to 500",
        )?;
        length_between(
            self.location.as_ref(),
            1,
            100,
            "location is required",
            "location must be less than or equal to 100",
        )?;
        length_between(
            self.image.as_ref(),
            1,
            500,
            "image is required",
            "image must be less than or equal to 500",
        )?;
        let price: &Decimal = self.price.as_ref();
        if price <= &Decimal::ZERO {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("price_per_hour must be greater than 0"));
        }
        if price.normalize().scale() > PRICE_SCALE {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("price_per_hour must have at most 2 decimal places"));
        }
        if price > &MAX_PRICE {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("price_per_hour must be less than or equal to 99999999.99"));
        }
        Ok(())
    }
}
