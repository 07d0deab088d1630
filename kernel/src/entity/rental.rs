mod cost;
mod id;
mod receipt;
mod returned_at;
mod started_at;
mod status;

pub use self::{cost::*, id::*, receipt::*, returned_at::*, started_at::*, status::*};
use crate::entity::{BikeId, BikePrice, UserId};
use crate::validate::{uuid_v4, Validate};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    user_id: UserId,
    bike_id: BikeId,
    started_at: StartedAt,
    returned_at: Option<ReturnedAt>,
    status: RentalStatus,
    total_cost: Option<RentalCost>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        user_id: UserId,
        bike_id: BikeId,
        started_at: StartedAt,
        returned_at: Option<ReturnedAt>,
        status: RentalStatus,
        total_cost: Option<RentalCost>,
    ) -> Self {
        Self {
            id,
            user_id,
            bike_id,
            started_at,
            returned_at,
            status,
            total_cost,
        }
    }

    /// A fresh rental that begins at `now`.
    pub fn start(id: RentalId, user_id: UserId, bike_id: BikeId, now: OffsetDateTime) -> Self {
        Self::new(
            id,
            user_id,
            bike_id,
            StartedAt::new(now),
            None,
            RentalStatus::Active,
            None,
        )
    }

    /// Closes an active rental at `now` and prices it.
    ///
    /// A completed rental is never reopened or re-priced. A clock reading earlier than the
    /// start is clamped to the start, so the ride is charged as zero hours.
    pub fn complete(
        self,
        now: OffsetDateTime,
        price: &BikePrice,
    ) -> error_stack::Result<(Rental, RentalReceipt), KernelError> {
        match self.status {
            RentalStatus::Completed => Err(Report::new(KernelError::Conflict)
                .attach_printable("rental already completed")),
            RentalStatus::Active => {
                let started = *self.started_at.as_ref();
                let returned = now.max(started);
                let elapsed = returned - started;
                let cost = RentalCost::charge(elapsed, price)?;
                let hours = elapsed.as_seconds_f64() / 3600.0;
                let rental = self.reconstruct(|rental| {
                    rental.returned_at = Some(ReturnedAt::new(returned));
                    rental.status = RentalStatus::Completed;
                    rental.total_cost = Some(cost.clone());
                });
                let receipt = RentalReceipt::new(hours, cost);
                Ok((rental, receipt))
            }
        }
    }
}

impl Validate for Rental {
    fn validate(&self) -> error_stack::Result<(), KernelError> {
        uuid_v4(self.id.as_ref(), "id must be a valid UUIDv4")?;
        if self.user_id.as_ref().is_nil() {
            return Err(Report::new(KernelError::Validation).attach_printable("userid is required"));
        }
        if self.bike_id.as_ref().is_nil() {
            return Err(Report::new(KernelError::Validation).attach_printable("bikeid is required"));
        }
        match (&self.status, &self.returned_at, &self.total_cost) {
            (RentalStatus::Active, None, None) => Ok(()),
            (RentalStatus::Active, _, _) => Err(Report::new(KernelError::Validation)
                .attach_printable("active rental cannot have an end time or cost")),
            (RentalStatus::Completed, Some(returned), Some(cost)) => {
                if returned.as_ref() < self.started_at.as_ref() {
                    return Err(Report::new(KernelError::Validation)
                        .attach_printable("endtime must be after starttime"));
                }
                if cost.as_ref() < &Decimal::ZERO {
                    return Err(Report::new(KernelError::Validation)
                        .attach_printable("totalcost must be greater than or equal to 0"));
                }
                Ok(())
            }
            (RentalStatus::Completed, _, _) => Err(Report::new(KernelError::Validation)
                .attach_printable("completed rental requires an end time and cost")),
        }
    }
}
