use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BikeQuery, DependOnBikeQuery, DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{
    BikeModifier, DependOnBikeModifier, DependOnRentalModifier, RentalModifier,
};
use kernel::interface::validate::Validate;
use kernel::prelude::entity::{BikeId, BikeStatus, Rental, RentalId, RentalStatus, User, UserId};
use kernel::KernelError;

use crate::transfer::{
    CreateRentalDto, GetRentalFromUserIdDto, PageDto, ReceiptDto, RentalDto, ReturnRentalDto,
    SelectDto,
};

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static + Sync + Send + DependOnBikeQuery + DependOnRentalModifier + DependOnClock
{
    /// Starts a rental for `requester` and books the bike.
    #[tracing::instrument(skip_all, fields(bike_id = %dto.bike_id))]
    async fn create_rental(
        &self,
        requester: &User,
        dto: CreateRentalDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let bike_id = BikeId::new(dto.bike_id);
        let bike = self
            .bike_query()
            .find_by_id(&mut connection, &bike_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("bike not found"))?;

        if !bike.status().is_rentable() {
            tracing::warn!(status = %bike.status(), "bike is not available to rent");
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("bike is not available to rent"));
        }

        let rental = Rental::start(
            RentalId::new(Uuid::new_v4()),
            requester.id().clone(),
            bike_id,
            self.clock().now(),
        );
        rental.validate()?;

        self.rental_modifier()
            .create_and_book_bike(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        let id: Uuid = rental.id().clone().into();
        tracing::info!(rental_id = %id, user_id = %requester.id().as_ref(), "rental started");
        Ok(id)
    }
}

impl<T> CreateRentalService for T where
    T: DependOnBikeQuery + DependOnRentalModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static
    + Sync
    + Send
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnBikeQuery
    + DependOnBikeModifier
    + DependOnClock
{
    /// Completes a rental, prices it and hands the bike back to the pool.
    #[tracing::instrument(skip_all, fields(rental_id = %dto.rental_id))]
    async fn return_bike(
        &self,
        requester: &User,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<ReceiptDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rental_id = RentalId::new(dto.rental_id);
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &rental_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("rental not found")
            })?;

        requester
            .ensure_owner_or_admin(rental.user_id())
            .attach_printable("you are not allowed to complete this rental")?;

        match rental.status() {
            RentalStatus::Active => {}
            RentalStatus::Completed => {
                tracing::warn!("rental already completed");
                return Err(Report::new(KernelError::Conflict)
                    .attach_printable("rental already completed"));
            }
        }

        let bike = self
            .bike_query()
            .find_by_id(&mut connection, rental.bike_id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable("rental references a missing bike")
            })?;

        let (rental, receipt) = rental.complete(self.clock().now(), bike.price())?;
        rental.validate()?;

        self.rental_modifier()
            .update(&mut connection, &rental)
            .await?;
        self.bike_modifier()
            .update_status(&mut connection, rental.bike_id(), &BikeStatus::Available)
            .await?;
        connection.commit().await?;

        tracing::info!(
            total_hours = receipt.total_hours(),
            total_cost = %receipt.total_cost().as_ref(),
            "rental completed"
        );
        Ok(ReceiptDto::from(receipt))
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnBikeQuery
        + DependOnBikeModifier
        + DependOnClock
{
}

#[async_trait::async_trait]
pub trait GetRentalService: 'static + Sync + Send + DependOnRentalQuery {
    /// Newest first. Visible to the owner and to admins.
    async fn get_rentals_by_user(
        &self,
        requester: &User,
        dto: GetRentalFromUserIdDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let user_id = UserId::new(dto.user_id);
        requester.ensure_owner_or_admin(&user_id)?;

        let mut connection = self.database_connection().transact().await?;
        let rentals = self
            .rental_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;
        tracing::debug!(count = rentals.len(), "rentals by user");
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn get_all_rentals(
        &self,
        requester: &User,
        dto: SelectDto,
    ) -> error_stack::Result<PageDto<RentalDto>, KernelError> {
        requester.ensure_admin()?;

        let mut connection = self.database_connection().transact().await?;
        let page = self
            .rental_query()
            .find_all(&mut connection, &dto.limit, &dto.page)
            .await?;
        Ok(PageDto::from(page))
    }
}

impl<T> GetRentalService for T where T: DependOnRentalQuery {}
