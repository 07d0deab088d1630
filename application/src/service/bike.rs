use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BikeQuery, DependOnBikeQuery};
use kernel::interface::update::{BikeModifier, DependOnBikeModifier};
use kernel::interface::validate::Validate;
use kernel::prelude::entity::{
    Bike, BikeDescription, BikeId, BikeImage, BikeLocation, BikeName, BikePrice, BikeStatus,
    DestructBike, User,
};
use kernel::KernelError;

use crate::transfer::{
    BikeDto, CreateBikeDto, DeleteBikeDto, GetBikeDto, PageDto, SelectDto, UpdateBikeDto,
};

#[async_trait::async_trait]
pub trait GetBikeService: 'static + Sync + Send + DependOnBikeQuery {
    async fn get_bike(&self, dto: GetBikeDto) -> error_stack::Result<BikeDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BikeId::new(dto.id);
        let bike = self
            .bike_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("bike not found"))?;

        Ok(BikeDto::from(bike))
    }

    async fn get_all_bikes(
        &self,
        dto: SelectDto,
    ) -> error_stack::Result<PageDto<BikeDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let page = self
            .bike_query()
            .find_all(&mut connection, &dto.limit, &dto.page)
            .await?;
        tracing::debug!(total = page.total(), "bikes listed");
        Ok(PageDto::from(page))
    }
}

impl<T> GetBikeService for T where T: DependOnBikeQuery {}

#[async_trait::async_trait]
pub trait CreateBikeService: 'static + Sync + Send + DependOnBikeModifier {
    async fn create_bike(
        &self,
        requester: &User,
        dto: CreateBikeDto,
    ) -> error_stack::Result<Uuid, KernelError> {
        requester.ensure_admin()?;

        let status = dto.status.unwrap_or_default();
        if let BikeStatus::Booked = status {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("a new bike cannot start out booked"));
        }

        let uuid = Uuid::new_v4();
        let bike = Bike::new(
            BikeId::new(uuid),
            BikeName::new(dto.name),
            BikeDescription::new(dto.description),
            BikePrice::new(dto.price_per_hour),
            BikeLocation::new(dto.location),
            BikeImage::new(dto.image),
            status,
        );
        bike.validate()?;

        let mut connection = self.database_connection().transact().await?;
        self.bike_modifier().create(&mut connection, &bike).await?;
        connection.commit().await?;

        tracing::info!(bike_id = %uuid, "bike created");
        Ok(uuid)
    }
}

impl<T> CreateBikeService for T where T: DependOnBikeModifier {}

#[async_trait::async_trait]
pub trait UpdateBikeService: 'static + Sync + Send + DependOnBikeQuery + DependOnBikeModifier {
    async fn update_bike(
        &self,
        requester: &User,
        dto: UpdateBikeDto,
    ) -> error_stack::Result<(), KernelError> {
        requester.ensure_admin()?;

        let mut connection = self.database_connection().transact().await?;
        let id = BikeId::new(dto.id);
        let bike = self
            .bike_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("bike not found"))?;

        if let Some(status) = &dto.status {
            bike.ensure_manual_status(status)?;
        }

        let DestructBike {
            id,
            name,
            description,
            price,
            location,
            image,
            status,
        } = bike.into_destruct();
        let bike = Bike::new(
            id,
            dto.name.map(BikeName::new).unwrap_or(name),
            dto.description.map(BikeDescription::new).unwrap_or(description),
            dto.price_per_hour.map(BikePrice::new).unwrap_or(price),
            dto.location.map(BikeLocation::new).unwrap_or(location),
            dto.image.map(BikeImage::new).unwrap_or(image),
            dto.status.unwrap_or(status),
        );
        bike.validate()?;

        self.bike_modifier().update(&mut connection, &bike).await?;
        connection.commit().await?;

        tracing::info!(bike_id = %dto.id, status = %bike.status(), "bike updated");
        Ok(())
    }
}

impl<T> UpdateBikeService for T where T: DependOnBikeQuery + DependOnBikeModifier {}

#[async_trait::async_trait]
pub trait DeleteBikeService: 'static + Sync + Send + DependOnBikeQuery + DependOnBikeModifier {
    async fn delete_bike(
        &self,
        requester: &User,
        dto: DeleteBikeDto,
    ) -> error_stack::Result<(), KernelError> {
        requester.ensure_admin()?;

        let mut connection = self.database_connection().transact().await?;
        let id = BikeId::new(dto.id);
        let bike = self
            .bike_query()
            .find_by_id_for_update(&mut connection, &id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("bike not found"))?;

        if let BikeStatus::Booked = bike.status() {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("bike is booked and cannot be deleted"));
        }

        self.bike_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(bike_id = %dto.id, "bike deleted");
        Ok(())
    }
}

impl<T> DeleteBikeService for T where T: DependOnBikeQuery + DependOnBikeModifier {}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use kernel::prelude::entity::{BikeId, BikeStatus, SelectLimit, SelectPage, UserStatus};
    use kernel::KernelError;

    use crate::memory::MemoryModule;
    use crate::service::{
        CreateBikeService, CreateRentalService, DeleteBikeService, GetBikeService,
        UpdateBikeService,
    };
    use crate::transfer::{
        CreateBikeDto, CreateRentalDto, DeleteBikeDto, GetBikeDto, SelectDto, UpdateBikeDto,
    };

    fn new_bike(status: Option<BikeStatus>) -> CreateBikeDto {
        CreateBikeDto {
            name: "Gravel".to_string(),
            description: "Steel frame".to_string(),
            price_per_hour: Decimal::new(750, 2),
            location: "Dock 1".to_string(),
            image: "https://img.example/gravel.png".to_string(),
            status,
        }
    }

    fn status_only(id: &BikeId, status: BikeStatus) -> UpdateBikeDto {
        UpdateBikeDto {
            id: id.clone().into(),
            name: None,
            description: None,
            price_per_hour: None,
            location: None,
            image: None,
            status: Some(status),
        }
    }

    #[tokio::test]
    async fn admin_creates_available_bike() {
        let module = MemoryModule::default();
        let admin = module.seed_user(true, UserStatus::Active).await;

        let id = module.create_bike(&admin, new_bike(None)).await.unwrap();
        let bike = module.get_bike(GetBikeDto { id }).await.unwrap();
        assert_eq!(bike.status, BikeStatus::Available);
        assert_eq!(bike.price_per_hour, Decimal::new(750, 2));
    }

    #[tokio::test]
    async fn create_rejects_riders_and_invalid_input() {
        let module = MemoryModule::default();
        let rider = module.seed_user(false, UserStatus::Active).await;
        let admin = module.seed_user(true, UserStatus::Active).await;

        let report = module.create_bike(&rider, new_bike(None)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);

        let report = module
            .create_bike(&admin, new_bike(Some(BikeStatus::Booked)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        let mut free = new_bike(None);
        free.price_per_hour = Decimal::ZERO;
        let report = module.create_bike(&admin, free).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn missing_bike_is_not_found() {
        let module = MemoryModule::default();
        let report = module
            .get_bike(GetBikeDto { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn lists_bikes_by_page() {
        let module = MemoryModule::default();
        for _ in 0..5 {
            module.seed_bike(500, BikeStatus::Available).await;
        }
        let page = module
            .get_all_bikes(SelectDto {
                limit: SelectLimit::new(2),
                page: SelectPage::new(3),
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let module = MemoryModule::default();
        let admin = module.seed_user(true, UserStatus::Active).await;
        let bike = module.seed_bike(500, BikeStatus::Available).await;

        module
            .update_bike(
                &admin,
                UpdateBikeDto {
                    id: bike.id().clone().into(),
                    name: Some("Renamed".to_string()),
                    description: None,
                    price_per_hour: Some(Decimal::new(900, 2)),
                    location: None,
                    image: None,
                    status: Some(BikeStatus::Maintenance),
                },
            )
            .await
            .unwrap();

        let updated = module.bike(bike.id()).await.unwrap();
        assert_eq!(updated.name().as_ref(), "Renamed");
        assert_eq!(updated.price().as_ref(), &Decimal::new(900, 2));
        assert_eq!(updated.location(), bike.location());
        assert_eq!(updated.status(), &BikeStatus::Maintenance);
    }

    #[tokio::test]
    async fn booked_status_cannot_be_set_or_cleared_by_hand() {
        let module = MemoryModule::default();
        let admin = module.seed_user(true, UserStatus::Active).await;
        let rider = module.seed_user(false, UserStatus::Active).await;
        let bike = module.seed_bike(500, BikeStatus::Available).await;

        let report = module
            .update_bike(&admin, status_only(bike.id(), BikeStatus::Booked))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        module
            .create_rental(
                &rider,
                CreateRentalDto {
                    bike_id: bike.id().clone().into(),
                },
            )
            .await
            .unwrap();
        let report = module
            .update_bike(&admin, status_only(bike.id(), BikeStatus::Available))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        module.assert_booking_consistent().await;
    }

    #[tokio::test]
    async fn delete_refuses_booked_and_rented_bikes() {
        let module = MemoryModule::default();
        let admin = module.seed_user(true, UserStatus::Active).await;
        let rider = module.seed_user(false, UserStatus::Active).await;
        let idle = module.seed_bike(500, BikeStatus::Available).await;
        let rented = module.seed_bike(500, BikeStatus::Available).await;
        module
            .create_rental(
                &rider,
                CreateRentalDto {
                    bike_id: rented.id().clone().into(),
                },
            )
            .await
            .unwrap();

        let delete = |id: &BikeId| DeleteBikeDto {
            id: id.clone().into(),
        };
        let report = module
            .delete_bike(&admin, delete(rented.id()))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let report = module.delete_bike(&rider, delete(idle.id())).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Forbidden);

        module.delete_bike(&admin, delete(idle.id())).await.unwrap();
        assert!(module.bike(idle.id()).await.is_none());

        let report = module
            .delete_bike(&admin, delete(idle.id()))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }
}
