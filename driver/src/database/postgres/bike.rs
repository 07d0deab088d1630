use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BikeQuery;
use kernel::interface::update::BikeModifier;
use kernel::prelude::entity::{
    Bike, BikeDescription, BikeId, BikeImage, BikeLocation, BikeName, BikePrice, BikeStatus, Page,
    SelectLimit, SelectPage,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBikeRepository;

#[async_trait::async_trait]
impl BikeQuery for PostgresBikeRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError> {
        PgBikeInternal::find_by_id(con, id, false).await
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError> {
        PgBikeInternal::find_by_id(con, id, true).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<Bike>, KernelError> {
        PgBikeInternal::find_all(con, limit, page).await
    }
}

#[async_trait::async_trait]
impl BikeModifier for PostgresBikeRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError> {
        PgBikeInternal::create(con, bike).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError> {
        PgBikeInternal::update(con, bike).await
    }

    async fn update_status(
        &self,
        con: &mut PostgresTransaction,
        id: &BikeId,
        status: &BikeStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgBikeInternal::update_status(con, id, status).await
    }

    async fn book_if_available(
        &self,
        con: &mut PostgresTransaction,
        id: &BikeId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBikeInternal::book_if_available(con, id).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &BikeId,
    ) -> error_stack::Result<(), KernelError> {
        PgBikeInternal::delete(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct BikeRow {
    id: Uuid,
    name: String,
    description: String,
    price_per_hour: Decimal,
    location: String,
    image: String,
    status: String,
}

impl TryFrom<BikeRow> for Bike {
    type Error = Report<KernelError>;
    fn try_from(value: BikeRow) -> Result<Self, Self::Error> {
        Ok(Bike::new(
            BikeId::new(value.id),
            BikeName::new(value.name),
            BikeDescription::new(value.description),
            BikePrice::new(value.price_per_hour),
            BikeLocation::new(value.location),
            BikeImage::new(value.image),
            value.status.parse::<BikeStatus>()?,
        ))
    }
}

fn not_found() -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable("bike not found")
}

pub(in crate::database) struct PgBikeInternal;

impl PgBikeInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BikeId,
        lock: bool,
    ) -> error_stack::Result<Option<Bike>, KernelError> {
        let query = if lock {
            // language=postgresql
            r#"
            SELECT id, name, description, price_per_hour, location, image, status
            FROM bikes
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            // language=postgresql
            r#"
            SELECT id, name, description, price_per_hour, location, image, status
            FROM bikes
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, BikeRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        row.map(Bike::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<Bike>, KernelError> {
        let rows = sqlx::query_as::<_, BikeRow>(
            // language=postgresql
            r#"
            SELECT id, name, description, price_per_hour, location, image, status
            FROM bikes
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(page.offset(limit))
        .fetch_all(&mut *con)
        .await
        .convert_error()?;

        // language=postgresql
        let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM bikes"#)
            .fetch_one(&mut *con)
            .await
            .convert_error()?;

        let bikes = rows
            .into_iter()
            .map(Bike::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(bikes, *limit, *page, total))
    }

    async fn create(con: &mut PgConnection, bike: &Bike) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO bikes (id, name, description, price_per_hour, location, image, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(bike.id().as_ref())
        .bind(bike.name().as_ref())
        .bind(bike.description().as_ref())
        .bind(bike.price().as_ref())
        .bind(bike.location().as_ref())
        .bind(bike.image().as_ref())
        .bind(bike.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, bike: &Bike) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE bikes
            SET name = $2, description = $3, price_per_hour = $4, location = $5, image = $6, status = $7
            WHERE id = $1
            "#,
        )
        .bind(bike.id().as_ref())
        .bind(bike.name().as_ref())
        .bind(bike.description().as_ref())
        .bind(bike.price().as_ref())
        .bind(bike.location().as_ref())
        .bind(bike.image().as_ref())
        .bind(bike.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        match result.rows_affected() {
            0 => Err(not_found()),
            _ => Ok(()),
        }
    }

    async fn update_status(
        con: &mut PgConnection,
        id: &BikeId,
        status: &BikeStatus,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE bikes
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(status.as_str())
        .execute(con)
        .await
        .convert_error()?;
        match result.rows_affected() {
            0 => Err(not_found()),
            _ => Ok(()),
        }
    }

    pub(in crate::database) async fn book_if_available(
        con: &mut PgConnection,
        id: &BikeId,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE bikes
            SET status = 'booked'
            WHERE id = $1 AND status = 'available'
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(con: &mut PgConnection, id: &BikeId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM bikes
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        match result.rows_affected() {
            0 => Err(not_found()),
            _ => Ok(()),
        }
    }
}
