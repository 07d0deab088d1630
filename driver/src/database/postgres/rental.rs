use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    BikeId, Page, Rental, RentalCost, RentalId, RentalStatus, ReturnedAt, SelectLimit,
    SelectPage, StartedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::bike::PgBikeInternal;
use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_id(con, user_id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<Rental>, KernelError> {
        PgRentalInternal::find_all(con, limit, page).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create_and_book_bike(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create_and_book_bike(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::update(con, rental).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    user_id: Uuid,
    bike_id: Uuid,
    start_time: OffsetDateTime,
    end_time: Option<OffsetDateTime>,
    status: String,
    total_cost: Option<Decimal>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = Report<KernelError>;
    fn try_from(value: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental::new(
            RentalId::new(value.id),
            UserId::new(value.user_id),
            BikeId::new(value.bike_id),
            StartedAt::new(value.start_time),
            value.end_time.map(ReturnedAt::new),
            value.status.parse::<RentalStatus>()?,
            value.total_cost.map(RentalCost::new),
        ))
    }
}

fn into_rentals(rows: Vec<RentalRow>) -> error_stack::Result<Vec<Rental>, KernelError> {
    rows.into_iter().map(Rental::try_from).collect()
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, bike_id, start_time, end_time, status, total_cost
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Rental::try_from).transpose()
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, bike_id, start_time, end_time, status, total_cost
            FROM rentals
            WHERE user_id = $1
            ORDER BY start_time DESC, id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        into_rentals(rows)
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, bike_id, start_time, end_time, status, total_cost
            FROM rentals
            ORDER BY start_time DESC, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(page.offset(limit))
        .fetch_all(&mut *con)
        .await
        .convert_error()?;

        // language=postgresql
        let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM rentals"#)
            .fetch_one(&mut *con)
            .await
            .convert_error()?;

        Ok(Page::new(into_rentals(rows)?, *limit, *page, total))
    }

    async fn create_and_book_bike(
        con: &mut PgConnection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if !PgBikeInternal::book_if_available(&mut *con, rental.bike_id()).await? {
            tracing::warn!(bike_id = %rental.bike_id().as_ref(), "lost the race to book bike");
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("bike is not available to rent"));
        }

        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (id, user_id, bike_id, start_time, end_time, status, total_cost)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.user_id().as_ref())
        .bind(rental.bike_id().as_ref())
        .bind(rental.started_at().as_ref())
        .bind(rental.returned_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.status().as_str())
        .bind(rental.total_cost().as_ref().map(|cost| *cost.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET end_time = $2, status = $3, total_cost = $4
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.returned_at().as_ref().map(|at| *at.as_ref()))
        .bind(rental.status().as_str())
        .bind(rental.total_cost().as_ref().map(|cost| *cost.as_ref()))
        .execute(&mut *con)
        .await
        .convert_error()?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // language=postgresql
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM rentals WHERE id = $1)"#,
        )
        .bind(rental.id().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        if exists {
            Err(Report::new(KernelError::Conflict).attach_printable("rental already completed"))
        } else {
            Err(Report::new(KernelError::NotFound).attach_printable("rental not found"))
        }
    }
}
