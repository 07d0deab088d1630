use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Bike, BikeId, Page, SelectLimit, SelectPage};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BikeQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError>;
    /// Same as [`BikeQuery::find_by_id`], and keeps the row locked until the transaction ends.
    async fn find_by_id_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        limit: &SelectLimit,
        page: &SelectPage,
    ) -> error_stack::Result<Page<Bike>, KernelError>;
}

pub trait DependOnBikeQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BikeQuery: BikeQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn bike_query(&self) -> &Self::BikeQuery;
}
