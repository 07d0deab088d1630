use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Bike, BikeId, BikeStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BikeModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError>;
    /// Overwrites every field. Fails with `NotFound` when no row matches.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError>;
    /// Fails with `NotFound` when no row matches.
    async fn update_status(
        &self,
        con: &mut Self::Transaction,
        id: &BikeId,
        status: &BikeStatus,
    ) -> error_stack::Result<(), KernelError>;
    /// Atomically moves an `Available` bike to `Booked`.
    ///
    /// Returns `false` when the bike is missing or in any other status, leaving it untouched.
    async fn book_if_available(
        &self,
        con: &mut Self::Transaction,
        id: &BikeId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Fails with `NotFound` when no row matches.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &BikeId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBikeModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BikeModifier: BikeModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn bike_modifier(&self) -> &Self::BikeModifier;
}
