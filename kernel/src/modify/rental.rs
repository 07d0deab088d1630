use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Rental;
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Books the rental's bike and records the rental on the same transaction.
    ///
    /// Fails with `Conflict` when the bike is no longer `Available`; nothing is written then.
    async fn create_and_book_bike(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    /// Persists the end time, status and cost of a rental that is still active in storage.
    ///
    /// Fails with `Conflict` when the stored rental is already completed and with `NotFound`
    /// when it does not exist.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
