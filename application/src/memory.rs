use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use error_stack::Report;
use rust_decimal::Decimal;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BikeQuery, DependOnBikeQuery, DependOnRentalQuery, DependOnUserQuery, RentalQuery, UserQuery,
};
use kernel::interface::update::{
    BikeModifier, DependOnBikeModifier, DependOnRentalModifier, DependOnUserModifier,
    RentalModifier, UserModifier,
};
use kernel::prelude::entity::{
    Bike, BikeDescription, BikeId, BikeImage, BikeLocation, BikeName, BikePrice, BikeStatus, Page,
    Rental, RentalId, RentalStatus, SelectLimit, SelectPage, User, UserEmail, UserId, UserName,
    UserRole, UserStatus,
};
use kernel::KernelError;

#[derive(Debug, Clone, Default)]
pub struct Tables {
    bikes: Vec<Bike>,
    rentals: Vec<Rental>,
    users: Vec<User>,
    sessions: Vec<(String, UserId, OffsetDateTime)>,
}

/// Single-writer store: a transaction owns every table until it is dropped.
pub struct MemoryTransaction {
    tables: OwnedMutexGuard<Tables>,
    backup: Option<Tables>,
}

impl Deref for MemoryTransaction {
    type Target = Tables;
    fn deref(&self) -> &Self::Target {
        &self.tables
    }
}

impl DerefMut for MemoryTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tables
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if let Some(backup) = self.backup.take() {
            *self.tables = backup;
        }
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        self.backup = None;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<tokio::sync::Mutex<Tables>>,
    fail_bike_release: Arc<AtomicBool>,
    contend_next_booking: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let tables = Arc::clone(&self.tables).lock_owned().await;
        let backup = Some(tables.clone());
        Ok(MemoryTransaction { tables, backup })
    }
}

fn page<T: Clone>(items: &[T], limit: &SelectLimit, page: &SelectPage) -> Page<T> {
    let total = items.len() as i64;
    let selected = items
        .iter()
        .skip(page.offset(limit) as usize)
        .take(*limit.as_ref() as usize)
        .cloned()
        .collect();
    Page::new(selected, *limit, *page, total)
}

#[async_trait::async_trait]
impl BikeQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError> {
        Ok(con.bikes.iter().find(|bike| bike.id() == id).cloned())
    }

    async fn find_by_id_for_update(
        &self,
        con: &mut MemoryTransaction,
        id: &BikeId,
    ) -> error_stack::Result<Option<Bike>, KernelError> {
        BikeQuery::find_by_id(self, con, id).await
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        page_no: &SelectPage,
    ) -> error_stack::Result<Page<Bike>, KernelError> {
        Ok(page(&con.bikes, limit, page_no))
    }
}

#[async_trait::async_trait]
impl BikeModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError> {
        con.bikes.push(bike.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        bike: &Bike,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .bikes
            .iter_mut()
            .find(|stored| stored.id() == bike.id())
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        *stored = bike.clone();
        Ok(())
    }

    async fn update_status(
        &self,
        con: &mut MemoryTransaction,
        id: &BikeId,
        status: &BikeStatus,
    ) -> error_stack::Result<(), KernelError> {
        if self.fail_bike_release.load(Ordering::SeqCst) && status == &BikeStatus::Available {
            return Err(Report::new(KernelError::Internal).attach_printable("injected failure"));
        }
        let index = con
            .bikes
            .iter()
            .position(|bike| bike.id() == id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        let bike = con.bikes.remove(index);
        con.bikes
            .insert(index, bike.reconstruct(|bike| bike.status = *status));
        Ok(())
    }

    async fn book_if_available(
        &self,
        con: &mut MemoryTransaction,
        id: &BikeId,
    ) -> error_stack::Result<bool, KernelError> {
        if self.contend_next_booking.swap(false, Ordering::SeqCst) {
            // Another rental books the bike between the caller's read and this write.
            self.update_status(con, id, &BikeStatus::Booked).await?;
        }
        let available = con
            .bikes
            .iter()
            .any(|bike| bike.id() == id && bike.status() == &BikeStatus::Available);
        if !available {
            return Ok(false);
        }
        self.update_status(con, id, &BikeStatus::Booked).await?;
        Ok(true)
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        id: &BikeId,
    ) -> error_stack::Result<(), KernelError> {
        if con.rentals.iter().any(|rental| rental.bike_id() == id) {
            return Err(Report::new(KernelError::Conflict));
        }
        let before = con.bikes.len();
        con.bikes.retain(|bike| bike.id() != id);
        if con.bikes.len() == before {
            return Err(Report::new(KernelError::NotFound));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RentalQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.rentals.iter().find(|rental| rental.id() == id).cloned())
    }

    async fn find_by_user_id(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals: Vec<Rental> = con
            .rentals
            .iter()
            .filter(|rental| rental.user_id() == user_id)
            .cloned()
            .collect();
        rentals.sort_by(|a, b| b.started_at().as_ref().cmp(a.started_at().as_ref()));
        Ok(rentals)
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        page_no: &SelectPage,
    ) -> error_stack::Result<Page<Rental>, KernelError> {
        Ok(page(&con.rentals, limit, page_no))
    }
}

#[async_trait::async_trait]
impl RentalModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn create_and_book_bike(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if !self.book_if_available(con, rental.bike_id()).await? {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("bike is not available to rent"));
        }
        con.rentals.push(rental.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        let stored = con
            .rentals
            .iter_mut()
            .find(|stored| stored.id() == rental.id())
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if stored.status() != &RentalStatus::Active {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("rental already completed"));
        }
        *stored = rental.clone();
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserQuery for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_session_token(
        &self,
        con: &mut MemoryTransaction,
        token: &str,
        now: &OffsetDateTime,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let user_id = con
            .sessions
            .iter()
            .find(|(stored, _, expires_at)| stored == token && expires_at > now)
            .map(|(_, user_id, _)| user_id.clone());
        Ok(user_id.and_then(|id| con.users.iter().find(|user| user.id() == &id).cloned()))
    }

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
        limit: &SelectLimit,
        page_no: &SelectPage,
    ) -> error_stack::Result<Page<User>, KernelError> {
        Ok(page(&con.users, limit, page_no))
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        con.users.push(user.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<OffsetDateTime>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(datetime!(2024-05-01 09:00 UTC))))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.0.lock().unwrap()
    }
}

/// Service module wired to the in-memory store and a clock the test moves by hand.
#[derive(Clone, Default)]
pub struct MemoryModule {
    database: MemoryDatabase,
    clock: ManualClock,
}

impl MemoryModule {
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    pub fn advance(&self, duration: Duration) {
        *self.clock.0.lock().unwrap() += duration;
    }

    pub fn rewind(&self, duration: Duration) {
        *self.clock.0.lock().unwrap() -= duration;
    }

    pub fn fail_bike_release(&self, fail: bool) {
        self.database.fail_bike_release.store(fail, Ordering::SeqCst);
    }

    pub fn contend_next_booking(&self) {
        self.database
            .contend_next_booking
            .store(true, Ordering::SeqCst);
    }

    pub async fn seed_user(&self, admin: bool, status: UserStatus) -> User {
        let id = Uuid::new_v4();
        let role = if admin {
            UserRole::Admin
        } else {
            UserRole::Default
        };
        let user = User::new(
            UserId::new(id),
            UserName::new("rider"),
            UserEmail::new(format!("{id}@example.com")),
            role,
            status,
        );
        self.database.tables.lock().await.users.push(user.clone());
        user
    }

    pub async fn seed_session(&self, token: &str, user: &User, expires_at: OffsetDateTime) {
        self.database.tables.lock().await.sessions.push((
            token.to_string(),
            user.id().clone(),
            expires_at,
        ));
    }

    pub async fn seed_bike(&self, cents_per_hour: i64, status: BikeStatus) -> Bike {
        let bike = Bike::new(
            BikeId::new(Uuid::new_v4()),
            BikeName::new("City cruiser"),
            BikeDescription::new("Seven speed"),
            BikePrice::new(Decimal::new(cents_per_hour, 2)),
            BikeLocation::new("Dock 4"),
            BikeImage::new("https://img.example/cruiser.png"),
            status,
        );
        self.database.tables.lock().await.bikes.push(bike.clone());
        bike
    }

    pub async fn bike(&self, id: &BikeId) -> Option<Bike> {
        let tables = self.database.tables.lock().await;
        tables.bikes.iter().find(|bike| bike.id() == id).cloned()
    }

    pub async fn rental(&self, id: &RentalId) -> Option<Rental> {
        let tables = self.database.tables.lock().await;
        tables.rentals.iter().find(|rental| rental.id() == id).cloned()
    }

    pub async fn rentals(&self) -> Vec<Rental> {
        self.database.tables.lock().await.rentals.clone()
    }

    /// A bike is booked exactly when one active rental points at it.
    pub async fn assert_booking_consistent(&self) {
        let tables = self.database.tables.lock().await;
        for bike in &tables.bikes {
            let active = tables
                .rentals
                .iter()
                .filter(|rental| {
                    rental.bike_id() == bike.id() && rental.status() == &RentalStatus::Active
                })
                .count();
            match bike.status() {
                BikeStatus::Booked => assert_eq!(active, 1),
                BikeStatus::Available | BikeStatus::NotAvailable | BikeStatus::Maintenance => {
                    assert_eq!(active, 0)
                }
            }
        }
    }
}

impl DependOnDatabaseConnection for MemoryModule {
    type DatabaseConnection = MemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnClock for MemoryModule {
    type Clock = ManualClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnBikeQuery for MemoryModule {
    type BikeQuery = MemoryDatabase;
    fn bike_query(&self) -> &Self::BikeQuery {
        &self.database
    }
}

impl DependOnBikeModifier for MemoryModule {
    type BikeModifier = MemoryDatabase;
    fn bike_modifier(&self) -> &Self::BikeModifier {
        &self.database
    }
}

impl DependOnRentalQuery for MemoryModule {
    type RentalQuery = MemoryDatabase;
    fn rental_query(&self) -> &Self::RentalQuery {
        &self.database
    }
}

impl DependOnRentalModifier for MemoryModule {
    type RentalModifier = MemoryDatabase;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &self.database
    }
}

impl DependOnUserQuery for MemoryModule {
    type UserQuery = MemoryDatabase;
    fn user_query(&self) -> &Self::UserQuery {
        &self.database
    }
}

impl DependOnUserModifier for MemoryModule {
    type UserModifier = MemoryDatabase;
    fn user_modifier(&self) -> &Self::UserModifier {
        &self.database
    }
}
