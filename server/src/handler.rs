use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    PostgresBikeRepository, PostgresDatabase, PostgresRentalRepository, PostgresUserRepository,
};
use driver::SystemClock;
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::{DependOnBikeQuery, DependOnRentalQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnBikeModifier, DependOnRentalModifier, DependOnUserModifier};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler {
    pgpool: PostgresDatabase,
    clock: SystemClock,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            clock: SystemClock,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnClock for Handler {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnBikeQuery for Handler {
    type BikeQuery = PostgresBikeRepository;
    fn bike_query(&self) -> &Self::BikeQuery {
        &PostgresBikeRepository
    }
}

impl DependOnBikeModifier for Handler {
    type BikeModifier = PostgresBikeRepository;
    fn bike_modifier(&self) -> &Self::BikeModifier {
        &PostgresBikeRepository
    }
}

impl DependOnRentalQuery for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}
