use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Price charged for one hour of riding.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BikePrice(Decimal);

impl BikePrice {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }
}
