use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BikeLocation(String);

impl BikeLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}
