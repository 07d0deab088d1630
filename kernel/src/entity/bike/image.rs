use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BikeImage(String);

impl BikeImage {
    pub fn new(image: impl Into<String>) -> Self {
        Self(image.into())
    }
}
