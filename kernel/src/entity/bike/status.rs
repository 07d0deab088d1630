use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BikeStatus {
    #[default]
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "notavailable")]
    NotAvailable,
    #[serde(rename = "booked")]
    Booked,
    #[serde(rename = "maintenance")]
    Maintenance,
}

impl BikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BikeStatus::Available => "available",
            BikeStatus::NotAvailable => "notavailable",
            BikeStatus::Booked => "booked",
            BikeStatus::Maintenance => "maintenance",
        }
    }

    pub fn is_rentable(&self) -> bool {
        match self {
            BikeStatus::Available => true,
            BikeStatus::NotAvailable | BikeStatus::Booked | BikeStatus::Maintenance => false,
        }
    }
}

impl Display for BikeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BikeStatus {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "notavailable" => Ok(Self::NotAvailable),
            "booked" => Ok(Self::Booked),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown bike status: {other}"))),
        }
    }
}
