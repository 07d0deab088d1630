use crate::entity::RentalCost;

/// Outcome of returning a bike.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalReceipt {
    total_hours: f64,
    total_cost: RentalCost,
}

impl RentalReceipt {
    pub fn new(total_hours: f64, total_cost: RentalCost) -> Self {
        Self {
            total_hours,
            total_cost,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    pub fn total_cost(&self) -> &RentalCost {
        &self.total_cost
    }
}
