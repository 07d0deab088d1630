use error_stack::{Report, ResultExt};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::Duration;
use vodca::{AsRefln, Fromln};

use crate::entity::BikePrice;
use crate::KernelError;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Amount charged for a completed rental, in the same currency as [`BikePrice`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalCost(Decimal);

impl RentalCost {
    pub fn new(cost: impl Into<Decimal>) -> Self {
        Self(cost.into())
    }

    /// Linear hourly charge rounded to cents, half away from zero.
    ///
    /// Negative durations are charged as zero.
    pub fn charge(elapsed: Duration, price: &BikePrice) -> error_stack::Result<Self, KernelError> {
        let millis = i64::try_from(elapsed.whole_milliseconds().max(0))
            .change_context(KernelError::Internal)
            .attach_printable("Rental duration out of range")?;
        let hours = Decimal::from(millis)
            .checked_div(Decimal::from(MILLIS_PER_HOUR))
            .ok_or_else(|| Report::new(KernelError::Internal))?;
        let cost = hours
            .checked_mul(*price.as_ref())
            .ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable("Rental cost overflowed")
            })?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Ok(Self(cost))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::Duration;

    use super::RentalCost;
    use crate::entity::BikePrice;

    fn price(cents: i64) -> BikePrice {
        BikePrice::new(Decimal::new(cents, 2))
    }

    #[test]
    fn ninety_minutes_at_ten() {
        let cost = RentalCost::charge(Duration::minutes(90), &price(1000)).unwrap();
        assert_eq!(cost, RentalCost::new(Decimal::new(1500, 2)));
    }

    #[test]
    fn two_hours_at_five() {
        let cost = RentalCost::charge(Duration::hours(2), &price(500)).unwrap();
        assert_eq!(cost.as_ref(), &Decimal::new(10, 0));
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        // 30 minutes at 0.01/h is 0.005
        let cost = RentalCost::charge(Duration::minutes(30), &price(1)).unwrap();
        assert_eq!(cost.as_ref(), &Decimal::new(1, 2));
    }

    #[test]
    fn third_of_an_hour_rounds_to_cents() {
        // 20 minutes at 10.00/h is 3.333...
        let cost = RentalCost::charge(Duration::minutes(20), &price(1000)).unwrap();
        assert_eq!(cost.as_ref(), &Decimal::new(333, 2));
    }

    #[test]
    fn negative_duration_is_free() {
        let cost = RentalCost::charge(Duration::minutes(-5), &price(1000)).unwrap();
        assert_eq!(cost.as_ref(), &Decimal::ZERO);
    }
}
