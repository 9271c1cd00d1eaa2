//! Pure lifecycle and billing rules.
//!
//! Everything here is deterministic and side-effect free so it can be unit
//! tested without a database: pricing normalization for event creation,
//! listing-fee math, the visibility deadline used by the expiry sweep, and
//! settlement amounts.

use rust_decimal::Decimal;
use thiserror::Error;
use time::{Duration, PrimitiveDateTime};

/// Errors raised while validating organizer-supplied pricing fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A positive price was submitted on an event flagged as free.
    #[error("a free event cannot carry a price (price = {0})")]
    PricedButFree(Decimal),
    /// The paid-visibility duration must not be negative.
    #[error("post_duration must be zero or positive (got {0})")]
    NegativeDuration(i32),
}

/// Normalized pricing for an event: `is_paid == false` always implies
/// `price == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    pub is_paid: bool,
    pub price: Decimal,
}

/// Validate and normalize the `(is_paid, price)` pair from an event form.
///
/// A positive price on an event declared free is rejected; a price of zero
/// (or below) silently forces `is_paid = false` and a zero price.
pub fn normalize_pricing(is_paid: bool, price: Decimal) -> Result<Pricing, PricingError> {
    if price > Decimal::ZERO {
        if !is_paid {
            return Err(PricingError::PricedButFree(price));
        }
        return Ok(Pricing {
            is_paid: true,
            price,
        });
    }
    Ok(Pricing {
        is_paid: false,
        price: Decimal::ZERO,
    })
}

/// Total listing fee an organizer owes for `post_duration` days of
/// visibility at the configured per-day rate.
pub fn listing_fee(rate_per_day: Decimal, post_duration: i32) -> Result<Decimal, PricingError> {
    if post_duration < 0 {
        return Err(PricingError::NegativeDuration(post_duration));
    }
    Ok(rate_per_day * Decimal::from(post_duration))
}

/// The point in time at which an event's paid visibility ends.
pub fn visibility_deadline(created_at: PrimitiveDateTime, post_duration: i32) -> PrimitiveDateTime {
    created_at + Duration::days(i64::from(post_duration.max(0)))
}

/// Whether an ongoing event is due for the ONGOING -> DONE transition.
pub fn is_due(created_at: PrimitiveDateTime, post_duration: i32, now: PrimitiveDateTime) -> bool {
    visibility_deadline(created_at, post_duration) <= now
}

/// Settlement amount for a withdraw request, fixed at request time.
pub fn withdraw_amount(confirmed_members: i64, price: Decimal) -> Decimal {
    Decimal::from(confirmed_members.max(0)) * price
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn free_price_is_zeroed() {
        let p = normalize_pricing(true, Decimal::ZERO).unwrap();
        assert!(!p.is_paid);
        assert_eq!(p.price, Decimal::ZERO);

        let p = normalize_pricing(false, Decimal::from(-5)).unwrap();
        assert!(!p.is_paid);
        assert_eq!(p.price, Decimal::ZERO);
    }

    #[test]
    fn positive_price_requires_is_paid() {
        let err = normalize_pricing(false, Decimal::from(50_000)).unwrap_err();
        assert_eq!(err, PricingError::PricedButFree(Decimal::from(50_000)));

        let p = normalize_pricing(true, Decimal::from(50_000)).unwrap();
        assert!(p.is_paid);
        assert_eq!(p.price, Decimal::from(50_000));
    }

    #[test]
    fn listing_fee_scales_linearly() {
        let rate = Decimal::from(500);
        assert_eq!(listing_fee(rate, 0).unwrap(), Decimal::ZERO);
        assert_eq!(listing_fee(rate, 1).unwrap(), Decimal::from(500));
        assert_eq!(listing_fee(rate, 30).unwrap(), Decimal::from(15_000));
        assert_eq!(
            listing_fee(rate, -1).unwrap_err(),
            PricingError::NegativeDuration(-1)
        );
    }

    #[test]
    fn zero_day_event_is_due_immediately() {
        let created = datetime!(2025-06-01 12:00);
        assert!(is_due(created, 0, created));
        assert!(is_due(created, 0, datetime!(2025-06-01 12:00:01)));
    }

    #[test]
    fn event_is_due_only_after_deadline() {
        let created = datetime!(2025-06-01 12:00);
        assert!(!is_due(created, 7, datetime!(2025-06-08 11:59)));
        assert!(is_due(created, 7, datetime!(2025-06-08 12:00)));
        assert!(is_due(created, 7, datetime!(2025-07-01 0:00)));
    }

    #[test]
    fn withdraw_amount_is_count_times_price() {
        assert_eq!(
            withdraw_amount(3, Decimal::from(10_000)),
            Decimal::from(30_000)
        );
        assert_eq!(withdraw_amount(0, Decimal::from(10_000)), Decimal::ZERO);
    }
}
