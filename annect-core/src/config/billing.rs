//! Listing-fee billing configuration.

use rust_decimal::Decimal;

/// Billing rules for organizer listings.
#[derive(Debug, Clone, Copy)]
pub struct BillingConfig {
    /// Fee charged per day of paid event visibility.
    pub listing_fee_per_day: Decimal,
}
