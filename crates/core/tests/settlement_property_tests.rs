//! Property-based integration tests for billing and settlement.
//!
//! These tests check the laws that must hold for any elapsed time, rate and
//! balance, using the `proptest` crate for random test case generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_core::accounts::{settle, CurrentAccount};
use parking_core::parking::{billable_hours, compute_cost, ParkingError};
use parking_core::rates::RateConfig;
use parking_core::Error;
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Generates a non-negative rate with two decimal places.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a non-negative balance with two decimal places.
fn arb_balance() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates an elapsed time of up to about a month, in seconds.
fn arb_elapsed() -> impl Strategy<Value = Duration> {
    (0i64..2_600_000).prop_map(Duration::seconds)
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap()
}

fn rate(hourly_rate: Decimal) -> RateConfig {
    RateConfig {
        city_id: "1".to_string(),
        name: "Rawson".to_string(),
        hourly_rate,
        timezone: "UTC".to_string(),
        updated_at: t0().naive_utc(),
    }
}

fn account(balance: Decimal) -> CurrentAccount {
    CurrentAccount {
        id: "acc-1".to_string(),
        user_id: "u1".to_string(),
        balance,
        created_at: t0().naive_utc(),
        updated_at: t0().naive_utc(),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Cost is always a whole number of hours at the configured rate.
    #[test]
    fn prop_cost_is_rate_times_billable_hours(hourly in arb_rate(), elapsed in arb_elapsed()) {
        let cost = compute_cost(t0(), t0() + elapsed, &rate(hourly)).unwrap();
        prop_assert!(cost.billable_hours >= 1);
        prop_assert_eq!(cost.billable_hours, billable_hours(elapsed));
        prop_assert_eq!(cost.amount, hourly * Decimal::from(cost.billable_hours));
    }

    /// Billed time covers the elapsed time and overshoots by less than an hour.
    #[test]
    fn prop_billed_hours_bracket_elapsed(elapsed in arb_elapsed()) {
        let hours = billable_hours(elapsed);
        prop_assert!(Duration::hours(hours) >= elapsed);
        prop_assert!(hours == 1 || Duration::hours(hours - 1) < elapsed);
    }

    /// A successful settlement conserves money and never goes negative.
    #[test]
    fn prop_settlement_conserves_balance(balance in arb_balance(), amount in arb_balance()) {
        match settle(&account(balance), amount, "Parking AB123CD", t0()) {
            Ok((updated, entry)) => {
                prop_assert!(amount <= balance);
                prop_assert!(updated.balance >= Decimal::ZERO);
                prop_assert_eq!(updated.balance, balance - amount);
                prop_assert_eq!(entry.delta, -amount);
                prop_assert_eq!(entry.resulting_balance, updated.balance);
                prop_assert_eq!(entry.previous_balance(), balance);
            }
            Err(Error::Parking(ParkingError::InsufficientFundsAtSettlement { balance: b, required })) => {
                prop_assert!(amount > balance);
                prop_assert_eq!(b, balance);
                prop_assert_eq!(required, amount);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
