use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::types::{InterestMode, PaymentCadence};

/// interest position of one loan at one date
#[derive(Debug, Clone, PartialEq)]
pub struct InterestBreakdown {
    /// interest accrued since the start date, rounded to cents
    pub accrued_interest: Money,
    /// interest accruing per day at this point, rounded to cents
    pub daily_interest: Money,
    /// whole days since the start date, negative before it
    pub days_elapsed: i64,
    /// first expected payment date strictly after the queried date
    pub next_payment_date: NaiveDate,
}

/// engine for accruing interest under one regime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualEngine {
    pub mode: InterestMode,
}

impl AccrualEngine {
    pub fn new(mode: InterestMode) -> Self {
        Self { mode }
    }

    /// whole days between dates, negative when `as_of` precedes `start`
    pub fn days_elapsed(&self, start: NaiveDate, as_of: NaiveDate) -> i64 {
        (as_of - start).num_days()
    }

    /// interest accrued over the elapsed days, unrounded
    pub fn accrued_interest(&self, principal: Money, annual_rate: Rate, days: i64) -> Money {
        match self.mode {
            InterestMode::Simple => {
                let daily_rate = annual_rate.daily_rate().as_decimal();
                Money::from_decimal(principal.as_decimal() * daily_rate * Decimal::from(days))
            }
            InterestMode::Compound => {
                let years = Decimal::from(days) / dec!(365);
                let growth = (Decimal::ONE + annual_rate.as_decimal()).powd(years);
                Money::from_decimal(principal.as_decimal() * (growth - Decimal::ONE))
            }
        }
    }

    /// interest accruing per day at the elapsed-days mark, unrounded.
    /// constant under simple interest; under compounding it is the marginal
    /// rate one day short of the mark.
    pub fn daily_interest(&self, principal: Money, annual_rate: Rate, days: i64) -> Money {
        let daily_rate = annual_rate.daily_rate().as_decimal();
        match self.mode {
            InterestMode::Simple => Money::from_decimal(principal.as_decimal() * daily_rate),
            InterestMode::Compound => {
                let years_less_a_day = (Decimal::from(days) - Decimal::ONE) / dec!(365);
                let growth = (Decimal::ONE + annual_rate.as_decimal()).powd(years_less_a_day);
                Money::from_decimal(principal.as_decimal() * daily_rate * growth)
            }
        }
    }

    /// full position as of a date; money figures rounded to cents
    pub fn calculate(
        &self,
        principal: Money,
        annual_rate: Rate,
        start_date: NaiveDate,
        due_date: NaiveDate,
        cadence: PaymentCadence,
        as_of: NaiveDate,
    ) -> InterestBreakdown {
        let days = self.days_elapsed(start_date, as_of);
        InterestBreakdown {
            accrued_interest: self.accrued_interest(principal, annual_rate, days).round_dp(2),
            daily_interest: self.daily_interest(principal, annual_rate, days).round_dp(2),
            days_elapsed: days,
            next_payment_date: next_payment_date(start_date, due_date, cadence, as_of),
        }
    }
}

/// first cadence step strictly after `as_of`, projected from the start date
/// in fixed 30/90-day steps. one-time loans fall due on `due_date` regardless
/// of `as_of`.
pub fn next_payment_date(
    start_date: NaiveDate,
    due_date: NaiveDate,
    cadence: PaymentCadence,
    as_of: NaiveDate,
) -> NaiveDate {
    match cadence.step_days() {
        None => due_date,
        Some(step) => {
            let mut next = start_date + Duration::days(step);
            while next <= as_of {
                next += Duration::days(step);
            }
            next
        }
    }
}
