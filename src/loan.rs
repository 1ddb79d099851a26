use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::{next_payment_date, AccrualEngine, InterestBreakdown};
use crate::types::{InterestMode, LoanId, LoanKind, LoanStatus, PaymentCadence};

/// core loan record
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub loan_id: LoanId,
    pub kind: LoanKind,
    pub lender_name: String,
    pub borrower_name: String,
    pub principal_amount: Money,
    pub interest_rate: Rate,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_period: PaymentCadence,
    pub interest_mode: InterestMode,
    pub status: LoanStatus,
    pub remaining_principal: Money,
    pub total_paid_principal: Money,
    pub total_paid_interest: Money,
    pub note: String,
}

impl Loan {
    /// interest position as of a date.
    /// accrues on the remaining principal, so it reflects zero once settled.
    pub fn calculate_interest(&self, as_of: NaiveDate) -> InterestBreakdown {
        let engine = AccrualEngine::new(self.interest_mode);
        engine.calculate(
            self.remaining_principal,
            self.interest_rate,
            self.start_date,
            self.due_date,
            self.payment_period,
            as_of,
        )
    }

    /// interest position with system time
    pub fn calculate_interest_now(&self) -> InterestBreakdown {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.calculate_interest(time.now().date_naive())
    }

    /// remaining principal plus interest accrued to the date
    pub fn total_amount_due(&self, as_of: NaiveDate) -> Money {
        self.remaining_principal + self.calculate_interest(as_of).accrued_interest
    }

    /// total due with system time
    pub fn total_amount_due_now(&self) -> Money {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.total_amount_due(time.now().date_naive())
    }

    /// first expected payment date strictly after the queried date
    pub fn next_payment_date(&self, as_of: NaiveDate) -> NaiveDate {
        next_payment_date(self.start_date, self.due_date, self.payment_period, as_of)
    }

    /// next payment date with system time
    pub fn next_payment_date_now(&self) -> NaiveDate {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.next_payment_date(time.now().date_naive())
    }

    /// whole days past the due date; zero for anything not marked overdue
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        if self.status != LoanStatus::Overdue {
            return 0;
        }
        (as_of - self.due_date).num_days()
    }

    /// days overdue with system time
    pub fn days_overdue_now(&self) -> i64 {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.days_overdue(time.now().date_naive())
    }

    /// whether the instant has passed the start of the day after which the
    /// loan counts as late
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn is_settled(&self) -> bool {
        self.status == LoanStatus::Settled
    }
}

/// terms for a loan being created
#[derive(Debug, Clone, PartialEq)]
pub struct LoanDraft {
    pub kind: LoanKind,
    pub lender_name: String,
    pub borrower_name: String,
    pub principal_amount: Money,
    pub interest_rate: Rate,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub payment_period: PaymentCadence,
    pub interest_mode: InterestMode,
    /// defaults to the principal amount when not supplied
    pub remaining_principal: Option<Money>,
    pub note: String,
}

impl LoanDraft {
    /// check the terms
    pub fn validate(&self) -> Result<()> {
        if !self.principal_amount.is_positive() {
            return Err(LoanError::InvalidPrincipal {
                amount: self.principal_amount,
            });
        }

        if self.interest_rate < Rate::ZERO {
            return Err(LoanError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }

        if self.due_date < self.start_date {
            return Err(LoanError::InvalidDate {
                message: format!(
                    "due date {} precedes start date {}",
                    self.due_date, self.start_date
                ),
            });
        }

        // a supplied balance must already sit inside the loan's bounds
        if let Some(remaining) = self.remaining_principal {
            if remaining.is_negative() || remaining > self.principal_amount {
                return Err(LoanError::InvalidPrincipal { amount: remaining });
            }
        }

        Ok(())
    }

    /// build the loan record under a freshly allocated id
    pub fn into_loan(self, loan_id: LoanId) -> Loan {
        let remaining = self.remaining_principal.unwrap_or(self.principal_amount);
        Loan {
            loan_id,
            kind: self.kind,
            lender_name: self.lender_name,
            borrower_name: self.borrower_name,
            principal_amount: self.principal_amount,
            interest_rate: self.interest_rate,
            start_date: self.start_date,
            due_date: self.due_date,
            payment_period: self.payment_period,
            interest_mode: self.interest_mode,
            status: LoanStatus::Active,
            remaining_principal: remaining,
            total_paid_principal: Money::ZERO,
            total_paid_interest: Money::ZERO,
            note: self.note,
        }
    }
}
