use serde::{Deserialize, Serialize};
use std::fmt;

/// unique identifier for a loan
pub type LoanId = u64;

/// unique identifier for a payment, ledger-wide
pub type PaymentId = u64;

/// direction of the agreement from the book owner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    /// money lent out to the borrower
    Lend,
    /// money borrowed from the lender
    Borrow,
}

impl LoanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanKind::Lend => "lend",
            LoanKind::Borrow => "borrow",
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// open and within its due date
    Active,
    /// past its due date with principal outstanding
    Overdue,
    /// fully paid off, terminal
    Settled,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Overdue => "overdue",
            LoanStatus::Settled => "settled",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// expected repayment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCadence {
    Monthly,
    Quarterly,
    OneTime,
}

impl PaymentCadence {
    /// fixed day-count step used to project payment dates.
    /// 30/90 days approximates monthly/quarterly billing; one-time has no step.
    pub fn step_days(&self) -> Option<i64> {
        match self {
            PaymentCadence::Monthly => Some(30),
            PaymentCadence::Quarterly => Some(90),
            PaymentCadence::OneTime => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCadence::Monthly => "monthly",
            PaymentCadence::Quarterly => "quarterly",
            PaymentCadence::OneTime => "one_time",
        }
    }
}

impl fmt::Display for PaymentCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// interest accrual regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMode {
    /// interest proportional to elapsed days on current principal
    Simple,
    /// annual rate compounded over elapsed fractional years
    Compound,
}

impl InterestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestMode::Simple => "simple",
            InterestMode::Compound => "compound",
        }
    }
}

impl fmt::Display for InterestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
