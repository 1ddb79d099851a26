use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, PaymentId};

/// one repayment event against a loan.
/// field order mirrors the ledger columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub loan_id: LoanId,
    pub payment_date: NaiveDate,
    /// headline figure recorded as given; by convention principal + interest,
    /// never checked against the split
    pub amount: Money,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub note: String,
}

/// payment to apply against a loan
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub note: String,
}
