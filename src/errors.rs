use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::LoanId;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid principal amount: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LoanError>;
