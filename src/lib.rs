pub mod book;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod loan;
pub mod payment;
pub mod store;
pub mod types;

// re-export key types
pub use book::LoanBook;
pub use config::{BookConfig, StoreConfig};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use interest::{next_payment_date, AccrualEngine, InterestBreakdown};
pub use loan::{Loan, LoanDraft};
pub use payment::{Payment, PaymentRequest};
pub use store::{
    CsvLoanStore, CsvPaymentLedger, LoanStore, MemoryLoanStore, MemoryPaymentLedger, PaymentLedger,
};
pub use types::{InterestMode, LoanId, LoanKind, LoanStatus, PaymentCadence, PaymentId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
