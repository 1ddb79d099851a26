use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loan::Loan;
use crate::payment::Payment;
use crate::store::{LoanStore, PaymentLedger};
use crate::types::{InterestMode, LoanId, LoanKind, LoanStatus, PaymentCadence};

/// column order of the loans table
const LOANS_HEADER: &[&str] = &[
    "loan_id",
    "type",
    "lender_name",
    "borrower_name",
    "amount",
    "interest_rate",
    "start_date",
    "due_date",
    "payment_period",
    "interest_type",
    "status",
    "remaining_principal",
    "total_paid_principal",
    "total_paid_interest",
    "note",
];

/// column order of the payments table
const PAYMENTS_HEADER: &[&str] = &[
    "payment_id",
    "loan_id",
    "payment_date",
    "amount",
    "principal_amount",
    "interest_amount",
    "note",
];

/// wire form of a loan row. the file stores the rate as a percent figure,
/// the domain holds it as a fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoanRow {
    loan_id: LoanId,
    #[serde(rename = "type")]
    kind: LoanKind,
    lender_name: String,
    borrower_name: String,
    amount: Money,
    interest_rate: Decimal,
    start_date: NaiveDate,
    due_date: NaiveDate,
    payment_period: PaymentCadence,
    interest_type: InterestMode,
    status: LoanStatus,
    remaining_principal: Money,
    total_paid_principal: Money,
    total_paid_interest: Money,
    note: String,
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id,
            kind: loan.kind,
            lender_name: loan.lender_name.clone(),
            borrower_name: loan.borrower_name.clone(),
            amount: loan.principal_amount,
            interest_rate: loan.interest_rate.as_percentage().normalize(),
            start_date: loan.start_date,
            due_date: loan.due_date,
            payment_period: loan.payment_period,
            interest_type: loan.interest_mode,
            status: loan.status,
            remaining_principal: loan.remaining_principal,
            total_paid_principal: loan.total_paid_principal,
            total_paid_interest: loan.total_paid_interest,
            note: loan.note.clone(),
        }
    }
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Self {
            loan_id: row.loan_id,
            kind: row.kind,
            lender_name: row.lender_name,
            borrower_name: row.borrower_name,
            principal_amount: row.amount,
            interest_rate: Rate::from_percent(row.interest_rate),
            start_date: row.start_date,
            due_date: row.due_date,
            payment_period: row.payment_period,
            interest_mode: row.interest_type,
            status: row.status,
            remaining_principal: row.remaining_principal,
            total_paid_principal: row.total_paid_principal,
            total_paid_interest: row.total_paid_interest,
            note: row.note,
        }
    }
}

/// write a header-only table so later reads see an empty one
fn create_table(path: &Path, header: &[&str]) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    info!("created empty table at {}", path.display());
    Ok(())
}

/// csv-backed loan table.
/// reads load the whole file; writes rewrite it, sorted by loan id.
#[derive(Debug, Clone)]
pub struct CsvLoanStore {
    path: PathBuf,
}

impl CsvLoanStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.loans_path.clone())
    }
}

impl LoanStore for CsvLoanStore {
    fn list_all(&self) -> Result<Vec<Loan>> {
        if !self.path.exists() {
            create_table(&self.path, LOANS_HEADER)?;
            return Ok(Vec::new());
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut loans = Vec::new();
        for row in reader.deserialize::<LoanRow>() {
            loans.push(row?.into());
        }
        Ok(loans)
    }

    fn save(&mut self, loans: &[Loan]) -> Result<()> {
        let mut rows: Vec<LoanRow> = loans.iter().map(LoanRow::from).collect();
        rows.sort_by_key(|row| row.loan_id);

        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(LOANS_HEADER)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        debug!("wrote {} loan rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// csv-backed payment table.
/// rows keep their file order; rewrites preserve the order handed in.
#[derive(Debug, Clone)]
pub struct CsvPaymentLedger {
    path: PathBuf,
}

impl CsvPaymentLedger {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.payments_path.clone())
    }
}

impl PaymentLedger for CsvPaymentLedger {
    fn list_all(&self) -> Result<Vec<Payment>> {
        if !self.path.exists() {
            create_table(&self.path, PAYMENTS_HEADER)?;
            return Ok(Vec::new());
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut payments = Vec::new();
        for row in reader.deserialize::<Payment>() {
            payments.push(row?);
        }
        Ok(payments)
    }

    fn save(&mut self, payments: &[Payment]) -> Result<()> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(PAYMENTS_HEADER)?;
        for payment in payments {
            writer.serialize(payment)?;
        }
        writer.flush()?;

        debug!(
            "wrote {} payment rows to {}",
            payments.len(),
            self.path.display()
        );
        Ok(())
    }
}
