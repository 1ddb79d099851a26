use crate::errors::Result;
use crate::loan::Loan;
use crate::payment::Payment;
use crate::store::{LoanStore, PaymentLedger};

/// vec-backed loan table for tests and callers that bring their own
/// persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryLoanStore {
    loans: Vec<Loan>,
    writes: usize,
}

impl MemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of table rewrites so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LoanStore for MemoryLoanStore {
    fn list_all(&self) -> Result<Vec<Loan>> {
        Ok(self.loans.clone())
    }

    fn save(&mut self, loans: &[Loan]) -> Result<()> {
        let mut rows = loans.to_vec();
        rows.sort_by_key(|loan| loan.loan_id);
        self.loans = rows;
        self.writes += 1;
        Ok(())
    }
}

/// vec-backed payment table
#[derive(Debug, Clone, Default)]
pub struct MemoryPaymentLedger {
    payments: Vec<Payment>,
    writes: usize,
}

impl MemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of table rewrites so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PaymentLedger for MemoryPaymentLedger {
    fn list_all(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.clone())
    }

    fn save(&mut self, payments: &[Payment]) -> Result<()> {
        self.payments = payments.to_vec();
        self.writes += 1;
        Ok(())
    }
}
