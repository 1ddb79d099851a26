pub mod csv;
pub mod memory;

pub use self::csv::{CsvLoanStore, CsvPaymentLedger};
pub use self::memory::{MemoryLoanStore, MemoryPaymentLedger};

use crate::errors::Result;
use crate::loan::Loan;
use crate::payment::Payment;
use crate::types::LoanId;

/// durable table of loan rows keyed by loan id.
/// every operation loads or rewrites the whole table.
pub trait LoanStore {
    /// every row, in store order
    fn list_all(&self) -> Result<Vec<Loan>>;

    /// replace the whole table, re-sorted by loan id
    fn save(&mut self, loans: &[Loan]) -> Result<()>;

    fn find(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        Ok(self
            .list_all()?
            .into_iter()
            .find(|loan| loan.loan_id == loan_id))
    }

    /// replace the row carrying the same id, or append
    fn upsert(&mut self, loan: &Loan) -> Result<()> {
        let mut loans = self.list_all()?;
        loans.retain(|l| l.loan_id != loan.loan_id);
        loans.push(loan.clone());
        self.save(&loans)
    }

    /// drop the row; false when the id is unknown, with nothing written
    fn delete(&mut self, loan_id: LoanId) -> Result<bool> {
        let mut loans = self.list_all()?;
        let before = loans.len();
        loans.retain(|l| l.loan_id != loan_id);
        if loans.len() == before {
            return Ok(false);
        }
        self.save(&loans)?;
        Ok(true)
    }
}

/// durable table of payment rows keyed by payment id
pub trait PaymentLedger {
    /// every row, in store order
    fn list_all(&self) -> Result<Vec<Payment>>;

    /// replace the whole table in the given order
    fn save(&mut self, payments: &[Payment]) -> Result<()>;

    /// payments recorded against one loan, in ledger order
    fn for_loan(&self, loan_id: LoanId) -> Result<Vec<Payment>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|payment| payment.loan_id == loan_id)
            .collect())
    }

    /// replace the row carrying the same id, or append.
    /// a replaced row moves to the end of the table.
    fn upsert(&mut self, payment: &Payment) -> Result<()> {
        let mut payments = self.list_all()?;
        payments.retain(|p| p.payment_id != payment.payment_id);
        payments.push(payment.clone());
        self.save(&payments)
    }

    /// drop every payment recorded against the loan, returning how many went
    fn delete_where(&mut self, loan_id: LoanId) -> Result<usize> {
        let mut payments = self.list_all()?;
        let before = payments.len();
        payments.retain(|p| p.loan_id != loan_id);
        let removed = before - payments.len();
        if removed > 0 {
            self.save(&payments)?;
        }
        Ok(removed)
    }
}
