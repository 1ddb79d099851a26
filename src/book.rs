use hourglass_rs::SafeTimeProvider;
use log::{debug, info};

use crate::config::{BookConfig, StoreConfig};
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::{Loan, LoanDraft};
use crate::payment::{Payment, PaymentRequest};
use crate::store::{CsvLoanStore, CsvPaymentLedger, LoanStore, PaymentLedger};
use crate::types::{LoanId, LoanStatus};

/// monotonic id allocator seeded from the rows already in the store.
/// within the book's lifetime an id is never handed out twice, even after
/// the highest row is deleted.
#[derive(Debug, Clone, Copy, Default)]
struct IdAllocator {
    high_water: u64,
}

impl IdAllocator {
    fn next(&mut self, max_present: u64) -> u64 {
        self.high_water = self.high_water.max(max_present) + 1;
        self.high_water
    }
}

/// engine façade over the loan table and the payment ledger.
/// all mutating operations persist through the stores handed in.
pub struct LoanBook<L: LoanStore, P: PaymentLedger> {
    loans: L,
    payments: P,
    config: BookConfig,
    loan_ids: IdAllocator,
    payment_ids: IdAllocator,
}

impl LoanBook<CsvLoanStore, CsvPaymentLedger> {
    /// book over the two csv tables
    pub fn open_csv(store: &StoreConfig, config: BookConfig) -> Self {
        Self::new(
            CsvLoanStore::from_config(store),
            CsvPaymentLedger::from_config(store),
            config,
        )
    }
}

impl<L: LoanStore, P: PaymentLedger> LoanBook<L, P> {
    pub fn new(loans: L, payments: P, config: BookConfig) -> Self {
        Self {
            loans,
            payments,
            config,
            loan_ids: IdAllocator::default(),
            payment_ids: IdAllocator::default(),
        }
    }

    /// validate the terms, allocate an id, persist the new loan
    pub fn create_loan(&mut self, draft: LoanDraft) -> Result<Loan> {
        draft.validate()?;

        let loans = self.loans.list_all()?;
        let max_present = loans.iter().map(|l| l.loan_id).max().unwrap_or(0);
        let loan = draft.into_loan(self.loan_ids.next(max_present));

        self.loans.upsert(&loan)?;
        info!("created loan {} for {}", loan.loan_id, loan.borrower_name);
        Ok(loan)
    }

    pub fn get_loan(&self, loan_id: LoanId) -> Result<Loan> {
        self.loans
            .find(loan_id)?
            .ok_or(LoanError::LoanNotFound { id: loan_id })
    }

    pub fn list_loans(&self) -> Result<Vec<Loan>> {
        self.loans.list_all()
    }

    /// record a payment and take its principal portion off the loan.
    /// the loan settles, clamped to zero, once nothing remains.
    pub fn apply_payment(&mut self, loan: &mut Loan, request: PaymentRequest) -> Result<Payment> {
        if request.principal_amount.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: request.principal_amount,
            });
        }
        if request.interest_amount.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: request.interest_amount,
            });
        }

        let payments = self.payments.list_all()?;
        let max_present = payments.iter().map(|p| p.payment_id).max().unwrap_or(0);
        let payment = Payment {
            payment_id: self.payment_ids.next(max_present),
            loan_id: loan.loan_id,
            payment_date: request.payment_date,
            amount: request.amount,
            principal_amount: request.principal_amount,
            interest_amount: request.interest_amount,
            note: request.note,
        };

        self.payments.upsert(&payment)?;

        loan.remaining_principal -= payment.principal_amount;
        if self.config.track_payment_totals {
            loan.total_paid_principal += payment.principal_amount;
            loan.total_paid_interest += payment.interest_amount;
        }

        if !loan.remaining_principal.is_positive() {
            loan.status = LoanStatus::Settled;
            loan.remaining_principal = Money::ZERO;
            info!("loan {} settled", loan.loan_id);
        }

        self.loans.upsert(loan)?;
        debug!(
            "applied payment {} of {} to loan {}",
            payment.payment_id, payment.amount, loan.loan_id
        );
        Ok(payment)
    }

    /// flip an active loan to overdue once its due date has passed.
    /// persists only when the transition happens; overdue and settled loans
    /// are left alone.
    pub fn refresh_status(&mut self, loan: &mut Loan, time: &SafeTimeProvider) -> Result<bool> {
        if loan.status != LoanStatus::Active || !loan.is_past_due(time.now()) {
            return Ok(false);
        }

        loan.status = LoanStatus::Overdue;
        self.loans.upsert(loan)?;
        info!("loan {} is overdue", loan.loan_id);
        Ok(true)
    }

    /// refresh against system time
    pub fn refresh_status_now(&mut self, loan: &mut Loan) -> Result<bool> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.refresh_status(loan, &time)
    }

    /// payments recorded against the loan, in ledger order
    pub fn payments_for(&self, loan_id: LoanId) -> Result<Vec<Payment>> {
        self.payments.for_loan(loan_id)
    }

    /// drop the loan and every payment recorded against it.
    /// false when the id is unknown. surviving rows keep their ids.
    pub fn delete_loan(&mut self, loan_id: LoanId) -> Result<bool> {
        if !self.loans.delete(loan_id)? {
            return Ok(false);
        }

        let removed = self.payments.delete_where(loan_id)?;
        info!("deleted loan {} and {} of its payments", loan_id, removed);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::store::{MemoryLoanStore, MemoryPaymentLedger};
    use crate::types::{InterestMode, LoanKind, PaymentCadence};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use tempfile::TempDir;
    use test_log::test;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_draft() -> LoanDraft {
        LoanDraft {
            kind: LoanKind::Lend,
            lender_name: "An".to_string(),
            borrower_name: "Binh".to_string(),
            principal_amount: Money::from_major(1_000_000),
            interest_rate: Rate::from_percentage(12),
            start_date: date(2024, 1, 1),
            due_date: date(2024, 12, 31),
            payment_period: PaymentCadence::Monthly,
            interest_mode: InterestMode::Simple,
            remaining_principal: None,
            note: String::new(),
        }
    }

    fn memory_book() -> LoanBook<MemoryLoanStore, MemoryPaymentLedger> {
        LoanBook::new(
            MemoryLoanStore::new(),
            MemoryPaymentLedger::new(),
            BookConfig::default(),
        )
    }

    fn payment_request(amount: &str, principal: &str, interest: &str) -> PaymentRequest {
        PaymentRequest {
            amount: Money::from_str_exact(amount).unwrap(),
            payment_date: date(2024, 2, 1),
            principal_amount: Money::from_str_exact(principal).unwrap(),
            interest_amount: Money::from_str_exact(interest).unwrap(),
            note: String::new(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut book = memory_book();

        let first = book.create_loan(sample_draft()).unwrap();
        let second = book.create_loan(sample_draft()).unwrap();

        assert_eq!(first.loan_id, 1);
        assert_eq!(second.loan_id, 2);
        assert_eq!(book.list_loans().unwrap().len(), 2);
    }

    #[test]
    fn test_create_rejects_invalid_terms() {
        let mut book = memory_book();
        let mut draft = sample_draft();
        draft.principal_amount = Money::ZERO;

        assert!(matches!(
            book.create_loan(draft),
            Err(LoanError::InvalidPrincipal { .. })
        ));
        assert!(book.list_loans().unwrap().is_empty());
    }

    #[test]
    fn test_apply_payment_reduces_principal_and_persists() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        let payment = book
            .apply_payment(&mut loan, payment_request("410191.78", "400000", "10191.78"))
            .unwrap();

        assert_eq!(payment.payment_id, 1);
        assert_eq!(loan.remaining_principal, Money::from_major(600_000));
        assert_eq!(loan.status, LoanStatus::Active);

        let stored = book.get_loan(loan.loan_id).unwrap();
        assert_eq!(stored.remaining_principal, Money::from_major(600_000));
    }

    #[test]
    fn test_full_payment_settles_loan() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        book.apply_payment(
            &mut loan,
            payment_request("1010191.78", "1000000", "10191.78"),
        )
        .unwrap();

        assert!(loan.is_settled());
        assert_eq!(loan.remaining_principal, Money::ZERO);

        let payments = book.payments_for(loan.loan_id).unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(
            payments[0].interest_amount,
            Money::from_str_exact("10191.78").unwrap()
        );

        let stored = book.get_loan(loan.loan_id).unwrap();
        assert_eq!(stored.status, LoanStatus::Settled);
        assert_eq!(stored.remaining_principal, Money::ZERO);
    }

    #[test]
    fn test_overpayment_clamps_remaining_to_zero() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        book.apply_payment(&mut loan, payment_request("1200000", "1200000", "0"))
            .unwrap();

        assert_eq!(loan.status, LoanStatus::Settled);
        assert_eq!(loan.remaining_principal, Money::ZERO);
        assert!(!loan.remaining_principal.is_negative());
    }

    #[test]
    fn test_negative_split_rejected() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        let result = book.apply_payment(&mut loan, payment_request("100", "-100", "0"));
        assert!(matches!(
            result,
            Err(LoanError::InvalidPaymentAmount { .. })
        ));
        assert!(book.payments_for(loan.loan_id).unwrap().is_empty());
        assert_eq!(loan.remaining_principal, Money::from_major(1_000_000));
    }

    #[test]
    fn test_amount_recorded_as_given() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        // the headline amount is not reconciled against the split
        let payment = book
            .apply_payment(&mut loan, payment_request("999", "100", "50"))
            .unwrap();

        assert_eq!(payment.amount, Money::from_major(999));
        assert_eq!(loan.remaining_principal, Money::from_major(999_900));
    }

    #[test]
    fn test_totals_accumulate_only_when_configured() {
        let mut plain = memory_book();
        let mut loan = plain.create_loan(sample_draft()).unwrap();
        plain
            .apply_payment(&mut loan, payment_request("300", "200", "100"))
            .unwrap();
        assert_eq!(loan.total_paid_principal, Money::ZERO);
        assert_eq!(loan.total_paid_interest, Money::ZERO);

        let mut tracking = LoanBook::new(
            MemoryLoanStore::new(),
            MemoryPaymentLedger::new(),
            BookConfig::tracking_totals(),
        );
        let mut loan = tracking.create_loan(sample_draft()).unwrap();
        tracking
            .apply_payment(&mut loan, payment_request("300", "200", "100"))
            .unwrap();
        tracking
            .apply_payment(&mut loan, payment_request("600", "400", "200"))
            .unwrap();

        assert_eq!(loan.total_paid_principal, Money::from_major(600));
        assert_eq!(loan.total_paid_interest, Money::from_major(300));

        let stored = tracking.get_loan(loan.loan_id).unwrap();
        assert_eq!(stored.total_paid_principal, Money::from_major(600));
    }

    #[test]
    fn test_refresh_status_flips_past_due_loans() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap(),
        ));
        let control = time.test_control().unwrap();

        assert!(!book.refresh_status(&mut loan, &time).unwrap());
        assert_eq!(loan.status, LoanStatus::Active);

        // midnight opening the due date is not yet past it
        control.advance(Duration::days(1));
        assert!(!book.refresh_status(&mut loan, &time).unwrap());

        control.advance(Duration::hours(6));
        assert!(book.refresh_status(&mut loan, &time).unwrap());
        assert_eq!(loan.status, LoanStatus::Overdue);
        assert_eq!(
            book.get_loan(loan.loan_id).unwrap().status,
            LoanStatus::Overdue
        );
    }

    #[test]
    fn test_refresh_status_idempotent_once_overdue() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();

        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap(),
        ));

        assert!(book.refresh_status(&mut loan, &time).unwrap());
        let writes_after_flip = book.loans.write_count();

        assert!(!book.refresh_status(&mut loan, &time).unwrap());
        assert_eq!(loan.status, LoanStatus::Overdue);
        assert_eq!(book.loans.write_count(), writes_after_flip);
    }

    #[test]
    fn test_refresh_status_leaves_settled_loans_alone() {
        let mut book = memory_book();
        let mut loan = book.create_loan(sample_draft()).unwrap();
        book.apply_payment(&mut loan, payment_request("1000000", "1000000", "0"))
            .unwrap();

        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        ));

        assert!(!book.refresh_status(&mut loan, &time).unwrap());
        assert_eq!(loan.status, LoanStatus::Settled);
    }

    #[test]
    fn test_delete_cascades_to_payments() {
        let mut book = memory_book();
        let mut kept = book.create_loan(sample_draft()).unwrap();
        let mut dropped = book.create_loan(sample_draft()).unwrap();

        book.apply_payment(&mut kept, payment_request("100", "100", "0"))
            .unwrap();
        book.apply_payment(&mut dropped, payment_request("200", "200", "0"))
            .unwrap();
        book.apply_payment(&mut dropped, payment_request("300", "300", "0"))
            .unwrap();

        assert!(book.delete_loan(dropped.loan_id).unwrap());
        assert!(!book.delete_loan(dropped.loan_id).unwrap());

        assert!(book.payments_for(dropped.loan_id).unwrap().is_empty());
        assert_eq!(book.payments_for(kept.loan_id).unwrap().len(), 1);
        assert!(matches!(
            book.get_loan(dropped.loan_id),
            Err(LoanError::LoanNotFound { .. })
        ));
    }

    #[test]
    fn test_ids_are_never_reused_after_delete() {
        let mut book = memory_book();
        let mut first = book.create_loan(sample_draft()).unwrap();
        let mut second = book.create_loan(sample_draft()).unwrap();

        book.apply_payment(&mut first, payment_request("100", "100", "0"))
            .unwrap();
        book.apply_payment(&mut second, payment_request("200", "200", "0"))
            .unwrap();

        book.delete_loan(second.loan_id).unwrap();

        // surviving rows keep their ids, freed ids stay retired
        let mut third = book.create_loan(sample_draft()).unwrap();
        assert_eq!(third.loan_id, 3);
        assert_eq!(book.get_loan(first.loan_id).unwrap().loan_id, 1);

        let payment = book
            .apply_payment(&mut third, payment_request("50", "50", "0"))
            .unwrap();
        assert_eq!(payment.payment_id, 3);
    }

    #[test]
    fn test_csv_book_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = StoreConfig::new(dir.path());

        let mut book = LoanBook::open_csv(&store, BookConfig::default());
        let mut loan = book.create_loan(sample_draft()).unwrap();
        book.apply_payment(&mut loan, payment_request("410191.78", "400000", "10191.78"))
            .unwrap();

        // a fresh book over the same files sees the persisted state
        let reopened = LoanBook::open_csv(&store, BookConfig::default());
        let stored = reopened.get_loan(loan.loan_id).unwrap();
        assert_eq!(stored.remaining_principal, Money::from_major(600_000));
        assert_eq!(stored.status, LoanStatus::Active);

        let payments = reopened.payments_for(loan.loan_id).unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(
            payments[0].amount,
            Money::from_str_exact("410191.78").unwrap()
        );
    }
}
