/// time control - deterministic status checks with controlled time
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_book_rs::{
    BookConfig, LoanBook, LoanDraft, MemoryLoanStore, MemoryPaymentLedger, Money, Rate,
    SafeTimeProvider, TimeSource,
};
use loan_book_rs::{InterestMode, LoanKind, PaymentCadence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // controlled clock starting on the loan's first day
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut book = LoanBook::new(
        MemoryLoanStore::new(),
        MemoryPaymentLedger::new(),
        BookConfig::default(),
    );
    let mut loan = book.create_loan(LoanDraft {
        kind: LoanKind::Lend,
        lender_name: "An".to_string(),
        borrower_name: "Binh".to_string(),
        principal_amount: Money::from_major(50_000),
        interest_rate: Rate::from_percentage(9),
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        payment_period: PaymentCadence::OneTime,
        interest_mode: InterestMode::Simple,
        remaining_principal: None,
        note: String::new(),
    })?;

    println!("date: {}", time.now().format("%Y-%m-%d"));
    println!("status: {}", loan.status);

    // still inside the term, nothing changes
    controller.advance(Duration::days(15));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!("went overdue: {}", book.refresh_status(&mut loan, &time)?);

    // past the due date the refresh flips and persists the status
    controller.advance(Duration::days(16));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!("went overdue: {}", book.refresh_status(&mut loan, &time)?);
    println!("status: {}", loan.status);

    controller.advance(Duration::days(10));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!(
        "days overdue: {}",
        loan.days_overdue(time.now().date_naive())
    );

    Ok(())
}
