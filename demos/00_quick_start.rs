/// quick start - minimal example to get started
use chrono::NaiveDate;
use loan_book_rs::{BookConfig, LoanBook, LoanDraft, Money, PaymentRequest, Rate, StoreConfig};
use loan_book_rs::{InterestMode, LoanKind, PaymentCadence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // book backed by data/loans.csv and data/loan_payments.csv
    std::fs::create_dir_all("data")?;
    let mut book = LoanBook::open_csv(&StoreConfig::new("data"), BookConfig::default());

    // lend 1,000,000 at 12% simple interest for a year
    let mut loan = book.create_loan(LoanDraft {
        kind: LoanKind::Lend,
        lender_name: "An".to_string(),
        borrower_name: "Binh".to_string(),
        principal_amount: Money::from_major(1_000_000),
        interest_rate: Rate::from_percentage(12),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        due_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        payment_period: PaymentCadence::Monthly,
        interest_mode: InterestMode::Simple,
        remaining_principal: None,
        note: String::new(),
    })?;

    // position after one month
    let as_of = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let breakdown = loan.calculate_interest(as_of);
    println!("accrued interest: {}", breakdown.accrued_interest);
    println!("daily interest:   {}", breakdown.daily_interest);
    println!("total due:        {}", loan.total_amount_due(as_of));
    println!("next payment:     {}", breakdown.next_payment_date);

    // record the first installment
    book.apply_payment(
        &mut loan,
        PaymentRequest {
            amount: Money::from_str_exact("410191.78")?,
            payment_date: as_of,
            principal_amount: Money::from_major(400_000),
            interest_amount: Money::from_str_exact("10191.78")?,
            note: "first installment".to_string(),
        },
    )?;
    println!("remaining principal: {}", loan.remaining_principal);

    Ok(())
}
