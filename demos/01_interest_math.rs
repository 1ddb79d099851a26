/// interest accrual - simple and compound regimes side by side
use chrono::{Duration, NaiveDate};
use loan_book_rs::{next_payment_date, AccrualEngine, InterestMode, Money, PaymentCadence, Rate};

fn main() {
    let principal = Money::from_major(100_000);
    let rate = Rate::from_percentage(12);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

    println!("=== accrual on {} at {} ===\n", principal, rate);
    println!("{:>6} {:>12} {:>12}", "days", "simple", "compound");

    let simple = AccrualEngine::new(InterestMode::Simple);
    let compound = AccrualEngine::new(InterestMode::Compound);

    for days in [30, 90, 180, 365, 730] {
        let as_of = start + Duration::days(days);
        let s = simple.calculate(principal, rate, start, due, PaymentCadence::Monthly, as_of);
        let c = compound.calculate(principal, rate, start, due, PaymentCadence::Monthly, as_of);
        println!(
            "{:>6} {:>12} {:>12}",
            days,
            s.accrued_interest.to_string(),
            c.accrued_interest.to_string()
        );
    }

    // payment dates project forward from the start in fixed steps
    let as_of = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    println!(
        "\nnext monthly payment after {}: {}",
        as_of,
        next_payment_date(start, due, PaymentCadence::Monthly, as_of)
    );
    println!(
        "next quarterly payment after {}: {}",
        as_of,
        next_payment_date(start, due, PaymentCadence::Quarterly, as_of)
    );
}
