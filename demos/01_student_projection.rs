/// student projection - every billing status side by side
use chrono::NaiveDate;
use tuition_ledger_rs::{
    Money, MonthlyFeeSetting, MonthlyPayment, MonthlyStatusProjector, Student, StudentStatus, YearMonth,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== student projection example ===\n");

    // fee raised in june
    let settings = vec![
        MonthlyFeeSetting::effective(2025, 1, Money::from_major(100))?,
        MonthlyFeeSetting::effective(2025, 6, Money::from_major(120))?,
    ];

    let enrolled = NaiveDate::from_ymd_opt(2025, 2, 14).ok_or("bad date")?;
    let excluded_on = NaiveDate::from_ymd_opt(2025, 7, 3).ok_or("bad date")?;
    let today = NaiveDate::from_ymd_opt(2025, 9, 10).ok_or("bad date")?;

    let students = vec![
        Student::enrolled("normal", StudentStatus::Normal, enrolled)?,
        Student::enrolled("half", StudentStatus::HalfFees, enrolled)?,
        Student::enrolled("fixed", StudentStatus::Fixed50, enrolled)?,
        Student::enrolled("exempt", StudentStatus::Exempt, enrolled)?,
        Student::excluded("excluded", enrolled, excluded_on),
    ];

    // february settled, march partially paid
    let payments = vec![
        MonthlyPayment::new(YearMonth::new(2025, 2)?, Money::from_major(100), true),
        MonthlyPayment::new(YearMonth::new(2025, 3)?, Money::from_major(40), false),
    ];

    let projector = MonthlyStatusProjector::default();

    for student in &students {
        println!("student {} ({})", student.id(), student.status());
        for row in projector.project(student, &payments, &settings, 2025, today) {
            println!(
                "  {}  base {:>7}  expected {:>7}  paid {:>7}  remaining {:>7}  {:?} / {:?}",
                row.period,
                row.base_fee.to_fixed(2),
                row.expected_amount.to_fixed(2),
                row.amount_paid.to_fixed(2),
                row.remaining.to_fixed(2),
                row.status,
                row.action,
            );
        }
        println!();
    }

    Ok(())
}
