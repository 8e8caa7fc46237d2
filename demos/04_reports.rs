/// reports - status summary and revenue/expense aggregation
use chrono::NaiveDate;
use tuition_ledger_rs::ledger::{self, LedgerReport, ReportPeriod};
use tuition_ledger_rs::wire::{self, TransactionRecord};
use tuition_ledger_rs::{
    AdvisoryLog, AmountRange, Money, MonthlyFeeSetting, ProjectionTotals, StatusSummary, Student,
    StudentChargeCalculator, StudentStatus, TransactionFilter, YearMonth,
};

const REVENUES: &str = r#"[
    {"name": "january fees", "category": "Tuition_Fees", "amount": "1200.00", "month": "2025-01"},
    {"name": "book sale", "category": "BOOKS", "amount": 85.5, "date": "2025-02-11"},
    {"name": "donation", "amount": 500, "createdAt": "2025-02-20T10:00:00Z"}
]"#;

const EXPENSES: &str = r#"[
    {"name": "rent", "category": "RENT", "amount": "900", "createdAt": "2025-01-31T18:00:00Z"},
    {"name": "supplies", "category": "SUPPLIES", "amount": "120.25", "date": "2025-02-03"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== reports example ===\n");

    let settings = vec![MonthlyFeeSetting::effective(2025, 1, Money::from_major(100))?];
    let enrolled = NaiveDate::from_ymd_opt(2024, 9, 1).ok_or("bad date")?;
    let students = vec![
        Student::enrolled("a", StudentStatus::Normal, enrolled)?,
        Student::enrolled("b", StudentStatus::Normal, enrolled)?,
        Student::enrolled("c", StudentStatus::HalfFees, enrolled)?,
        Student::enrolled("d", StudentStatus::Exempt, enrolled)?,
    ];

    // expected tuition for february by status
    let summary = StatusSummary::for_period(
        &students,
        &settings,
        YearMonth::new(2025, 2)?,
        &StudentChargeCalculator::default(),
    );
    for (status, line) in &summary.lines {
        println!("{:<10} {:>3} students  {:>8}", status, line.count, line.expected_amount.to_fixed(2));
    }
    println!("total expected: {}\n", summary.total_expected.to_fixed(2));

    // totals of one student's payment table
    let today = NaiveDate::from_ymd_opt(2025, 4, 15).ok_or("bad date")?;
    let rows = tuition_ledger_rs::project(&students[0], &[], &settings, 2025, today);
    let totals = ProjectionTotals::from_rows(&rows);
    println!("student a owes {} over {} months\n", totals.remaining.to_fixed(2), rows.len());

    // revenue and expenses for the first quarter
    let mut advisories = AdvisoryLog::new();
    let revenues = wire::normalize_revenues(&wire::parse_list::<TransactionRecord>(REVENUES)?, today, &mut advisories);
    let expenses = wire::normalize_expenses(&wire::parse_list::<TransactionRecord>(EXPENSES)?, today, &mut advisories);

    let report = LedgerReport::build(&revenues, &expenses, ReportPeriod::quarter(2025, 1)?);
    println!("{}", serde_json::to_string_pretty(&report)?);

    for month in ledger::monthly_breakdown(&revenues, &expenses, 2025).iter().take(3) {
        println!("{}  in {:>8}  out {:>8}", month.period, month.revenue.to_fixed(2), month.expenses.to_fixed(2));
    }

    // the revenue list filtered to entries of at least 100
    let filter = TransactionFilter {
        amount: AmountRange {
            min: Some(Money::from_major(100)),
            max: None,
        },
        ..TransactionFilter::default()
    };
    for tx in filter.apply(&revenues) {
        println!("{} {:<14} {}", tx.date, tx.category, tx.amount.to_fixed(2));
    }

    Ok(())
}
