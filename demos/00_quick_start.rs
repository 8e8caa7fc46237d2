/// quick start - minimal example to get started
use chrono::NaiveDate;
use tuition_ledger_rs::{project, Money, MonthlyFeeSetting, Student, StudentStatus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a monthly fee of 100 in force from january 2025
    let settings = vec![MonthlyFeeSetting::effective(2025, 1, Money::from_major(100))?];

    // a regular student enrolled on january 1st
    let enrolled = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?;
    let student = Student::enrolled("1001", StudentStatus::Normal, enrolled)?;

    // project 2025 as seen on march 18th
    let today = NaiveDate::from_ymd_opt(2025, 3, 18).ok_or("bad date")?;
    let rows = project(&student, &[], &settings, 2025, today);

    // print the table
    println!("{}", serde_json::to_string_pretty(&rows)?);

    Ok(())
}
