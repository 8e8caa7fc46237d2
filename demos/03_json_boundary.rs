/// json boundary - normalising backend payloads before projection
use chrono::NaiveDate;
use tuition_ledger_rs::wire::{self, FeeSettingRecord, MonthlyPaymentRecord, StudentRecord};
use tuition_ledger_rs::{AdvisoryLog, MonthlyStatusProjector, ProjectionConfig};

const STUDENTS: &str = r#"{"data": [
    {"id": 1, "status": "NORMAL", "startedAt": "2025-01-06T09:00:00Z"},
    {"id": 2, "status": "HALF_FEES", "enrollmentDate": "2025-02-01"},
    {"id": 3, "status": "SCHOLARSHIP", "startedAt": "2025-01-01"},
    {"id": 4, "status": "EXCLUDED", "startedAt": "2025-01-01"}
]}"#;

const SETTINGS: &str = r#"[
    {"year": 2025, "month": 1, "settingValue": "100.00"},
    {"year": 2025, "month": 4, "settingValue": 110}
]"#;

const PAYMENTS: &str = r#"[
    {"studentId": 1, "month": 1, "year": 2025, "amountPaid": "100.00", "paymentStatus": true},
    {"studentId": 2, "month": 2, "year": 2025, "amountPaid": "n/a", "paymentStatus": false}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json boundary example ===\n");

    // configuration may come from json too
    let config = ProjectionConfig::from_json(r#"{"exclusion_cap": "same_year"}"#)?;
    let projector = MonthlyStatusProjector::new(config);

    let students: Vec<StudentRecord> = wire::parse_list(STUDENTS)?;
    let settings: Vec<FeeSettingRecord> = wire::parse_list(SETTINGS)?;
    let payments: Vec<MonthlyPaymentRecord> = wire::parse_list(PAYMENTS)?;
    let today = NaiveDate::from_ymd_opt(2025, 5, 20).ok_or("bad date")?;

    let mut advisories = AdvisoryLog::new();
    for record in &students {
        let rows = projector.project_record(record, &payments, &settings, 2025, today, &mut advisories);
        println!("student {:?}: {} rows", record.id, rows.len());
        if let Some(last) = rows.last() {
            println!("  latest: {}", serde_json::to_string(last)?);
        }
    }

    // malformed input never stops the run, it is reported instead
    println!("\nadvisories:");
    for advisory in advisories.entries() {
        println!("  {}", advisory);
    }

    Ok(())
}
