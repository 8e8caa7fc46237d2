use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use tuition_ledger_rs::wire::{self, FeeSettingRecord, MonthlyPaymentRecord, StudentRecord};
use tuition_ledger_rs::{
    project, AdvisoryLog, ExclusionCap, Money, MonthStatus, MonthlyFeeSetting, MonthlyPayment,
    MonthlyStatusProjector, ProjectionConfig, RowAction, SafeTimeProvider, Student, StudentStatus,
    TimeSource, YearMonth,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn settings() -> Vec<MonthlyFeeSetting> {
    let records: Vec<FeeSettingRecord> =
        wire::parse_list(r#"[{"year": 2025, "month": 1, "settingValue": "100.00"}]"#).unwrap();
    let mut log = AdvisoryLog::new();
    let settings = wire::normalize_fee_settings(&records, &mut log);
    assert!(log.is_empty());
    settings
}

fn hundred() -> Money {
    Money::from_decimal(dec!(100.00))
}

#[test]
fn test_normal_student_on_first_of_month() {
    let student = Student::enrolled(1u64, StudentStatus::Normal, date(2025, 1, 1)).unwrap();
    let rows = project(&student, &[], &settings(), 2025, date(2025, 3, 1));

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.expected_amount, hundred());
        assert_eq!(row.amount_paid, Money::ZERO);
        assert_eq!(row.remaining, hundred());
        assert_eq!(row.action, RowAction::Payable);
    }
    assert_eq!(rows[0].status, MonthStatus::Overdue);
    assert_eq!(rows[1].status, MonthStatus::Overdue);
    assert_eq!(rows[2].status, MonthStatus::Pending);
    assert!(!rows[2].is_overdue);
}

#[test]
fn test_normal_student_later_in_month() {
    let student = Student::enrolled(1u64, StudentStatus::Normal, date(2025, 1, 1)).unwrap();
    let rows = project(&student, &[], &settings(), 2025, date(2025, 3, 18));

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.status == MonthStatus::Overdue));
    assert!(rows.iter().all(|r| r.is_overdue));
}

#[test]
fn test_exempt_student_is_settled() {
    let student = Student::enrolled(2u64, StudentStatus::Exempt, date(2025, 1, 1)).unwrap();
    let rows = project(&student, &[], &settings(), 2025, date(2025, 3, 18));

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.base_fee, hundred());
        assert_eq!(row.expected_amount, Money::ZERO);
        assert_eq!(row.remaining, Money::ZERO);
        assert_eq!(row.status, MonthStatus::Paid);
        assert_eq!(row.action, RowAction::Exempt);
    }
}

#[test]
fn test_excluded_student_stops_at_exclusion_month() {
    let student = Student::excluded(3u64, date(2025, 1, 1), date(2025, 2, 10));
    let projector = MonthlyStatusProjector::default();
    let today = date(2025, 3, 18);

    let window = projector.window(&student, 2025, today);
    assert_eq!(window.end_month, 2);

    let rows = projector.project(&student, &[], &settings(), 2025, today);
    let months: Vec<u32> = rows.iter().map(|r| r.month()).collect();
    assert_eq!(months, vec![1, 2]);
    assert!(rows.iter().all(|r| r.expected_amount == hundred()));
}

#[test]
fn test_unpaid_record_takes_precedence_over_overdue() {
    let student = Student::enrolled(4u64, StudentStatus::Normal, date(2025, 1, 1)).unwrap();
    let payments = vec![MonthlyPayment::new(ym(2025, 1), Money::from_major(50), false)];
    let rows = project(&student, &payments, &settings(), 2025, date(2025, 3, 18));

    let january = &rows[0];
    assert_eq!(january.remaining, Money::from_major(50));
    assert_eq!(january.status, MonthStatus::Unpaid);
    assert!(january.has_payment_record);
    assert!(january.is_overdue);
    assert_eq!(january.action, RowAction::Payable);
}

#[test]
fn test_exclusion_cap_policies() {
    // excluded in 2024, viewing the current year 2025
    let student = Student::excluded(5u64, date(2024, 1, 1), date(2024, 6, 15));
    let today = date(2025, 3, 18);

    let rows = project(&student, &[], &settings(), 2025, today);
    assert_eq!(rows.len(), 3);

    let legacy = ProjectionConfig::legacy();
    assert_eq!(legacy.exclusion_cap, ExclusionCap::AnyYear);
    let rows = MonthlyStatusProjector::new(legacy).project(&student, &[], &settings(), 2025, today);
    assert_eq!(rows.len(), 6);

    let clipped = MonthlyStatusProjector::new(ProjectionConfig::clipped());
    assert!(clipped.project(&student, &[], &settings(), 2025, today).is_empty());
}

#[test]
fn test_past_year_after_exclusion_projects_every_month() {
    let student = Student::excluded("s", date(2022, 1, 1), date(2023, 6, 1));
    let settings = vec![MonthlyFeeSetting::effective(2020, 1, Money::from_major(100)).unwrap()];

    let rows = project(&student, &[], &settings, 2024, date(2025, 3, 10));
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.expected_amount == hundred()));
    assert!(rows.iter().all(|r| r.status == MonthStatus::Overdue));
}

#[test]
fn test_year_before_enrollment() {
    let student = Student::enrolled(6u64, StudentStatus::Normal, date(2025, 5, 1)).unwrap();
    let today = date(2025, 8, 2);

    let rows = project(&student, &[], &settings(), 2024, today);
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.expected_amount == Money::ZERO));

    let clipped = MonthlyStatusProjector::new(ProjectionConfig::clipped());
    assert!(clipped.project(&student, &[], &settings(), 2024, today).is_empty());
}

#[test]
fn test_row_invariants_hold_for_every_status() {
    let today = date(2025, 9, 12);
    let payments = vec![
        MonthlyPayment::new(ym(2025, 2), Money::from_major(100), true),
        MonthlyPayment::new(ym(2025, 3), Money::from_major(20), false),
        MonthlyPayment::new(ym(2025, 4), Money::from_major(130), true),
    ];
    let settings = vec![
        MonthlyFeeSetting::effective(2025, 1, Money::from_major(100)).unwrap(),
        MonthlyFeeSetting::effective(2025, 6, Money::from_decimal(dec!(120.50))).unwrap(),
    ];

    for status in [
        StudentStatus::Normal,
        StudentStatus::HalfFees,
        StudentStatus::Fixed50,
        StudentStatus::Exempt,
    ] {
        let student = Student::enrolled("inv", status, date(2025, 1, 20)).unwrap();
        let rows = project(&student, &payments, &settings, 2025, today);

        assert_eq!(rows.len(), 9);
        assert!(rows.windows(2).all(|w| w[0].month() < w[1].month()));
        for row in &rows {
            assert_eq!(row.remaining, row.expected_amount - row.amount_paid);
            if status == StudentStatus::Exempt {
                assert_eq!(row.status, MonthStatus::Paid);
            }
            if row.status == MonthStatus::Overdue {
                assert!(!row.has_payment_record);
                assert!(row.period.first_day() < today);
            }
        }
    }
}

#[test]
fn test_overpayment_gives_negative_remaining() {
    let student = Student::enrolled(7u64, StudentStatus::HalfFees, date(2025, 1, 1)).unwrap();
    let payments = vec![MonthlyPayment::new(ym(2025, 1), Money::from_major(80), true)];
    let rows = project(&student, &payments, &settings(), 2025, date(2025, 1, 5));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].remaining, Money::from_major(-30));
    assert!(rows[0].remaining.is_negative());
    assert_eq!(rows[0].status, MonthStatus::Paid);
}

#[test]
fn test_backend_payloads_end_to_end() {
    let student: StudentRecord = serde_json::from_str(
        r#"{"id": "42", "status": "EXCLUDED", "enrollmentDate": "2025-01-03T08:00:00Z", "exclusionStart": "2025-04-02"}"#,
    )
    .unwrap();
    let settings: Vec<FeeSettingRecord> = wire::parse_list(
        r#"{"data": [{"year": 2025, "month": 1, "settingValue": 100}, {"year": 2025, "month": 3, "settingValue": "110.00"}]}"#,
    )
    .unwrap();
    let payments: Vec<MonthlyPaymentRecord> = wire::parse_list(
        r#"[{"studentId": 42, "month": 1, "year": 2025, "amountPaid": "100", "paymentStatus": true},
            {"studentId": 7, "month": 2, "year": 2025, "amountPaid": 100, "paymentStatus": true}]"#,
    )
    .unwrap();

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()));
    let today = time.now().date_naive();
    let projector = MonthlyStatusProjector::default();
    let mut log = AdvisoryLog::new();

    let rows = projector.project_record(&student, &payments, &settings, 2025, today, &mut log);

    assert!(log.is_empty());
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].status, MonthStatus::Paid);
    assert_eq!(rows[1].status, MonthStatus::Overdue);
    assert_eq!(rows[2].expected_amount, Money::from_major(110));
    assert_eq!(rows[3].expected_amount, Money::from_major(110));

    let json = serde_json::to_value(&rows[1]).unwrap();
    assert_eq!(json["status"], "OVERDUE");
}
