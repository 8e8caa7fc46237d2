/// time control - deterministic projections with controlled time
use chrono::{Duration, TimeZone, Utc};
use tuition_ledger_rs::{
    Money, MonthlyFeeSetting, MonthlyStatusProjector, SafeTimeProvider, Student, StudentStatus, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let settings = vec![MonthlyFeeSetting::effective(2025, 1, Money::from_major(100))?];
    let enrolled = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().date_naive();
    let student = Student::enrolled("1001", StudentStatus::Normal, enrolled)?;
    let projector = MonthlyStatusProjector::default();

    // on the 1st the current month is not yet overdue
    println!("today: {}", time.now().format("%Y-%m-%d"));
    for row in projector.project_now(&student, &[], &settings, 2025, &time) {
        println!("  {} {:?}", row.period, row.status);
    }

    // one day later it is
    controller.advance(Duration::days(1));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    for row in projector.project_now(&student, &[], &settings, 2025, &time) {
        println!("  {} {:?}", row.period, row.status);
    }

    // a new month adds a row
    controller.advance(Duration::days(31));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    let rows = projector.project_now(&student, &[], &settings, 2025, &time);
    println!("rows projected: {}", rows.len());

    Ok(())
}
