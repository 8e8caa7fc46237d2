use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::charges::StudentChargeCalculator;
use crate::decimal::Money;
use crate::projection::ProjectedMonthRow;
use crate::schedule::MonthlyFeeSetting;
use crate::types::{MonthStatus, Student, StudentStatus, YearMonth};

/// headcount and expected revenue for one billing status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub count: usize,
    pub expected_amount: Money,
}

/// expected tuition revenue of a month, broken down by student status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub period: YearMonth,
    /// every status is present, even with no students
    pub lines: BTreeMap<StudentStatus, StatusLine>,
    pub total_students: usize,
    pub total_expected: Money,
}

impl StatusSummary {
    pub fn for_period(
        students: &[Student],
        settings: &[MonthlyFeeSetting],
        period: YearMonth,
        calculator: &StudentChargeCalculator,
    ) -> Self {
        let mut lines: BTreeMap<StudentStatus, StatusLine> =
            StudentStatus::ALL.iter().map(|s| (*s, StatusLine::default())).collect();

        for student in students {
            let expected = calculator.expected_charge(student, period, settings);
            let line = lines.entry(student.status()).or_default();
            line.count += 1;
            line.expected_amount += expected;
        }

        let total_expected: Money = lines.values().map(|l| l.expected_amount).sum();

        Self {
            period,
            lines,
            total_students: students.len(),
            total_expected,
        }
    }

    pub fn line(&self, status: StudentStatus) -> StatusLine {
        self.lines.get(&status).copied().unwrap_or_default()
    }
}

/// totals over a projected payment table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub expected: Money,
    pub paid: Money,
    pub remaining: Money,
    pub by_status: BTreeMap<MonthStatus, usize>,
}

impl ProjectionTotals {
    pub fn from_rows(rows: &[ProjectedMonthRow]) -> Self {
        let mut totals = ProjectionTotals::default();
        for row in rows {
            totals.expected += row.expected_amount;
            totals.paid += row.amount_paid;
            totals.remaining += row.remaining;
            *totals.by_status.entry(row.status).or_default() += 1;
        }
        totals
    }

    pub fn count(&self, status: MonthStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection;
    use crate::types::MonthlyPayment;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn settings() -> Vec<MonthlyFeeSetting> {
        vec![MonthlyFeeSetting::effective(2025, 1, Money::from_major(80)).unwrap()]
    }

    fn roster() -> Vec<Student> {
        let enrolled = date(2024, 9, 1);
        vec![
            Student::enrolled(1u64, StudentStatus::Normal, enrolled).unwrap(),
            Student::enrolled(2u64, StudentStatus::Normal, enrolled).unwrap(),
            Student::enrolled(3u64, StudentStatus::HalfFees, enrolled).unwrap(),
            Student::enrolled(4u64, StudentStatus::Fixed50, enrolled).unwrap(),
            Student::enrolled(5u64, StudentStatus::Exempt, enrolled).unwrap(),
            Student::excluded(6u64, enrolled, date(2025, 2, 1)),
        ]
    }

    #[test]
    fn test_status_summary() {
        let summary = StatusSummary::for_period(
            &roster(),
            &settings(),
            ym(2025, 3),
            &StudentChargeCalculator::default(),
        );

        assert_eq!(summary.lines.len(), 5);
        assert_eq!(summary.line(StudentStatus::Normal).count, 2);
        assert_eq!(summary.line(StudentStatus::Normal).expected_amount, Money::from_major(160));
        assert_eq!(summary.line(StudentStatus::HalfFees).expected_amount, Money::from_major(40));
        assert_eq!(summary.line(StudentStatus::Fixed50).expected_amount, Money::from_major(50));
        assert_eq!(summary.line(StudentStatus::Exempt).expected_amount, Money::ZERO);
        assert_eq!(summary.line(StudentStatus::Excluded).count, 1);
        assert_eq!(summary.total_students, 6);

        let line_sum: Money = summary.lines.values().map(|l| l.expected_amount).sum();
        assert_eq!(summary.total_expected, line_sum);
        assert_eq!(summary.total_expected, Money::from_major(330));
    }

    #[test]
    fn test_empty_roster_keeps_all_statuses() {
        let summary = StatusSummary::for_period(&[], &settings(), ym(2025, 3), &StudentChargeCalculator::default());
        assert_eq!(summary.lines.len(), 5);
        assert_eq!(summary.total_expected, Money::ZERO);
    }

    #[test]
    fn test_projection_totals() {
        let student = Student::enrolled(1u64, StudentStatus::Normal, date(2025, 1, 1)).unwrap();
        let payments = vec![
            MonthlyPayment::new(ym(2025, 1), Money::from_major(80), true),
            MonthlyPayment::new(ym(2025, 2), Money::from_major(30), false),
        ];
        let rows = projection::project(&student, &payments, &settings(), 2025, date(2025, 4, 15));
        let totals = ProjectionTotals::from_rows(&rows);

        assert_eq!(totals.expected, Money::from_major(320));
        assert_eq!(totals.paid, Money::from_major(110));
        assert_eq!(totals.remaining, Money::from_major(210));
        assert_eq!(totals.count(MonthStatus::Paid), 1);
        assert_eq!(totals.count(MonthStatus::Unpaid), 1);
        assert_eq!(totals.count(MonthStatus::Overdue), 2);
        assert_eq!(totals.count(MonthStatus::Pending), 0);
    }
}
