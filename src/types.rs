use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// opaque student identifier as issued by the registry.
/// numeric ids are kept in their decimal string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        StudentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        StudentId(s.to_string())
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        StudentId(s)
    }
}

impl From<u64> for StudentId {
    fn from(n: u64) -> Self {
        StudentId(n.to_string())
    }
}

/// a calendar month, ordered by (year, month).
///
/// stored as the first day of the month so every value maps to a real date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "YearMonthRepr", into = "YearMonthRepr")]
pub struct YearMonth(NaiveDate);

#[doc(hidden)]
#[derive(Serialize, Deserialize)]
pub struct YearMonthRepr {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidMonth { month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or_else(|| LedgerError::InvalidDate {
                message: format!("year {} is out of range", year),
            })
    }

    /// month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date - Duration::days(i64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// due date of the month's fee
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// quarter of the year, 1-4
    pub fn quarter(&self) -> u32 {
        (self.month() + 2) / 3
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl TryFrom<YearMonthRepr> for YearMonth {
    type Error = LedgerError;

    fn try_from(repr: YearMonthRepr) -> Result<Self> {
        YearMonth::new(repr.year, repr.month)
    }
}

impl From<YearMonth> for YearMonthRepr {
    fn from(period: YearMonth) -> Self {
        YearMonthRepr {
            year: period.year(),
            month: period.month(),
        }
    }
}

/// billing classification of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StudentStatus {
    /// pays the full base fee
    #[serde(rename = "NORMAL")]
    Normal,
    /// pays half of the base fee
    #[serde(rename = "HALF_FEES")]
    HalfFees,
    /// pays a fixed amount regardless of the base fee
    #[serde(rename = "FIXED_50")]
    Fixed50,
    /// pays nothing, every month counts as settled
    #[serde(rename = "EXEMPT")]
    Exempt,
    /// left the institution; billed at the base fee up to the exclusion month
    #[serde(rename = "EXCLUDED")]
    Excluded,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 5] = [
        StudentStatus::Normal,
        StudentStatus::HalfFees,
        StudentStatus::Fixed50,
        StudentStatus::Exempt,
        StudentStatus::Excluded,
    ];

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            StudentStatus::Normal => "NORMAL",
            StudentStatus::HalfFees => "HALF_FEES",
            StudentStatus::Fixed50 => "FIXED_50",
            StudentStatus::Exempt => "EXEMPT",
            StudentStatus::Excluded => "EXCLUDED",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        StudentStatus::ALL
            .into_iter()
            .find(|status| status.as_wire_str() == s.trim())
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_wire_str())
    }
}

/// canonical student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    id: StudentId,
    status: StudentStatus,
    enrollment_date: NaiveDate,
    exclusion_start: Option<NaiveDate>,
}

impl Student {
    /// `exclusion_start` must be present exactly when the status is `Excluded`
    pub fn new(
        id: StudentId,
        status: StudentStatus,
        enrollment_date: NaiveDate,
        exclusion_start: Option<NaiveDate>,
    ) -> Result<Self> {
        if (status == StudentStatus::Excluded) != exclusion_start.is_some() {
            return Err(LedgerError::ExclusionMismatch { id, status });
        }

        Ok(Self {
            id,
            status,
            enrollment_date,
            exclusion_start,
        })
    }

    /// shorthand for a student that is not excluded
    pub fn enrolled(id: impl Into<StudentId>, status: StudentStatus, enrollment_date: NaiveDate) -> Result<Self> {
        Self::new(id.into(), status, enrollment_date, None)
    }

    /// shorthand for an excluded student
    pub fn excluded(id: impl Into<StudentId>, enrollment_date: NaiveDate, exclusion_start: NaiveDate) -> Self {
        Self {
            id: id.into(),
            status: StudentStatus::Excluded,
            enrollment_date,
            exclusion_start: Some(exclusion_start),
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn status(&self) -> StudentStatus {
        self.status
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    pub fn exclusion_start(&self) -> Option<NaiveDate> {
        self.exclusion_start
    }

    pub fn enrollment_period(&self) -> YearMonth {
        YearMonth::from_date(self.enrollment_date)
    }

    /// last billable month of an excluded student
    pub fn exclusion_period(&self) -> Option<YearMonth> {
        self.exclusion_start.map(YearMonth::from_date)
    }

    pub fn is_exempt(&self) -> bool {
        self.status == StudentStatus::Exempt
    }
}

/// a student as shown in the registry list, with the fields searches look at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentListing {
    pub student: Student,
    /// full name, empty when the registry has none
    pub name: String,
    pub phone: Option<String>,
    pub national_id: Option<String>,
    pub category: Option<String>,
    pub instructor_name: Option<String>,
    pub class_id: Option<String>,
}

/// aggregated payment for one student and month, as reported by the payments service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// owner of the payment; `None` when the list was fetched for a single student
    pub student_id: Option<StudentId>,
    pub period: YearMonth,
    pub amount_paid: Money,
    /// backend flag marking the month as settled
    pub payment_status: bool,
}

impl MonthlyPayment {
    pub fn new(period: YearMonth, amount_paid: Money, payment_status: bool) -> Self {
        Self {
            student_id: None,
            period,
            amount_paid,
            payment_status,
        }
    }

    pub fn for_student(mut self, id: StudentId) -> Self {
        self.student_id = Some(id);
        self
    }

    pub fn belongs_to(&self, id: &StudentId) -> bool {
        self.student_id.as_ref().map_or(true, |owner| owner == id)
    }
}

/// display status of a projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthStatus {
    Paid,
    Unpaid,
    Overdue,
    Pending,
}

/// what the payment table offers for a projected month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowAction {
    /// a payment can still be taken
    Payable,
    /// the month is settled
    Completed,
    /// nothing is charged
    Exempt,
}
