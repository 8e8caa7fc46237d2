use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::advisories::AdvisoryLog;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::ledger::{Transaction, UNCATEGORIZED};
use crate::schedule::MonthlyFeeSetting;
use crate::types::{MonthlyPayment, Student, StudentId, StudentListing, StudentStatus, YearMonth};

/// numeric field that may arrive as a json number or a string.
///
/// every backend field fallback is resolved by the `normalize` steps in this
/// module; nothing past them sees an ambiguous shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    Number(f64),
    Text(String),
}

impl WireAmount {
    pub fn to_money(&self) -> Option<Money> {
        match self {
            WireAmount::Number(n) => Money::from_f64(*n),
            WireAmount::Text(s) => Money::from_str_exact(s).ok(),
        }
    }

    fn raw(&self) -> String {
        match self {
            WireAmount::Number(n) => n.to_string(),
            WireAmount::Text(s) => s.clone(),
        }
    }
}

/// identifier that may arrive as a json number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    /// string form used for comparisons; blank text ids count as missing
    pub fn as_key(&self) -> Option<String> {
        match self {
            WireId::Number(n) => Some(n.to_string()),
            WireId::Text(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

impl From<&WireId> for StudentId {
    fn from(id: &WireId) -> Self {
        match id {
            WireId::Number(n) => StudentId::new(n.to_string()),
            WireId::Text(s) => StudentId::new(s.clone()),
        }
    }
}

/// accepts `YYYY-MM-DD`, `YYYY-MM` (first of month), RFC 3339 timestamps
/// and naive `YYYY-MM-DDTHH:MM:SS[.f]`
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// list endpoints answer either `[...]` or `{ "data": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

pub fn parse_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let envelope: ListEnvelope<T> = serde_json::from_str(json)?;
    Ok(match envelope {
        ListEnvelope::Wrapped { data } => data,
        ListEnvelope::Bare(items) => items,
    })
}

/// admin settings entry: `{ year, month, settingValue }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSettingRecord {
    pub year: i32,
    pub month: u32,
    pub setting_value: WireAmount,
}

impl FeeSettingRecord {
    /// a malformed amount resolves to zero; an impossible month drops the entry
    pub fn normalize(&self, advisories: &mut AdvisoryLog) -> Option<MonthlyFeeSetting> {
        let period = match YearMonth::new(self.year, self.month) {
            Ok(period) => period,
            Err(e) => {
                advisories.data_error("fee setting", e.to_string());
                return None;
            }
        };

        let amount = self.setting_value.to_money().unwrap_or_else(|| {
            advisories.data_error(
                format!("fee setting {}", period),
                format!("settingValue {:?} is not a number", self.setting_value.raw()),
            );
            Money::ZERO
        });

        Some(MonthlyFeeSetting::new(period, amount))
    }
}

pub fn normalize_fee_settings(records: &[FeeSettingRecord], advisories: &mut AdvisoryLog) -> Vec<MonthlyFeeSetting> {
    records.iter().filter_map(|r| r.normalize(advisories)).collect()
}

/// nested class reference: `{ id, ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRef {
    #[serde(default)]
    pub id: Option<WireId>,
}

/// registry entry: `{ id, status, startedAt, exclusionStart }` plus the
/// descriptive fields shown in the student list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: WireId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub exclusion_start: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default)]
    pub class_info: Option<ClassRef>,
    #[serde(default)]
    pub class_id: Option<WireId>,
    #[serde(default)]
    pub class_entity: Option<ClassRef>,
    #[serde(default, rename = "class")]
    pub class_ref: Option<ClassRef>,
}

impl StudentRecord {
    /// fails when the dates needed for projection are missing or malformed
    pub fn normalize(&self, advisories: &mut AdvisoryLog) -> Result<Student> {
        let id = StudentId::from(&self.id);
        let context = format!("student {}", id);

        let status = match non_empty(&self.status) {
            None => StudentStatus::Normal,
            Some(raw) => StudentStatus::from_wire(raw).unwrap_or_else(|| {
                advisories.data_error(&context, format!("unknown status {:?}, billed as NORMAL", raw));
                StudentStatus::Normal
            }),
        };

        let (field, raw_enrollment) = match (non_empty(&self.started_at), non_empty(&self.enrollment_date)) {
            (Some(raw), _) => ("startedAt", raw),
            (None, Some(raw)) => ("enrollmentDate", raw),
            (None, None) => {
                return Err(LedgerError::MissingField {
                    field: "startedAt".to_string(),
                })
            }
        };
        let enrollment_date = parse_wire_date(raw_enrollment).ok_or_else(|| LedgerError::MalformedDate {
            field: field.to_string(),
            value: raw_enrollment.to_string(),
        })?;

        let exclusion_start = match (status, non_empty(&self.exclusion_start)) {
            (StudentStatus::Excluded, Some(raw)) => {
                Some(parse_wire_date(raw).ok_or_else(|| LedgerError::MalformedDate {
                    field: "exclusionStart".to_string(),
                    value: raw.to_string(),
                })?)
            }
            (StudentStatus::Excluded, None) => {
                return Err(LedgerError::MissingField {
                    field: "exclusionStart".to_string(),
                })
            }
            (_, Some(raw)) => {
                advisories.data_error(&context, format!("exclusionStart {:?} ignored for status {}", raw, status));
                None
            }
            (_, None) => None,
        };

        Student::new(id, status, enrollment_date, exclusion_start)
    }

    /// class id from `classInfo.id`, then `classId`, `classEntity.id`, `class.id`
    pub fn resolved_class_id(&self) -> Option<String> {
        let nested = |class: &Option<ClassRef>| class.as_ref().and_then(|c| c.id.as_ref()).and_then(WireId::as_key);

        nested(&self.class_info)
            .or_else(|| self.class_id.as_ref().and_then(WireId::as_key))
            .or_else(|| nested(&self.class_entity))
            .or_else(|| nested(&self.class_ref))
    }

    /// `name`, or `firstName lastName` when the backend sends the parts
    pub fn display_name(&self) -> String {
        match non_empty(&self.name) {
            Some(name) => name.to_string(),
            None => [&self.first_name, &self.last_name]
                .into_iter()
                .filter_map(non_empty)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn normalize_listing(&self, advisories: &mut AdvisoryLog) -> Result<StudentListing> {
        let student = self.normalize(advisories)?;
        let text = |value: &Option<String>| non_empty(value).map(str::to_string);

        Ok(StudentListing {
            student,
            name: self.display_name(),
            phone: text(&self.phone),
            national_id: text(&self.national_id),
            category: text(&self.category),
            instructor_name: text(&self.instructor_name),
            class_id: self.resolved_class_id(),
        })
    }
}

/// records that cannot be normalised are left out with a data error
pub fn normalize_listings(records: &[StudentRecord], advisories: &mut AdvisoryLog) -> Vec<StudentListing> {
    records
        .iter()
        .filter_map(|record| match record.normalize_listing(advisories) {
            Ok(listing) => Some(listing),
            Err(e) => {
                advisories.data_error(format!("student {}", StudentId::from(&record.id)), e.to_string());
                None
            }
        })
        .collect()
}

/// monthly aggregate: `{ month, year, amountPaid, paymentStatus }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentRecord {
    #[serde(default)]
    pub student_id: Option<WireId>,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub amount_paid: Option<WireAmount>,
    #[serde(default)]
    pub payment_status: bool,
}

impl MonthlyPaymentRecord {
    pub fn normalize(&self, advisories: &mut AdvisoryLog) -> Option<MonthlyPayment> {
        let period = match YearMonth::new(self.year, self.month) {
            Ok(period) => period,
            Err(e) => {
                advisories.data_error("monthly payment", e.to_string());
                return None;
            }
        };

        let amount_paid = match &self.amount_paid {
            None => Money::ZERO,
            Some(raw) => raw.to_money().unwrap_or_else(|| {
                advisories.data_error(
                    format!("monthly payment {}", period),
                    format!("amountPaid {:?} is not a number", raw.raw()),
                );
                Money::ZERO
            }),
        };

        let payment = MonthlyPayment::new(period, amount_paid, self.payment_status);
        Some(match &self.student_id {
            Some(id) => payment.for_student(StudentId::from(id)),
            None => payment,
        })
    }
}

pub fn normalize_payments(records: &[MonthlyPaymentRecord], advisories: &mut AdvisoryLog) -> Vec<MonthlyPayment> {
    records.iter().filter_map(|r| r.normalize(advisories)).collect()
}

/// revenue or expense entry; the date may live in `month`, `date` or `createdAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<WireAmount>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl TransactionRecord {
    fn label(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(WireId::Number(n))) => n.to_string(),
            (None, Some(WireId::Text(s))) => s.clone(),
            (None, None) => "unnamed".to_string(),
        }
    }

    /// revenues are dated by `month`, then `date`, then `createdAt`
    pub fn normalize_revenue(&self, today: NaiveDate, advisories: &mut AdvisoryLog) -> Option<Transaction> {
        let candidates = [("month", &self.month), ("date", &self.date), ("createdAt", &self.created_at)];
        self.normalize_with(&candidates, "revenue", today, advisories)
    }

    /// expenses are dated by `createdAt`, then `date`
    pub fn normalize_expense(&self, today: NaiveDate, advisories: &mut AdvisoryLog) -> Option<Transaction> {
        let candidates = [("createdAt", &self.created_at), ("date", &self.date)];
        self.normalize_with(&candidates, "expense", today, advisories)
    }

    fn normalize_with(
        &self,
        candidates: &[(&str, &Option<String>)],
        kind: &str,
        today: NaiveDate,
        advisories: &mut AdvisoryLog,
    ) -> Option<Transaction> {
        let context = format!("{} {}", kind, self.label());

        let date = match candidates.iter().find_map(|(field, value)| non_empty(value).map(|v| (*field, v))) {
            Some((field, raw)) => match parse_wire_date(raw) {
                Some(date) => date,
                None => {
                    advisories.data_error(&context, format!("{} {:?} is not a date, entry skipped", field, raw));
                    return None;
                }
            },
            None => {
                advisories.data_error(&context, "no date field, dated today");
                today
            }
        };

        let amount = match &self.amount {
            None => Money::ZERO,
            Some(raw) => raw.to_money().unwrap_or_else(|| {
                advisories.data_error(&context, format!("amount {:?} is not a number", raw.raw()));
                Money::ZERO
            }),
        };

        let category = non_empty(&self.category).unwrap_or(UNCATEGORIZED).to_string();
        let text = |value: &Option<String>| non_empty(value).map(str::to_string);

        Some(Transaction {
            category,
            amount,
            date,
            name: text(&self.name),
            notes: text(&self.notes),
            signature: text(&self.signature),
        })
    }
}

pub fn normalize_revenues(
    records: &[TransactionRecord],
    today: NaiveDate,
    advisories: &mut AdvisoryLog,
) -> Vec<Transaction> {
    records
        .iter()
        .filter_map(|r| r.normalize_revenue(today, advisories))
        .collect()
}

pub fn normalize_expenses(
    records: &[TransactionRecord],
    today: NaiveDate,
    advisories: &mut AdvisoryLog,
) -> Vec<Transaction> {
    records
        .iter()
        .filter_map(|r| r.normalize_expense(today, advisories))
        .collect()
}
