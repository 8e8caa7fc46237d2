use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::ledger::Transaction;
use crate::types::{StudentListing, StudentStatus};

/// inclusive date bounds; an open side matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }
}

/// inclusive amount bounds; an open side matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountRange {
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl AmountRange {
    pub fn contains(&self, amount: Money) -> bool {
        self.min.map_or(true, |min| min <= amount) && self.max.map_or(true, |max| amount <= max)
    }
}

/// case-insensitive substring search; a blank term matches everything
fn search_matches(term: &str, fields: &[Option<&str>]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// an empty selection accepts every value
fn selected<T: PartialEq>(selection: &[T], value: Option<&T>) -> bool {
    selection.is_empty() || value.map_or(false, |v| selection.contains(v))
}

/// criteria of the student list. all criteria must hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentFilter {
    /// matched against name, phone, national id, category and instructor
    pub search: String,
    pub statuses: Vec<StudentStatus>,
    pub class_ids: Vec<String>,
    pub categories: Vec<String>,
    pub enrollment: DateRange,
}

impl StudentFilter {
    pub fn matches(&self, listing: &StudentListing) -> bool {
        let searched = search_matches(
            &self.search,
            &[
                Some(listing.name.as_str()),
                listing.phone.as_deref(),
                listing.national_id.as_deref(),
                listing.category.as_deref(),
                listing.instructor_name.as_deref(),
            ],
        );

        searched
            && selected(&self.statuses, Some(&listing.student.status()))
            && selected(&self.class_ids, listing.class_id.as_ref())
            && selected(&self.categories, listing.category.as_ref())
            && self.enrollment.contains(listing.student.enrollment_date())
    }

    pub fn apply<'a>(&self, listings: &'a [StudentListing]) -> Vec<&'a StudentListing> {
        let kept: Vec<&StudentListing> = listings.iter().filter(|l| self.matches(l)).collect();
        tracing::debug!(kept = kept.len(), total = listings.len(), "student filter applied");
        kept
    }
}

/// criteria of the revenue and expense lists. all criteria must hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// matched against name, category, notes and signature
    pub search: String,
    pub categories: Vec<String>,
    pub amount: AmountRange,
    /// compared with the entry's canonical date
    pub dates: DateRange,
    pub signatures: Vec<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let searched = search_matches(
            &self.search,
            &[
                tx.name.as_deref(),
                Some(tx.category.as_str()),
                tx.notes.as_deref(),
                tx.signature.as_deref(),
            ],
        );

        searched
            && selected(&self.categories, Some(&tx.category))
            && self.amount.contains(tx.amount)
            && self.dates.contains(tx.date)
            && selected(&self.signatures, tx.signature.as_ref())
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let kept: Vec<&Transaction> = transactions.iter().filter(|t| self.matches(t)).collect();
        tracing::debug!(kept = kept.len(), total = transactions.len(), "transaction filter applied");
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisories::AdvisoryLog;
    use crate::wire::{self, StudentRecord, TransactionRecord};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn listings() -> Vec<StudentListing> {
        let records: Vec<StudentRecord> = wire::parse_list(
            r#"[
                {"id": 1, "name": "Amina Haddad", "phone": "0550 111", "status": "NORMAL",
                 "startedAt": "2024-09-01", "category": "QURAN", "instructorName": "Yusuf",
                 "classInfo": {"id": 3}},
                {"id": 2, "firstName": "Omar", "lastName": "Saleh", "nationalId": "A-99812",
                 "status": "HALF_FEES", "startedAt": "2025-01-15", "category": "ARABIC", "classId": "7"},
                {"id": 3, "name": "Layla", "status": "EXEMPT", "startedAt": "2025-03-02",
                 "category": "QURAN", "class": {"id": 7}},
                {"id": 4, "name": "Karim", "status": "NORMAL", "startedAt": "2025-02-10"}
            ]"#,
        )
        .unwrap();
        let mut log = AdvisoryLog::new();
        let listings = wire::normalize_listings(&records, &mut log);
        assert!(log.is_empty());
        listings
    }

    fn ids(kept: &[&StudentListing]) -> Vec<String> {
        kept.iter().map(|l| l.student.id().to_string()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let listings = listings();
        assert_eq!(StudentFilter::default().apply(&listings).len(), 4);
    }

    #[test]
    fn test_student_search_fields() {
        let listings = listings();
        let search = |term: &str| {
            let filter = StudentFilter {
                search: term.to_string(),
                ..StudentFilter::default()
            };
            ids(&filter.apply(&listings))
        };

        assert_eq!(search("  amina "), vec!["1"]);
        assert_eq!(search("0550"), vec!["1"]);
        assert_eq!(search("a-998"), vec!["2"]);
        assert_eq!(search("omar saleh"), vec!["2"]);
        assert_eq!(search("quran"), vec!["1", "3"]);
        assert_eq!(search("yusuf"), vec!["1"]);
        assert!(search("nobody").is_empty());
    }

    #[test]
    fn test_student_selection_sets() {
        let listings = listings();

        let by_status = StudentFilter {
            statuses: vec![StudentStatus::Normal, StudentStatus::Exempt],
            ..StudentFilter::default()
        };
        assert_eq!(ids(&by_status.apply(&listings)), vec!["1", "3", "4"]);

        // class ids match across the number and string forms; no class never matches
        let by_class = StudentFilter {
            class_ids: vec!["7".to_string()],
            ..StudentFilter::default()
        };
        assert_eq!(ids(&by_class.apply(&listings)), vec!["2", "3"]);

        let by_category = StudentFilter {
            categories: vec!["QURAN".to_string()],
            statuses: vec![StudentStatus::Exempt],
            ..StudentFilter::default()
        };
        assert_eq!(ids(&by_category.apply(&listings)), vec!["3"]);
    }

    #[test]
    fn test_student_enrollment_range() {
        let listings = listings();
        let filter = StudentFilter {
            enrollment: DateRange::between(date(2025, 1, 15), date(2025, 2, 10)),
            ..StudentFilter::default()
        };
        assert_eq!(ids(&filter.apply(&listings)), vec!["2", "4"]);

        let open_end = StudentFilter {
            enrollment: DateRange {
                start: Some(date(2025, 3, 1)),
                end: None,
            },
            ..StudentFilter::default()
        };
        assert_eq!(ids(&open_end.apply(&listings)), vec!["3"]);
    }

    fn transactions() -> Vec<Transaction> {
        let records: Vec<TransactionRecord> = wire::parse_list(
            r#"[
                {"name": "rent march", "category": "MAINTENANCE", "amount": "900", "createdAt": "2025-03-01T09:00:00Z", "signature": "Abdelaziz"},
                {"name": "teacher pay", "category": "SALARIES", "amount": 1500, "createdAt": "2025-03-28", "notes": "bonus included", "signature": "Sara"},
                {"name": "printer", "category": "OTHER", "amount": "120.50", "createdAt": "2025-04-02", "signature": "Abdelaziz"}
            ]"#,
        )
        .unwrap();
        let mut log = AdvisoryLog::new();
        wire::normalize_expenses(&records, date(2025, 6, 1), &mut log)
    }

    fn names(kept: &[&Transaction]) -> Vec<String> {
        kept.iter().filter_map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_transaction_search_and_category() {
        let txs = transactions();

        let notes = TransactionFilter {
            search: "BONUS".to_string(),
            ..TransactionFilter::default()
        };
        assert_eq!(names(&notes.apply(&txs)), vec!["teacher pay"]);

        let signer = TransactionFilter {
            search: "abdel".to_string(),
            categories: vec!["OTHER".to_string()],
            ..TransactionFilter::default()
        };
        assert_eq!(names(&signer.apply(&txs)), vec!["printer"]);
    }

    #[test]
    fn test_transaction_amount_and_date_ranges() {
        let txs = transactions();

        let amounts = TransactionFilter {
            amount: AmountRange {
                min: Some(Money::from_decimal(dec!(120.50))),
                max: Some(Money::from_major(900)),
            },
            ..TransactionFilter::default()
        };
        assert_eq!(names(&amounts.apply(&txs)), vec!["rent march", "printer"]);

        let march = TransactionFilter {
            dates: DateRange::between(date(2025, 3, 1), date(2025, 3, 31)),
            ..TransactionFilter::default()
        };
        assert_eq!(names(&march.apply(&txs)), vec!["rent march", "teacher pay"]);
    }

    #[test]
    fn test_transaction_signatures() {
        let txs = transactions();
        let filter = TransactionFilter {
            signatures: vec!["Sara".to_string()],
            ..TransactionFilter::default()
        };
        assert_eq!(names(&filter.apply(&txs)), vec!["teacher pay"]);
    }

    #[test]
    fn test_filter_from_json() {
        let filter: StudentFilter =
            serde_json::from_str(r#"{"statuses": ["HALF_FEES"], "enrollment": {"start": "2025-01-01"}}"#).unwrap();
        assert_eq!(filter.statuses, vec![StudentStatus::HalfFees]);
        assert!(!filter.enrollment.is_open());
        assert!(filter.search.is_empty());
    }
}
