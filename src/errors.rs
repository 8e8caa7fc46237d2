use thiserror::Error;

use crate::decimal::Money;
use crate::types::{StudentId, StudentStatus, YearMonth};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid month: {month} (expected 1-12)")]
    InvalidMonth {
        month: u32,
    },

    #[error("invalid quarter: {quarter} (expected 1-4)")]
    InvalidQuarter {
        quarter: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("duplicate fee setting for {period}")]
    DuplicateFeeSetting {
        period: YearMonth,
    },

    #[error("fee amount must be positive: {amount}")]
    NonPositiveFee {
        amount: Money,
    },

    #[error("malformed amount in {field}: {value:?}")]
    MalformedAmount {
        field: String,
        value: String,
    },

    #[error("malformed date in {field}: {value:?}")]
    MalformedDate {
        field: String,
        value: String,
    },

    #[error("missing field: {field}")]
    MissingField {
        field: String,
    },

    #[error("student {id}: exclusion date does not match status {status:?}")]
    ExclusionMismatch {
        id: StudentId,
        status: StudentStatus,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
