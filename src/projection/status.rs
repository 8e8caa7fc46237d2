use chrono::{Datelike, NaiveDate};

use crate::decimal::Money;
use crate::types::{MonthStatus, MonthlyPayment, RowAction, YearMonth};

/// unpaid month whose due date (the 1st) is strictly before today
pub fn is_overdue(is_paid: bool, period: YearMonth, today: NaiveDate) -> bool {
    !is_paid && period.first_day() < today && period.year() <= today.year()
}

/// status tag in priority order: exempt, recorded payment, overdue, pending
pub fn resolve_status(is_exempt: bool, payment: Option<&MonthlyPayment>, overdue: bool) -> MonthStatus {
    if is_exempt {
        return MonthStatus::Paid;
    }
    match payment {
        Some(p) if p.payment_status => MonthStatus::Paid,
        Some(_) => MonthStatus::Unpaid,
        None if overdue => MonthStatus::Overdue,
        None => MonthStatus::Pending,
    }
}

pub fn row_action(is_exempt: bool, is_paid: bool, expected: Money) -> RowAction {
    if is_paid {
        RowAction::Completed
    } else if is_exempt || expected.is_zero() {
        RowAction::Exempt
    } else {
        RowAction::Payable
    }
}
