use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::YearMonth;

/// category used when an entry carries none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// canonical revenue or expense entry, as aggregated by the financial reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// who recorded the entry (expenses only)
    #[serde(default)]
    pub signature: Option<String>,
}

/// reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    All,
    Month(YearMonth),
    Quarter { year: i32, quarter: u32 },
    Year(i32),
}

impl ReportPeriod {
    pub fn quarter(year: i32, quarter: u32) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(LedgerError::InvalidQuarter { quarter });
        }
        Ok(ReportPeriod::Quarter { year, quarter })
    }

    /// quarter containing the given month
    pub fn quarter_of(period: YearMonth) -> Self {
        ReportPeriod::Quarter {
            year: period.year(),
            quarter: period.quarter(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            ReportPeriod::All => true,
            ReportPeriod::Month(period) => YearMonth::from_date(date) == *period,
            ReportPeriod::Quarter { year, quarter } => {
                date.year() == *year && (date.month() + 2) / 3 == *quarter
            }
            ReportPeriod::Year(year) => date.year() == *year,
        }
    }
}

/// revenue/expense totals for one category map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total: Money,
    pub by_category: BTreeMap<String, Money>,
    pub count: usize,
}

impl CategoryTotals {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut totals = CategoryTotals::default();
        for tx in transactions {
            totals.total += tx.amount;
            *totals.by_category.entry(tx.category.clone()).or_default() += tx.amount;
            totals.count += 1;
        }
        totals
    }
}

/// filtered revenue and expense figures for a report period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub period: ReportPeriod,
    pub revenue: CategoryTotals,
    pub expenses: CategoryTotals,
    pub net_income: Money,
}

impl LedgerReport {
    pub fn build(revenues: &[Transaction], expenses: &[Transaction], period: ReportPeriod) -> Self {
        let revenue = CategoryTotals::from_transactions(revenues.iter().filter(|t| period.contains(t.date)));
        let expenses = CategoryTotals::from_transactions(expenses.iter().filter(|t| period.contains(t.date)));
        let net_income = revenue.total - expenses.total;

        tracing::debug!(
            ?period,
            revenue_count = revenue.count,
            expense_count = expenses.count,
            %net_income,
            "ledger report built"
        );

        Self {
            period,
            revenue,
            expenses,
            net_income,
        }
    }
}

/// revenue and expense totals of one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub period: YearMonth,
    pub revenue: Money,
    pub expenses: Money,
}

/// twelve rows, january first, for charting a year
pub fn monthly_breakdown(revenues: &[Transaction], expenses: &[Transaction], year: i32) -> Vec<MonthlyTotals> {
    let sum_in = |transactions: &[Transaction], period: YearMonth| -> Money {
        transactions
            .iter()
            .filter(|t| YearMonth::from_date(t.date) == period)
            .map(|t| t.amount)
            .sum()
    };

    (1..=12)
        .filter_map(|month| YearMonth::new(year, month).ok())
        .map(|period| MonthlyTotals {
            period,
            revenue: sum_in(revenues, period),
            expenses: sum_in(expenses, period),
        })
        .collect()
}

/// years and months that have at least one entry, for period pickers
pub fn available_periods(revenues: &[Transaction], expenses: &[Transaction]) -> Vec<YearMonth> {
    let mut periods: Vec<YearMonth> = revenues
        .iter()
        .chain(expenses.iter())
        .map(|t| YearMonth::from_date(t.date))
        .collect();
    periods.sort();
    periods.dedup();
    periods
}
