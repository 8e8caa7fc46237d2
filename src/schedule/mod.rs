use serde::{Deserialize, Serialize};

use crate::advisories::AdvisoryLog;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::YearMonth;

/// base monthly fee effective from `period` onward, in force until a later
/// setting replaces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFeeSetting {
    pub period: YearMonth,
    pub amount: Money,
}

impl MonthlyFeeSetting {
    pub fn new(period: YearMonth, amount: Money) -> Self {
        Self { period, amount }
    }

    /// convenience constructor validating the month
    pub fn effective(year: i32, month: u32, amount: Money) -> Result<Self> {
        Ok(Self::new(YearMonth::new(year, month)?, amount))
    }
}

/// latest setting whose period is not after `period`.
///
/// settings may come in any order. among duplicates of the latest period
/// the first one in slice order is kept.
pub fn applicable_setting(settings: &[MonthlyFeeSetting], period: YearMonth) -> Option<&MonthlyFeeSetting> {
    let mut latest: Option<&MonthlyFeeSetting> = None;
    for setting in settings.iter().filter(|s| s.period <= period) {
        match latest {
            Some(current) if setting.period <= current.period => {}
            _ => latest = Some(setting),
        }
    }
    latest
}

/// base fee in force for `period`, zero when nothing applies
pub fn resolve(settings: &[MonthlyFeeSetting], period: YearMonth) -> Money {
    applicable_setting(settings, period)
        .map(|s| s.amount)
        .unwrap_or(Money::ZERO)
}

/// like [`resolve`], recording a configuration gap when nothing applies
pub fn resolve_recorded(
    settings: &[MonthlyFeeSetting],
    period: YearMonth,
    advisories: &mut AdvisoryLog,
) -> Money {
    match applicable_setting(settings, period) {
        Some(setting) => setting.amount,
        None => {
            advisories.configuration_gap(period);
            Money::ZERO
        }
    }
}

/// validated fee history, sorted by period with at most one entry per period.
///
/// this is the write side: administrator changes go through `insert` or
/// `replace`, which reject duplicates and non-positive amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    settings: Vec<MonthlyFeeSetting>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self {
            settings: Vec::new(),
        }
    }

    pub fn from_settings(settings: impl IntoIterator<Item = MonthlyFeeSetting>) -> Result<Self> {
        let mut schedule = Self::new();
        for setting in settings {
            schedule.insert(setting)?;
        }
        Ok(schedule)
    }

    fn check_amount(amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::NonPositiveFee { amount });
        }
        Ok(())
    }

    /// add a setting for a period that has none yet
    pub fn insert(&mut self, setting: MonthlyFeeSetting) -> Result<()> {
        Self::check_amount(setting.amount)?;
        match self.settings.binary_search_by_key(&setting.period, |s| s.period) {
            Ok(_) => Err(LedgerError::DuplicateFeeSetting {
                period: setting.period,
            }),
            Err(index) => {
                self.settings.insert(index, setting);
                Ok(())
            }
        }
    }

    /// add or overwrite the setting for a period, returning the previous one
    pub fn replace(&mut self, setting: MonthlyFeeSetting) -> Result<Option<MonthlyFeeSetting>> {
        Self::check_amount(setting.amount)?;
        match self.settings.binary_search_by_key(&setting.period, |s| s.period) {
            Ok(index) => Ok(Some(std::mem::replace(&mut self.settings[index], setting))),
            Err(index) => {
                self.settings.insert(index, setting);
                Ok(None)
            }
        }
    }

    pub fn applicable(&self, period: YearMonth) -> Option<&MonthlyFeeSetting> {
        let after = self.settings.partition_point(|s| s.period <= period);
        after.checked_sub(1).map(|index| &self.settings[index])
    }

    pub fn resolve(&self, period: YearMonth) -> Money {
        self.applicable(period).map(|s| s.amount).unwrap_or(Money::ZERO)
    }

    pub fn resolve_recorded(&self, period: YearMonth, advisories: &mut AdvisoryLog) -> Money {
        resolve_recorded(&self.settings, period, advisories)
    }

    /// most recent setting, i.e. the fee shown on the admin page
    pub fn latest(&self) -> Option<&MonthlyFeeSetting> {
        self.settings.last()
    }

    pub fn as_slice(&self) -> &[MonthlyFeeSetting] {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}
