use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::advisories::AdvisoryLog;
use crate::config::ProjectionConfig;
use crate::decimal::Money;
use crate::schedule::{self, MonthlyFeeSetting};
use crate::types::{Student, StudentStatus, YearMonth};

/// base fee in force and the amount actually charged for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub base_fee: Money,
    pub expected: Money,
}

/// applies status-based adjustments to the resolved base fee
#[derive(Debug, Clone)]
pub struct StudentChargeCalculator {
    pub fixed_fee: Money,
}

impl Default for StudentChargeCalculator {
    fn default() -> Self {
        Self {
            fixed_fee: Money::from_decimal(dec!(50.00)),
        }
    }
}

impl StudentChargeCalculator {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self {
            fixed_fee: config.fixed_fee,
        }
    }

    /// charge for a status given the base fee.
    /// excluded students pay the base fee; exclusion only limits which months are billed
    pub fn adjust(&self, status: StudentStatus, base_fee: Money) -> Money {
        match status {
            StudentStatus::HalfFees => base_fee.half(),
            StudentStatus::Fixed50 => self.fixed_fee,
            StudentStatus::Exempt => Money::ZERO,
            StudentStatus::Normal | StudentStatus::Excluded => base_fee,
        }
    }

    pub fn expected_charge(
        &self,
        student: &Student,
        period: YearMonth,
        settings: &[MonthlyFeeSetting],
    ) -> Money {
        self.charge(student, period, settings).expected
    }

    pub fn charge(&self, student: &Student, period: YearMonth, settings: &[MonthlyFeeSetting]) -> Charge {
        let base_fee = schedule::resolve(settings, period);
        Charge {
            base_fee,
            expected: self.adjust(student.status(), base_fee),
        }
    }

    /// like [`charge`](Self::charge), recording a configuration gap when no fee applies
    pub fn charge_recorded(
        &self,
        student: &Student,
        period: YearMonth,
        settings: &[MonthlyFeeSetting],
        advisories: &mut AdvisoryLog,
    ) -> Charge {
        let base_fee = schedule::resolve_recorded(settings, period, advisories);
        Charge {
            base_fee,
            expected: self.adjust(student.status(), base_fee),
        }
    }
}
