use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};

/// how an exclusion date caps the projection of the current year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCap {
    /// cap only when the exclusion falls in the selected year
    SameYear,
    /// cap at the exclusion month whatever its year
    AnyYear,
}

/// projection and charge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// monthly charge for `FIXED_50` students
    pub fixed_fee: Money,
    pub exclusion_cap: ExclusionCap,
    /// opt-in: a year before the enrollment year projects no months
    pub clip_before_enrollment: bool,
    /// opt-in: a year after the exclusion year projects no months
    pub clip_after_exclusion: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fixed_fee: Money::from_decimal(dec!(50.00)),
            exclusion_cap: ExclusionCap::SameYear,
            clip_before_enrollment: false,
            clip_after_exclusion: false,
        }
    }
}

impl ProjectionConfig {
    /// reproduces the payment table exactly as the registry pages drew it
    pub fn legacy() -> Self {
        Self {
            exclusion_cap: ExclusionCap::AnyYear,
            ..Self::default()
        }
    }

    /// hide the years outside the enrollment span
    pub fn clipped() -> Self {
        Self {
            clip_before_enrollment: true,
            clip_after_exclusion: true,
            ..Self::default()
        }
    }

    pub fn with_fixed_fee(mut self, fee: Money) -> Self {
        self.fixed_fee = fee;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fixed_fee.is_negative() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("fixed fee cannot be negative: {}", self.fixed_fee),
            });
        }
        Ok(())
    }

    /// parse and validate a json configuration; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ProjectionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
