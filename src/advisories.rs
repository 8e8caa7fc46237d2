use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::YearMonth;

/// non-fatal conditions met while computing a best-effort result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    /// malformed or missing field, replaced by a neutral default
    DataError {
        context: String,
        message: String,
    },
    /// no fee setting applies to the period; the fee resolved to zero
    ConfigurationGap {
        period: YearMonth,
    },
}

impl Advisory {
    pub fn is_data_error(&self) -> bool {
        matches!(self, Advisory::DataError { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DataError { context, message } => write!(f, "{}: {}", context, message),
            Advisory::ConfigurationGap { period } => {
                write!(f, "fee not yet configured for {}", period)
            }
        }
    }
}

/// append-only log of advisories raised during an operation.
///
/// every entry is mirrored to `tracing` when recorded.
#[derive(Debug, Default)]
pub struct AdvisoryLog {
    entries: Vec<Advisory>,
}

impl AdvisoryLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, advisory: Advisory) {
        match &advisory {
            Advisory::DataError { context, message } => {
                tracing::warn!(%context, %message, "data error replaced by default");
            }
            Advisory::ConfigurationGap { period } => {
                tracing::debug!(%period, "no fee setting applies, resolving to zero");
            }
        }
        self.entries.push(advisory);
    }

    pub fn data_error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.record(Advisory::DataError {
            context: context.into(),
            message: message.into(),
        });
    }

    /// gaps are recorded once per period
    pub fn configuration_gap(&mut self, period: YearMonth) {
        let gap = Advisory::ConfigurationGap { period };
        if !self.entries.contains(&gap) {
            self.record(gap);
        }
    }

    pub fn entries(&self) -> &[Advisory] {
        &self.entries
    }

    pub fn take_entries(&mut self) -> Vec<Advisory> {
        std::mem::take(&mut self.entries)
    }

    pub fn data_errors(&self) -> impl Iterator<Item = &Advisory> {
        self.entries.iter().filter(|a| a.is_data_error())
    }

    pub fn gaps(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.entries.iter().filter_map(|a| match a {
            Advisory::ConfigurationGap { period } => Some(*period),
            Advisory::DataError { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
