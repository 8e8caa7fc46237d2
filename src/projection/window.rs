use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{ExclusionCap, ProjectionConfig};
use crate::types::{Student, YearMonth};

/// inclusive range of months projected for one student and year.
/// `start_month > end_month` means there is nothing to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub year: i32,
    pub start_month: u32,
    pub end_month: u32,
}

impl MonthWindow {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            start_month: 1,
            end_month: 0,
        }
    }

    /// months of `selected_year` to project for `student`, relative to `today`
    pub fn for_student(
        student: &Student,
        selected_year: i32,
        today: NaiveDate,
        config: &ProjectionConfig,
    ) -> Self {
        let enrollment = student.enrollment_period();
        let exclusion = student.exclusion_period();

        if config.clip_before_enrollment && selected_year < enrollment.year() {
            return Self::empty(selected_year);
        }
        if config.clip_after_exclusion && exclusion.map_or(false, |e| selected_year > e.year()) {
            return Self::empty(selected_year);
        }

        let start_month = if selected_year == enrollment.year() {
            enrollment.month()
        } else {
            1
        };

        let current_year = today.year();
        let end_month = if selected_year < current_year {
            match exclusion {
                Some(e) if e.year() == selected_year => e.month(),
                _ => 12,
            }
        } else if selected_year == current_year {
            match exclusion {
                Some(e) if e.year() == selected_year || config.exclusion_cap == ExclusionCap::AnyYear => {
                    e.month()
                }
                _ => today.month(),
            }
        } else {
            12
        };

        Self {
            year: selected_year,
            start_month,
            end_month,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_month > self.end_month
    }

    /// `max(0, end - start + 1)`
    pub fn len(&self) -> usize {
        (self.end_month + 1).saturating_sub(self.start_month) as usize
    }

    /// projected months in ascending order
    pub fn periods(&self) -> impl Iterator<Item = YearMonth> {
        let year = self.year;
        (self.start_month..=self.end_month).filter_map(move |month| YearMonth::new(year, month).ok())
    }
}
