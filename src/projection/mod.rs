pub mod status;
pub mod window;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::advisories::AdvisoryLog;
use crate::charges::StudentChargeCalculator;
use crate::config::ProjectionConfig;
use crate::decimal::Money;
use crate::schedule::MonthlyFeeSetting;
use crate::types::{MonthStatus, MonthlyPayment, RowAction, Student, YearMonth};
use crate::wire::{self, FeeSettingRecord, MonthlyPaymentRecord, StudentRecord};

pub use window::MonthWindow;

/// one line of a student's payment table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedMonthRow {
    pub period: YearMonth,
    /// fee in force before the status adjustment
    pub base_fee: Money,
    pub expected_amount: Money,
    pub amount_paid: Money,
    /// `expected_amount - amount_paid`, negative when overpaid
    pub remaining: Money,
    pub status: MonthStatus,
    pub has_payment_record: bool,
    pub is_overdue: bool,
    pub action: RowAction,
}

impl ProjectedMonthRow {
    pub fn month(&self) -> u32 {
        self.period.month()
    }

    pub fn year(&self) -> i32 {
        self.period.year()
    }
}

/// builds per-month payment tables for a student.
///
/// the charge calculator is derived from the configuration, so the
/// configuration only changes through [`with_config`](Self::with_config)
#[derive(Debug, Clone, Default)]
pub struct MonthlyStatusProjector {
    config: ProjectionConfig,
    charges: StudentChargeCalculator,
}

impl MonthlyStatusProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        let charges = StudentChargeCalculator::new(&config);
        Self { config, charges }
    }

    /// replace the configuration, rebuilding the charge calculator
    pub fn with_config(self, config: ProjectionConfig) -> Self {
        Self::new(config)
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn charges(&self) -> &StudentChargeCalculator {
        &self.charges
    }

    pub fn window(&self, student: &Student, selected_year: i32, today: NaiveDate) -> MonthWindow {
        MonthWindow::for_student(student, selected_year, today, &self.config)
    }

    /// rows for every projected month of `selected_year`, ascending
    pub fn project(
        &self,
        student: &Student,
        payments: &[MonthlyPayment],
        settings: &[MonthlyFeeSetting],
        selected_year: i32,
        today: NaiveDate,
    ) -> Vec<ProjectedMonthRow> {
        let mut advisories = AdvisoryLog::new();
        self.project_recorded(student, payments, settings, selected_year, today, &mut advisories)
    }

    /// like [`project`](Self::project), recording fee configuration gaps
    pub fn project_recorded(
        &self,
        student: &Student,
        payments: &[MonthlyPayment],
        settings: &[MonthlyFeeSetting],
        selected_year: i32,
        today: NaiveDate,
        advisories: &mut AdvisoryLog,
    ) -> Vec<ProjectedMonthRow> {
        let window = self.window(student, selected_year, today);
        tracing::debug!(
            student = %student.id(),
            year = selected_year,
            start = window.start_month,
            end = window.end_month,
            "projecting months"
        );

        window
            .periods()
            .map(|period| self.project_month(student, payments, settings, period, today, advisories))
            .collect()
    }

    fn project_month(
        &self,
        student: &Student,
        payments: &[MonthlyPayment],
        settings: &[MonthlyFeeSetting],
        period: YearMonth,
        today: NaiveDate,
        advisories: &mut AdvisoryLog,
    ) -> ProjectedMonthRow {
        let charge = self.charges.charge_recorded(student, period, settings, advisories);

        let payment = payments
            .iter()
            .find(|p| p.period == period && p.belongs_to(student.id()));
        let amount_paid = payment.map(|p| p.amount_paid).unwrap_or(Money::ZERO);
        let is_paid = payment.map_or(false, |p| p.payment_status);

        let overdue = status::is_overdue(is_paid, period, today);
        let exempt = student.is_exempt();

        ProjectedMonthRow {
            period,
            base_fee: charge.base_fee,
            expected_amount: charge.expected,
            amount_paid,
            remaining: charge.expected - amount_paid,
            status: status::resolve_status(exempt, payment, overdue),
            has_payment_record: payment.is_some(),
            is_overdue: overdue,
            action: status::row_action(exempt, is_paid, charge.expected),
        }
    }

    /// project using the provider's current date as "today"
    pub fn project_now(
        &self,
        student: &Student,
        payments: &[MonthlyPayment],
        settings: &[MonthlyFeeSetting],
        selected_year: i32,
        time: &SafeTimeProvider,
    ) -> Vec<ProjectedMonthRow> {
        self.project(student, payments, settings, selected_year, time.now().date_naive())
    }

    /// project straight from backend payloads.
    ///
    /// a student record that cannot be normalised yields no rows and a data error
    pub fn project_record(
        &self,
        record: &StudentRecord,
        payments: &[MonthlyPaymentRecord],
        settings: &[FeeSettingRecord],
        selected_year: i32,
        today: NaiveDate,
        advisories: &mut AdvisoryLog,
    ) -> Vec<ProjectedMonthRow> {
        let student = match record.normalize(advisories) {
            Ok(student) => student,
            Err(e) => {
                advisories.data_error("projection", format!("cannot project student: {}", e));
                return Vec::new();
            }
        };
        let payments = wire::normalize_payments(payments, advisories);
        let settings = wire::normalize_fee_settings(settings, advisories);

        self.project_recorded(&student, &payments, &settings, selected_year, today, advisories)
    }
}

/// project with the default configuration
pub fn project(
    student: &Student,
    payments: &[MonthlyPayment],
    settings: &[MonthlyFeeSetting],
    selected_year: i32,
    today: NaiveDate,
) -> Vec<ProjectedMonthRow> {
    MonthlyStatusProjector::default().project(student, payments, settings, selected_year, today)
}
