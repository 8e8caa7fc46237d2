pub mod advisories;
pub mod charges;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod filters;
pub mod ledger;
pub mod projection;
pub mod reports;
pub mod schedule;
pub mod types;
pub mod wire;

// re-export key types
pub use advisories::{Advisory, AdvisoryLog};
pub use charges::{Charge, StudentChargeCalculator};
pub use config::{ExclusionCap, ProjectionConfig};
pub use decimal::Money;
pub use errors::{LedgerError, Result};
pub use filters::{AmountRange, DateRange, StudentFilter, TransactionFilter};
pub use ledger::{LedgerReport, ReportPeriod, Transaction};
pub use projection::{project, MonthWindow, MonthlyStatusProjector, ProjectedMonthRow};
pub use reports::{ProjectionTotals, StatusSummary};
pub use schedule::{resolve, FeeSchedule, MonthlyFeeSetting};
pub use types::{
    MonthStatus, MonthlyPayment, RowAction, Student, StudentId, StudentListing, StudentStatus, YearMonth,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
