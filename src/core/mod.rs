mod chart;
mod error;
mod format;
mod growth;
mod types;
mod validation;
mod withdrawal;

pub use chart::{ChartSeries, MAX_CHART_POINTS, decimate};
pub use error::{Field, ProjectionError};
pub use format::format_currency;
pub use growth::project_growth;
pub use types::{
    GrowthProjection, InvestmentParameters, PENSION_ACCESS_AGE, SkipReason, WithdrawalMode,
    WithdrawalOutcome, WithdrawalProjection, YearBalance,
};
pub use validation::MAX_AGE;
pub use withdrawal::project_withdrawal;
