use serde::Serialize;

/// Age at which pension savings become accessible. Withdrawals are only
/// simulated for the window between retirement and this age.
pub const PENSION_ACCESS_AGE: f64 = 55.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WithdrawalMode {
    Percentage,
    FixedAmount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentParameters {
    pub current_age: f64,
    pub retirement_age: f64,
    pub current_investment: f64,
    pub yearly_investment: f64,
    pub expected_return: f64,
    pub withdrawal_mode: WithdrawalMode,
    /// Fractional rate, only read in percentage mode.
    pub withdrawal_rate: Option<f64>,
    /// Currency amount, only read in fixed-amount mode.
    pub withdrawal_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBalance {
    pub age: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub series: Vec<YearBalance>,
    pub final_amount: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalProjection {
    pub mode: WithdrawalMode,
    pub balance_at_retirement: f64,
    /// First-year withdrawal. In percentage mode later years withdraw a
    /// fresh share of a different balance, so this is representative only.
    pub annual_withdrawal: f64,
    pub balance_at_fifty_five: f64,
    /// `annual_withdrawal` times the length of the withdrawal window.
    pub total_withdrawn: f64,
    /// Sum of the amounts actually taken out during the simulation.
    pub simulated_withdrawn: f64,
    pub trajectory: Vec<YearBalance>,
    pub depleted: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Retirement at or after pension access leaves no early window.
    PensionAccessReached,
    RetirementNotAfterCurrent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawalOutcome {
    Projected(WithdrawalProjection),
    Skipped(SkipReason),
}
