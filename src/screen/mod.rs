//! Screen-level state derived from the projection form.
//!
//! Every input event recomputes the whole state from the current form
//! snapshot. A projection that cannot be produced is simply absent.

mod form;

pub use form::{ProjectionForm, parse_number};

use serde::Serialize;

use crate::core::{
    ChartSeries, Field, GrowthProjection, InvestmentParameters, ProjectionError, SkipReason,
    WithdrawalMode, WithdrawalOutcome, WithdrawalProjection, format_currency, project_growth,
    project_withdrawal,
};

pub const PLACEHOLDER_PROMPT: &str =
    "Enter your ages, savings and expected return to see your projection.";

pub const SOLVENCY_WARNING: &str =
    "Your savings run out before age 55. Lower the withdrawal or retire later.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSummary {
    pub final_amount: String,
    pub total_contributions: String,
    pub total_growth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthView {
    pub projection: GrowthProjection,
    pub chart: ChartSeries,
    pub summary: GrowthSummary,
}

impl GrowthView {
    pub fn build(params: &InvestmentParameters) -> Result<Self, ProjectionError> {
        let projection = project_growth(params)?;
        let summary = GrowthSummary {
            final_amount: format_currency(projection.final_amount),
            total_contributions: format_currency(projection.total_contributions),
            total_growth: format_currency(projection.total_growth),
        };
        Ok(Self {
            chart: ChartSeries::from_projection(&projection),
            projection,
            summary,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalFigures {
    pub annual_withdrawal: String,
    pub balance_at_fifty_five: String,
    pub total_withdrawn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalView {
    pub projection: WithdrawalProjection,
    pub figures: WithdrawalFigures,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawalPanel {
    Shown(WithdrawalView),
    Skipped(SkipReason),
}

impl WithdrawalView {
    pub fn build(params: &InvestmentParameters) -> Result<WithdrawalPanel, ProjectionError> {
        let projection = match project_withdrawal(params)? {
            WithdrawalOutcome::Projected(projection) => projection,
            WithdrawalOutcome::Skipped(reason) => return Ok(WithdrawalPanel::Skipped(reason)),
        };
        let figures = WithdrawalFigures {
            annual_withdrawal: format_currency(projection.annual_withdrawal),
            balance_at_fifty_five: format_currency(projection.balance_at_fifty_five),
            total_withdrawn: format_currency(projection.total_withdrawn),
        };
        let warning = projection.depleted.then(|| SOLVENCY_WARNING.to_string());
        Ok(WithdrawalPanel::Shown(Self {
            projection,
            figures,
            warning,
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenState {
    pub growth: Option<GrowthView>,
    pub withdrawal: Option<WithdrawalView>,
}

impl ScreenState {
    pub fn evaluate(params: &InvestmentParameters) -> Self {
        let growth = GrowthView::build(params)
            .inspect_err(|e| tracing::debug!(error = %e, "growth projection withheld"))
            .ok();
        let withdrawal = match WithdrawalView::build(params) {
            Ok(WithdrawalPanel::Shown(view)) => Some(view),
            Ok(WithdrawalPanel::Skipped(reason)) => {
                tracing::debug!(?reason, "withdrawal projection skipped");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "withdrawal projection withheld");
                None
            }
        };
        Self { growth, withdrawal }
    }

    /// True when the consumer should show [`PLACEHOLDER_PROMPT`].
    pub fn needs_prompt(&self) -> bool {
        self.growth.is_none()
    }
}

/// Form snapshot plus the state derived from it, recomputed on every edit.
#[derive(Debug, Clone)]
pub struct ProjectionScreen {
    form: ProjectionForm,
    last_params: Option<InvestmentParameters>,
    state: ScreenState,
    evaluations: u64,
}

impl ProjectionScreen {
    pub fn new(form: ProjectionForm) -> Self {
        let mut screen = Self {
            form,
            last_params: None,
            state: ScreenState::default(),
            evaluations: 0,
        };
        screen.recompute();
        screen
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Number of times the projections actually ran.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn on_input(&mut self, field: Field, text: impl Into<String>) -> &ScreenState {
        self.form.set(field, text);
        self.recompute();
        &self.state
    }

    pub fn set_withdrawal_mode(&mut self, mode: WithdrawalMode) -> &ScreenState {
        self.form.withdrawal_mode = mode;
        self.recompute();
        &self.state
    }

    fn recompute(&mut self) {
        let params = match self.form.to_parameters() {
            Ok(params) => params,
            Err(e) => {
                tracing::debug!(error = %e, "form incomplete");
                self.last_params = None;
                self.state = ScreenState::default();
                return;
            }
        };
        if self.last_params.as_ref() == Some(&params) {
            return;
        }

        self.evaluations += 1;
        tracing::debug!(
            current_age = params.current_age,
            retirement_age = params.retirement_age,
            evaluations = self.evaluations,
            "recomputing projections"
        );
        self.state = ScreenState::evaluate(&params);
        self.last_params = Some(params);
    }
}
