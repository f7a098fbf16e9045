use super::error::ProjectionError;
use super::types::{GrowthProjection, InvestmentParameters, YearBalance};
use super::validation::validate_inputs;

/// Projects the balance year by year from current age to retirement age.
///
/// Year 0 records the starting balance as-is. Every later year applies growth
/// first and then the yearly contribution, so a contribution never earns
/// return in the year it is paid in.
pub fn project_growth(params: &InvestmentParameters) -> Result<GrowthProjection, ProjectionError> {
    validate_accumulation(params)?;

    let span = params.retirement_age - params.current_age;
    let years = whole_years(span);

    let mut series = Vec::with_capacity(years as usize + 1);
    let mut balance = params.current_investment;
    series.push(YearBalance {
        age: params.current_age,
        balance,
    });
    for year in 1..=years {
        balance = compound(balance, params.expected_return, params.yearly_investment);
        series.push(YearBalance {
            age: params.current_age + year as f64,
            balance,
        });
    }

    let final_amount = balance;
    let total_contributions = params.current_investment + params.yearly_investment * span;
    Ok(GrowthProjection {
        series,
        final_amount,
        total_contributions,
        total_growth: final_amount - total_contributions,
    })
}

/// Balance at retirement, applying the recurrence for years `1..=span`.
pub(crate) fn accumulate(params: &InvestmentParameters) -> f64 {
    let years = whole_years(params.retirement_age - params.current_age);
    (1..=years).fold(params.current_investment, |balance, _| {
        compound(balance, params.expected_return, params.yearly_investment)
    })
}

pub(crate) fn compound(balance: f64, rate: f64, contribution: f64) -> f64 {
    balance * (1.0 + rate) + contribution
}

/// Number of whole years `y >= 1` with `y <= span`.
pub(crate) fn whole_years(span: f64) -> u32 {
    if span <= 0.0 { 0 } else { span.floor() as u32 }
}

pub(crate) fn validate_accumulation(params: &InvestmentParameters) -> Result<(), ProjectionError> {
    validate_inputs(params)?;
    if params.retirement_age <= params.current_age {
        return Err(ProjectionError::RetirementNotAfterCurrent {
            current_age: params.current_age,
            retirement_age: params.retirement_age,
        });
    }
    Ok(())
}
