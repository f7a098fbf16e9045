use super::error::{Field, ProjectionError};
use super::growth::accumulate;
use super::types::{
    InvestmentParameters, PENSION_ACCESS_AGE, SkipReason, WithdrawalMode, WithdrawalOutcome,
    WithdrawalProjection, YearBalance,
};
use super::validation::{validate_amount, validate_inputs, validate_rate};

/// Simulates drawing the portfolio down between retirement and pension access.
///
/// Parameters that cannot be evaluated at all are an error. Parameters that
/// leave no early-retirement window produce `WithdrawalOutcome::Skipped`, and
/// the mode-specific field is only checked once a window exists.
pub fn project_withdrawal(
    params: &InvestmentParameters,
) -> Result<WithdrawalOutcome, ProjectionError> {
    validate_inputs(params)?;

    if params.retirement_age >= PENSION_ACCESS_AGE {
        return Ok(WithdrawalOutcome::Skipped(SkipReason::PensionAccessReached));
    }
    if params.current_age >= params.retirement_age {
        return Ok(WithdrawalOutcome::Skipped(
            SkipReason::RetirementNotAfterCurrent,
        ));
    }

    let policy = match params.withdrawal_mode {
        WithdrawalMode::Percentage => {
            let rate = required(params.withdrawal_rate, Field::WithdrawalRate)?;
            Policy::Percentage(validate_rate(rate)?)
        }
        WithdrawalMode::FixedAmount => {
            let amount = required(params.withdrawal_amount, Field::WithdrawalAmount)?;
            Policy::Fixed(validate_amount(amount)?)
        }
    };

    let balance_at_retirement = accumulate(params);
    Ok(WithdrawalOutcome::Projected(decumulate(
        params,
        balance_at_retirement,
        policy,
    )))
}

#[derive(Debug, Clone, Copy)]
enum Policy {
    Percentage(f64),
    Fixed(f64),
}

fn required(value: Option<f64>, field: Field) -> Result<f64, ProjectionError> {
    value.ok_or(ProjectionError::MissingField(field))
}

fn decumulate(
    params: &InvestmentParameters,
    balance_at_retirement: f64,
    policy: Policy,
) -> WithdrawalProjection {
    let withdrawal_years = PENSION_ACCESS_AGE - params.retirement_age;
    let iterations = withdrawal_years.ceil() as u32;
    let growth = 1.0 + params.expected_return;

    let annual_withdrawal = match policy {
        Policy::Percentage(rate) => balance_at_retirement * rate,
        Policy::Fixed(amount) => amount,
    };

    let mut trajectory = Vec::with_capacity(iterations as usize + 1);
    trajectory.push(YearBalance {
        age: params.retirement_age,
        balance: balance_at_retirement,
    });

    let mut balance = balance_at_retirement;
    let mut simulated_withdrawn = 0.0;
    for i in 0..iterations {
        balance *= growth;
        match policy {
            Policy::Percentage(rate) => {
                let withdrawn = balance * rate;
                balance -= withdrawn;
                simulated_withdrawn += withdrawn;
            }
            Policy::Fixed(amount) => {
                let grown = balance;
                balance -= amount;
                if balance < 0.0 {
                    balance = 0.0;
                }
                simulated_withdrawn += (grown - balance).max(0.0);
            }
        }
        trajectory.push(YearBalance {
            age: trajectory_age(params.retirement_age, i + 1),
            balance,
        });

        if balance <= 0.0 && matches!(policy, Policy::Fixed(_)) {
            push_zero_tail(&mut trajectory, params.retirement_age, i + 1, iterations);
            break;
        }
    }

    let balance_at_fifty_five = balance.max(0.0);
    WithdrawalProjection {
        mode: params.withdrawal_mode,
        balance_at_retirement,
        annual_withdrawal,
        balance_at_fifty_five,
        total_withdrawn: annual_withdrawal * withdrawal_years,
        simulated_withdrawn,
        trajectory,
        depleted: balance_at_fifty_five <= 0.0,
    }
}

fn trajectory_age(retirement_age: f64, step: u32) -> f64 {
    (retirement_age + step as f64).min(PENSION_ACCESS_AGE)
}

fn push_zero_tail(trajectory: &mut Vec<YearBalance>, retirement_age: f64, done: u32, total: u32) {
    for step in done + 1..=total {
        trajectory.push(YearBalance {
            age: trajectory_age(retirement_age, step),
            balance: 0.0,
        });
    }
}
