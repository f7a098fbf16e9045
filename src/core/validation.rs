use super::error::{Field, ProjectionError};
use super::types::InvestmentParameters;

/// Oldest age either age field accepts.
pub const MAX_AGE: f64 = 150.0;

/// Checks the five fields both projections read: all finite, ages within
/// `0..=MAX_AGE`, and a return above -100%.
pub(crate) fn validate_inputs(params: &InvestmentParameters) -> Result<(), ProjectionError> {
    for (field, value) in [
        (Field::CurrentAge, params.current_age),
        (Field::RetirementAge, params.retirement_age),
        (Field::CurrentInvestment, params.current_investment),
        (Field::YearlyInvestment, params.yearly_investment),
        (Field::ExpectedReturn, params.expected_return),
    ] {
        if !value.is_finite() {
            return Err(ProjectionError::NonFinite { field });
        }
    }

    for (field, age) in [
        (Field::CurrentAge, params.current_age),
        (Field::RetirementAge, params.retirement_age),
    ] {
        if !(0.0..=MAX_AGE).contains(&age) {
            return Err(ProjectionError::OutOfRange { field });
        }
    }

    if params.expected_return <= -1.0 {
        return Err(ProjectionError::OutOfRange {
            field: Field::ExpectedReturn,
        });
    }
    Ok(())
}

/// Fractional withdrawal rate, `0..=1`.
pub(crate) fn validate_rate(rate: f64) -> Result<f64, ProjectionError> {
    finite_within(Field::WithdrawalRate, rate, 0.0..=1.0)
}

pub(crate) fn validate_amount(amount: f64) -> Result<f64, ProjectionError> {
    finite_within(Field::WithdrawalAmount, amount, 0.0..=f64::MAX)
}

fn finite_within(
    field: Field,
    value: f64,
    range: std::ops::RangeInclusive<f64>,
) -> Result<f64, ProjectionError> {
    if !value.is_finite() {
        return Err(ProjectionError::NonFinite { field });
    }
    if !range.contains(&value) {
        return Err(ProjectionError::OutOfRange { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::WithdrawalMode;

    fn params(current_age: f64, retirement_age: f64, expected_return: f64) -> InvestmentParameters {
        InvestmentParameters {
            current_age,
            retirement_age,
            current_investment: 1_000.0,
            yearly_investment: 0.0,
            expected_return,
            withdrawal_mode: WithdrawalMode::Percentage,
            withdrawal_rate: None,
            withdrawal_amount: None,
        }
    }

    #[test]
    fn accepts_ages_at_the_bounds() {
        assert_eq!(validate_inputs(&params(0.0, MAX_AGE, 0.05)), Ok(()));
    }

    #[test]
    fn rejects_ages_outside_bounds() {
        assert_eq!(
            validate_inputs(&params(30.0, 1e10, 0.05)),
            Err(ProjectionError::OutOfRange {
                field: Field::RetirementAge
            })
        );
        assert_eq!(
            validate_inputs(&params(-1e10, 40.0, 0.05)),
            Err(ProjectionError::OutOfRange {
                field: Field::CurrentAge
            })
        );
    }

    #[test]
    fn rejects_total_loss_return() {
        assert_eq!(
            validate_inputs(&params(30.0, 40.0, -1.0)),
            Err(ProjectionError::OutOfRange {
                field: Field::ExpectedReturn
            })
        );
        assert_eq!(validate_inputs(&params(30.0, 40.0, -0.99)), Ok(()));
    }

    #[test]
    fn non_finite_wins_over_range() {
        assert_eq!(
            validate_inputs(&params(30.0, f64::INFINITY, 0.05)),
            Err(ProjectionError::NonFinite {
                field: Field::RetirementAge
            })
        );
    }

    #[test]
    fn withdrawal_fields_are_bounded() {
        assert_eq!(validate_rate(1.0), Ok(1.0));
        assert_eq!(
            validate_rate(1.5),
            Err(ProjectionError::OutOfRange {
                field: Field::WithdrawalRate
            })
        );
        assert_eq!(
            validate_rate(-0.01),
            Err(ProjectionError::OutOfRange {
                field: Field::WithdrawalRate
            })
        );
        assert_eq!(
            validate_amount(-5.0),
            Err(ProjectionError::OutOfRange {
                field: Field::WithdrawalAmount
            })
        );
        assert_eq!(
            validate_amount(f64::NAN),
            Err(ProjectionError::NonFinite {
                field: Field::WithdrawalAmount
            })
        );
    }
}
