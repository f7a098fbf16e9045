use crate::core::{Field, InvestmentParameters, ProjectionError, WithdrawalMode};

/// Raw text as typed into the projection form.
///
/// Rates are entered in percent, so `"7"` for the expected return becomes
/// `0.07` in [`InvestmentParameters`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionForm {
    pub current_age: String,
    pub retirement_age: String,
    pub current_investment: String,
    pub yearly_investment: String,
    pub expected_return: String,
    pub withdrawal_rate: String,
    pub withdrawal_amount: String,
    pub withdrawal_mode: WithdrawalMode,
}

impl Default for ProjectionForm {
    fn default() -> Self {
        Self {
            current_age: String::new(),
            retirement_age: String::new(),
            current_investment: String::new(),
            yearly_investment: String::new(),
            expected_return: String::new(),
            withdrawal_rate: String::new(),
            withdrawal_amount: String::new(),
            withdrawal_mode: WithdrawalMode::Percentage,
        }
    }
}

impl ProjectionForm {
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::CurrentAge => &self.current_age,
            Field::RetirementAge => &self.retirement_age,
            Field::CurrentInvestment => &self.current_investment,
            Field::YearlyInvestment => &self.yearly_investment,
            Field::ExpectedReturn => &self.expected_return,
            Field::WithdrawalRate => &self.withdrawal_rate,
            Field::WithdrawalAmount => &self.withdrawal_amount,
        }
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::CurrentAge => &mut self.current_age,
            Field::RetirementAge => &mut self.retirement_age,
            Field::CurrentInvestment => &mut self.current_investment,
            Field::YearlyInvestment => &mut self.yearly_investment,
            Field::ExpectedReturn => &mut self.expected_return,
            Field::WithdrawalRate => &mut self.withdrawal_rate,
            Field::WithdrawalAmount => &mut self.withdrawal_amount,
        };
        *slot = text.into();
    }

    /// Parses the form into parameters.
    ///
    /// The two withdrawal fields are optional here: an unparsable value is
    /// left as `None` and only matters if the selected mode needs it.
    pub fn to_parameters(&self) -> Result<InvestmentParameters, ProjectionError> {
        Ok(InvestmentParameters {
            current_age: self.number(Field::CurrentAge)?,
            retirement_age: self.number(Field::RetirementAge)?,
            current_investment: self.number(Field::CurrentInvestment)?,
            yearly_investment: self.number(Field::YearlyInvestment)?,
            expected_return: self.number(Field::ExpectedReturn)? / 100.0,
            withdrawal_mode: self.withdrawal_mode,
            withdrawal_rate: self.number(Field::WithdrawalRate).ok().map(|v| v / 100.0),
            withdrawal_amount: self.number(Field::WithdrawalAmount).ok(),
        })
    }

    fn number(&self, field: Field) -> Result<f64, ProjectionError> {
        parse_number(field, self.text(field))
    }
}

/// Standard decimal parsing of a trimmed field; blank text counts as missing.
pub fn parse_number(field: Field, text: &str) -> Result<f64, ProjectionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProjectionError::MissingField(field));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ProjectionError::Unparsable {
            field,
            text: text.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ProjectionError::NonFinite { field });
    }
    Ok(value)
}
