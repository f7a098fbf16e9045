use std::fmt;

/// Form fields that feed a projection.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    CurrentAge,
    RetirementAge,
    CurrentInvestment,
    YearlyInvestment,
    ExpectedReturn,
    WithdrawalRate,
    WithdrawalAmount,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::CurrentAge,
        Field::RetirementAge,
        Field::CurrentInvestment,
        Field::YearlyInvestment,
        Field::ExpectedReturn,
        Field::WithdrawalRate,
        Field::WithdrawalAmount,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::CurrentAge => "currentAge",
            Field::RetirementAge => "retirementAge",
            Field::CurrentInvestment => "currentInvestment",
            Field::YearlyInvestment => "yearlyInvestment",
            Field::ExpectedReturn => "expectedReturn",
            Field::WithdrawalRate => "withdrawalRate",
            Field::WithdrawalAmount => "withdrawalAmount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Reasons a projection is withheld.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    #[error("{field} is not a number: {text:?}")]
    Unparsable { field: Field, text: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: Field },

    #[error("{field} is out of range")]
    OutOfRange { field: Field },

    #[error("{0} is required")]
    MissingField(Field),

    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    RetirementNotAfterCurrent { current_age: f64, retirement_age: f64 },
}
