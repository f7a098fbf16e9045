//! Line-driven stand-in for the projection form.
//!
//! Each `field=value` line is one input event: the form snapshot is updated
//! and the whole screen is recomputed and printed again.

use std::io::{self, BufRead, Write};

use super::{write_growth, write_withdrawal};
use crate::core::{Field, WithdrawalMode};
use crate::screen::{PLACEHOLDER_PROMPT, ProjectionForm, ProjectionScreen, ScreenState};

#[derive(Debug, Clone, PartialEq)]
enum Edit {
    Set(Field, String),
    Mode(WithdrawalMode),
    Quit,
}

pub fn run_interactive<R: BufRead, W: Write>(input: R, mut out: W) -> io::Result<()> {
    let mut screen = ProjectionScreen::new(ProjectionForm::default());
    writeln!(
        out,
        "Enter edits as field=value (e.g. currentAge=30, expectedReturn=7, mode=fixed-amount). \
         Type quit to exit."
    )?;
    out.write_all(render_state(screen.state()).as_bytes())?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let state = match parse_edit(trimmed) {
            Ok(Edit::Quit) => break,
            Ok(Edit::Set(field, text)) => screen.on_input(field, text),
            Ok(Edit::Mode(mode)) => screen.set_withdrawal_mode(mode),
            Err(msg) => {
                writeln!(out, "! {msg}")?;
                continue;
            }
        };
        writeln!(out)?;
        out.write_all(render_state(state).as_bytes())?;
    }

    tracing::debug!(evaluations = screen.evaluations(), "interactive session ended");
    out.flush()
}

fn parse_edit(line: &str) -> Result<Edit, String> {
    if matches!(line, "quit" | "exit" | "q") {
        return Ok(Edit::Quit);
    }

    let Some((key, value)) = line.split_once('=') else {
        return Err(format!("expected field=value, got {line:?}"));
    };
    let key = key.trim();
    let value = value.trim();

    if matches!(key, "mode" | "withdrawalMode" | "withdrawal-mode") {
        return match value {
            "percentage" | "percent" => Ok(Edit::Mode(WithdrawalMode::Percentage)),
            "fixed-amount" | "fixedAmount" | "fixed" => Ok(Edit::Mode(WithdrawalMode::FixedAmount)),
            other => Err(format!(
                "unknown withdrawal mode {other:?}, use percentage or fixed-amount"
            )),
        };
    }

    field_from_key(key)
        .map(|field| Edit::Set(field, value.to_string()))
        .ok_or_else(|| format!("unknown field {key:?}"))
}

fn field_from_key(key: &str) -> Option<Field> {
    let field = match key {
        "current-age" => Field::CurrentAge,
        "retirement-age" => Field::RetirementAge,
        "current-investment" => Field::CurrentInvestment,
        "yearly-investment" => Field::YearlyInvestment,
        "expected-return" => Field::ExpectedReturn,
        "withdrawal-rate" => Field::WithdrawalRate,
        "withdrawal-amount" => Field::WithdrawalAmount,
        other => return Field::ALL.into_iter().find(|field| field.key() == other),
    };
    Some(field)
}

fn render_state(state: &ScreenState) -> String {
    let mut out = String::new();
    if state.needs_prompt() {
        out.push_str(PLACEHOLDER_PROMPT);
        out.push('\n');
    }
    if let Some(view) = &state.growth {
        write_growth(&mut out, view);
    }
    if let Some(view) = &state.withdrawal {
        out.push('\n');
        write_withdrawal(&mut out, view);
    }
    out
}
