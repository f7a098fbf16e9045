use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::io;

use crate::core::{
    InvestmentParameters, MAX_AGE, PENSION_ACCESS_AGE, SkipReason, WithdrawalMode,
    format_currency,
};
use crate::screen::{GrowthView, PLACEHOLDER_PROMPT, WithdrawalPanel, WithdrawalView};

mod interactive;

pub use interactive::run_interactive;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliWithdrawalMode {
    Percentage,
    FixedAmount,
}

impl From<CliWithdrawalMode> for WithdrawalMode {
    fn from(value: CliWithdrawalMode) -> Self {
        match value {
            CliWithdrawalMode::Percentage => WithdrawalMode::Percentage,
            CliWithdrawalMode::FixedAmount => WithdrawalMode::FixedAmount,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "early_retire",
    about = "Projects investment growth to retirement and withdrawals until pension access at 55"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log level used when RUST_LOG is not set"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project once from flags and print the result.
    Project(ProjectArgs),
    /// Read `field=value` edits from stdin and reprint the projection after each one.
    Interactive,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long)]
    current_age: f64,
    #[arg(long)]
    retirement_age: f64,
    #[arg(long, default_value_t = 0.0)]
    current_investment: f64,
    #[arg(long, default_value_t = 0.0, help = "Contribution added once per year")]
    yearly_investment: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 7")]
    expected_return: f64,
    #[arg(long, value_enum, default_value_t = CliWithdrawalMode::Percentage)]
    withdrawal_mode: CliWithdrawalMode,
    #[arg(
        long,
        help = "Share of the balance withdrawn each year in percent, used with --withdrawal-mode=percentage"
    )]
    withdrawal_rate: Option<f64>,
    #[arg(
        long,
        help = "Amount withdrawn each year, used with --withdrawal-mode=fixed-amount"
    )]
    withdrawal_amount: Option<f64>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    pension_access_age: f64,
    growth: Option<GrowthView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth_error: Option<String>,
    withdrawal: WithdrawalResponse,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
enum WithdrawalResponse {
    Projected(WithdrawalView),
    Skipped { reason: SkipReason },
    Invalid { error: String },
}

pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Project(args) => {
            let output = render_project(&args)?;
            print!("{output}");
            Ok(())
        }
        Command::Interactive => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(stdin.lock(), stdout.lock())
                .map_err(|e| format!("Interactive session failed: {e}"))
        }
    }
}

fn build_parameters(args: &ProjectArgs) -> Result<InvestmentParameters, String> {
    for (flag, age) in [
        ("--current-age", args.current_age),
        ("--retirement-age", args.retirement_age),
    ] {
        if !age.is_finite() || !(0.0..=MAX_AGE).contains(&age) {
            return Err(format!("{flag} must be between 0 and {MAX_AGE}"));
        }
    }

    if !args.current_investment.is_finite() || !args.yearly_investment.is_finite() {
        return Err("--current-investment and --yearly-investment must be finite".to_string());
    }

    if !args.expected_return.is_finite() || args.expected_return <= -100.0 {
        return Err("--expected-return must be > -100".to_string());
    }

    if let Some(rate) = args.withdrawal_rate {
        if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
            return Err("--withdrawal-rate must be between 0 and 100".to_string());
        }
    }

    if let Some(amount) = args.withdrawal_amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err("--withdrawal-amount must be >= 0".to_string());
        }
    }

    Ok(InvestmentParameters {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        current_investment: args.current_investment,
        yearly_investment: args.yearly_investment,
        expected_return: args.expected_return / 100.0,
        withdrawal_mode: args.withdrawal_mode.into(),
        withdrawal_rate: args.withdrawal_rate.map(|rate| rate / 100.0),
        withdrawal_amount: args.withdrawal_amount,
    })
}

fn build_project_response(params: &InvestmentParameters) -> ProjectResponse {
    let (growth, growth_error) = match GrowthView::build(params) {
        Ok(view) => (Some(view), None),
        Err(e) => {
            tracing::debug!(error = %e, "growth projection withheld");
            (None, Some(e.to_string()))
        }
    };
    let withdrawal = match WithdrawalView::build(params) {
        Ok(WithdrawalPanel::Shown(view)) => WithdrawalResponse::Projected(view),
        Ok(WithdrawalPanel::Skipped(reason)) => WithdrawalResponse::Skipped { reason },
        Err(e) => {
            tracing::debug!(error = %e, "withdrawal projection withheld");
            WithdrawalResponse::Invalid {
                error: e.to_string(),
            }
        }
    };
    ProjectResponse {
        pension_access_age: PENSION_ACCESS_AGE,
        growth,
        growth_error,
        withdrawal,
    }
}

/// Runs a projection for parsed command-line flags and renders it.
pub fn render_project(args: &ProjectArgs) -> Result<String, String> {
    let params = build_parameters(args)?;
    tracing::debug!(
        current_age = params.current_age,
        retirement_age = params.retirement_age,
        "projecting from flags"
    );
    let response = build_project_response(&params);
    match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("Failed to serialize projection: {e}")),
        OutputFormat::Text => Ok(render_text(&response)),
    }
}

fn render_text(response: &ProjectResponse) -> String {
    let mut out = String::new();
    match &response.growth {
        Some(view) => write_growth(&mut out, view),
        None => {
            let _ = writeln!(out, "{PLACEHOLDER_PROMPT}");
            if let Some(error) = &response.growth_error {
                let _ = writeln!(out, "  ({error})");
            }
        }
    }

    let _ = writeln!(out);
    match &response.withdrawal {
        WithdrawalResponse::Projected(view) => write_withdrawal(&mut out, view),
        WithdrawalResponse::Skipped { reason } => {
            let detail = match reason {
                SkipReason::PensionAccessReached => "retirement is at or after pension access",
                SkipReason::RetirementNotAfterCurrent => "retirement age is not after current age",
            };
            let _ = writeln!(out, "Early retirement withdrawals: not shown ({detail})");
        }
        WithdrawalResponse::Invalid { error } => {
            let _ = writeln!(out, "Early retirement withdrawals unavailable: {error}");
        }
    }
    out
}

fn write_growth(out: &mut String, view: &GrowthView) {
    let series = &view.projection.series;
    let first = series.first().map_or(0.0, |p| p.age);
    let last = series.last().map_or(first, |p| p.age);
    let _ = writeln!(out, "Growth projection (age {first} to {last})");
    let _ = writeln!(out, "  Final amount:        {}", view.summary.final_amount);
    let _ = writeln!(
        out,
        "  Total contributions: {}",
        view.summary.total_contributions
    );
    let _ = writeln!(out, "  Total growth:        {}", view.summary.total_growth);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:>5}  {:>16}", "Age", "Balance");
    for (age, balance) in view.chart.labels.iter().zip(&view.chart.values) {
        let _ = writeln!(out, "  {:>5}  {:>16}", age, format_currency(*balance));
    }
}

fn write_withdrawal(out: &mut String, view: &WithdrawalView) {
    let trajectory = &view.projection.trajectory;
    let first = trajectory.first().map_or(0.0, |p| p.age);
    let _ = writeln!(
        out,
        "Early retirement withdrawals (age {first} to {PENSION_ACCESS_AGE})"
    );
    let _ = writeln!(
        out,
        "  Annual withdrawal:   {}",
        view.figures.annual_withdrawal
    );
    let _ = writeln!(
        out,
        "  Balance at 55:       {}",
        view.figures.balance_at_fifty_five
    );
    let _ = writeln!(out, "  Total withdrawn:     {}", view.figures.total_withdrawn);
    if let Some(warning) = &view.warning {
        let _ = writeln!(out, "  WARNING: {warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_args() -> ProjectArgs {
        ProjectArgs {
            current_age: 30.0,
            retirement_age: 45.0,
            current_investment: 50_000.0,
            yearly_investment: 12_000.0,
            expected_return: 7.0,
            withdrawal_mode: CliWithdrawalMode::Percentage,
            withdrawal_rate: Some(4.0),
            withdrawal_amount: Some(40_000.0),
            format: OutputFormat::Text,
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("early_retire").chain(args.iter().copied()))
            .expect("flags should parse")
    }

    #[test]
    fn build_parameters_converts_percentages() {
        let params = build_parameters(&sample_args()).expect("valid inputs");
        assert_approx(params.expected_return, 0.07);
        assert_approx(params.withdrawal_rate.expect("rate"), 0.04);
        assert_eq!(params.withdrawal_amount, Some(40_000.0));
        assert_eq!(params.withdrawal_mode, WithdrawalMode::Percentage);
    }

    #[test]
    fn build_parameters_rejects_out_of_range_age() {
        let mut args = sample_args();
        args.retirement_age = 1_000.0;
        let err = build_parameters(&args).expect_err("must reject huge age");
        assert!(err.contains("--retirement-age"));

        let mut args = sample_args();
        args.current_age = -5.0;
        let err = build_parameters(&args).expect_err("must reject negative age");
        assert!(err.contains("--current-age"));
    }

    #[test]
    fn build_parameters_rejects_total_loss_return() {
        let mut args = sample_args();
        args.expected_return = -100.0;
        let err = build_parameters(&args).expect_err("must reject -100% return");
        assert!(err.contains("--expected-return"));
    }

    #[test]
    fn build_parameters_rejects_invalid_withdrawal_rate() {
        let mut args = sample_args();
        args.withdrawal_rate = Some(120.0);
        let err = build_parameters(&args).expect_err("must reject rate above 100");
        assert!(err.contains("--withdrawal-rate"));
    }

    #[test]
    fn ordering_is_reported_by_projection_not_flags() {
        let mut args = sample_args();
        args.retirement_age = 25.0;
        let params = build_parameters(&args).expect("ordering is not a flag error");
        let response = build_project_response(&params);
        assert!(response.growth.is_none());
        assert!(response.growth_error.is_some());
        assert!(matches!(
            response.withdrawal,
            WithdrawalResponse::Skipped {
                reason: SkipReason::RetirementNotAfterCurrent
            }
        ));

        let out = render_text(&response);
        assert!(out.starts_with(PLACEHOLDER_PROMPT));
    }

    #[test]
    fn cli_parses_project_flags() {
        let cli = parse(&[
            "project",
            "--current-age",
            "35",
            "--retirement-age",
            "50",
            "--expected-return",
            "6.5",
            "--withdrawal-mode",
            "fixed-amount",
            "--withdrawal-amount",
            "30000",
        ]);
        assert_eq!(cli.log_level, "warn");
        let Command::Project(args) = cli.command else {
            panic!("expected project subcommand");
        };
        let params = build_parameters(&args).expect("valid inputs");
        assert_approx(params.current_investment, 0.0);
        assert_approx(params.expected_return, 0.065);
        assert_eq!(params.withdrawal_mode, WithdrawalMode::FixedAmount);
        assert_eq!(params.withdrawal_rate, None);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn cli_parses_interactive_with_global_log_level() {
        let cli = parse(&["interactive", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(cli.command, Command::Interactive));
    }

    #[test]
    fn text_output_shows_summary_and_warning() {
        let mut args = sample_args();
        args.retirement_age = 40.0;
        args.current_investment = 10_000.0;
        args.yearly_investment = 0.0;
        args.expected_return = 0.0;
        args.withdrawal_mode = CliWithdrawalMode::FixedAmount;
        args.withdrawal_amount = Some(11_000.0);

        let out = render_project(&args).expect("renders");
        assert!(out.contains("Growth projection (age 30 to 40)"));
        assert!(out.contains("Final amount:        $10,000"));
        assert!(out.contains("Early retirement withdrawals (age 40 to 55)"));
        assert!(out.contains("Balance at 55:       $0"));
        assert!(out.contains("WARNING:"));
    }

    #[test]
    fn text_output_reports_skipped_window() {
        let mut args = sample_args();
        args.retirement_age = 60.0;
        let out = render_project(&args).expect("renders");
        assert!(out.contains("Growth projection (age 30 to 60)"));
        assert!(out.contains("not shown (retirement is at or after pension access)"));
    }

    #[test]
    fn text_output_reports_missing_mode_field() {
        let mut args = sample_args();
        args.withdrawal_rate = None;
        let out = render_project(&args).expect("renders");
        assert!(out.contains("Early retirement withdrawals unavailable: withdrawalRate is required"));
    }

    #[test]
    fn json_output_contains_expected_fields() {
        let mut args = sample_args();
        args.format = OutputFormat::Json;
        let out = render_project(&args).expect("renders");
        let value: Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["pensionAccessAge"], json!(55.0));
        assert!(value["growth"]["projection"]["series"].is_array());
        assert!(value["growth"]["chart"]["labels"].is_array());
        assert!(value["growth"]["summary"]["finalAmount"].is_string());
        assert!(value.get("growthError").is_none());
        assert_eq!(value["withdrawal"]["status"], json!("projected"));
        assert_eq!(value["withdrawal"]["projection"]["mode"], json!("percentage"));
        assert!(value["withdrawal"]["figures"]["balanceAtFiftyFive"].is_string());
    }

    #[test]
    fn json_output_reports_skip_reason() {
        let mut args = sample_args();
        args.retirement_age = 58.0;
        args.format = OutputFormat::Json;
        let out = render_project(&args).expect("renders");
        let value: Value = serde_json::from_str(&out).expect("valid JSON");
        assert!(value["growth"].is_object());
        assert_eq!(value["withdrawal"]["status"], json!("skipped"));
        assert_eq!(value["withdrawal"]["reason"], json!("pension-access-reached"));
    }

    #[test]
    fn json_output_matches_single_year_example() {
        let mut args = sample_args();
        args.retirement_age = 31.0;
        args.current_investment = 1_000.0;
        args.yearly_investment = 0.0;
        args.expected_return = 10.0;
        args.format = OutputFormat::Json;

        let out = render_project(&args).expect("renders");
        let value: Value = serde_json::from_str(&out).expect("valid JSON");
        let final_amount = value["growth"]["projection"]["finalAmount"]
            .as_f64()
            .expect("number");
        assert_approx(final_amount, 1_100.0);
        assert_eq!(value["growth"]["summary"]["finalAmount"], json!("$1,100"));
        assert_eq!(
            value["growth"]["projection"]["series"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }
}
