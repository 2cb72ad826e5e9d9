//! Retirement Planner CLI
//!
//! Command-line interface for retirement projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use retirement_planner::format::format_currency_with_symbol;
use retirement_planner::input::load_input;
use retirement_planner::projection::{write_day_steps_csv, write_projections_csv, StepRecorder};
use retirement_planner::region::PensionStrategy;
use retirement_planner::{
    get_regional_config, CoffeeVsInvestmentComparison, Region, RetirementCalculator,
    RetirementInput, SimpleRetirementResult,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "retirement_planner", version, about = "Day-by-day retirement projection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the earliest retirement date for an input file
    Calculate {
        /// JSON input file
        input: PathBuf,

        /// Simulation start date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Write the yearly projection table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write a day-by-day trace of the chosen retirement offset to this CSV file
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Print the result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Compare spending the daily expense with investing it
    Compare {
        input: PathBuf,

        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Print the default input and constants for a region (all regions when omitted)
    Defaults {
        region: Option<Region>,

        /// Date of birth for the default input
        #[arg(long, default_value = "1990-01-01")]
        dob: NaiveDate,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate { input, today, csv, trace, json } => {
            run_calculate(&input, today, csv.as_deref(), trace.as_deref(), json)
        }
        Command::Compare { input, today, json } => run_compare(&input, today, json),
        Command::Defaults { region, dob } => {
            let regions = match region {
                Some(region) => vec![region],
                None => Region::ALL.to_vec(),
            };
            for region in regions {
                let defaults = RetirementInput::regional_default(region, dob);
                println!("{}", serde_json::to_string_pretty(&get_regional_config(region))?);
                println!("{}", serde_json::to_string_pretty(&defaults)?);
            }
            Ok(())
        }
    }
}

fn calculator_for(today: Option<NaiveDate>) -> RetirementCalculator {
    today.map_or_else(RetirementCalculator::new, RetirementCalculator::with_today)
}

fn load_valid_input(path: &Path) -> Result<RetirementInput> {
    let input = load_input(path).with_context(|| format!("reading {}", path.display()))?;
    input.validate()?;
    Ok(input)
}

fn run_calculate(
    path: &Path,
    today: Option<NaiveDate>,
    csv_path: Option<&Path>,
    trace_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = load_valid_input(path)?;
    let calculator = calculator_for(today);
    let result = calculator.calculate(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if let Some(csv_path) = csv_path {
        let file = File::create(csv_path)
            .with_context(|| format!("creating {}", csv_path.display()))?;
        write_projections_csv(&result.projections, BufWriter::new(file))?;
        eprintln!("Projection table written to: {}", csv_path.display());
    }

    if let Some(trace_path) = trace_path {
        let simulator = calculator.simulator(&input);
        let offset = result
            .retirement_date
            .map(|date| retirement_planner::calendar::days_between(calculator.today(), date) as u32)
            .unwrap_or(simulator.window().total_days);

        let mut recorder = StepRecorder::new();
        simulator.simulate_observed(offset, &mut recorder);

        let file = File::create(trace_path)
            .with_context(|| format!("creating {}", trace_path.display()))?;
        write_day_steps_csv(&recorder.steps, BufWriter::new(file))?;
        eprintln!(
            "Daily trace ({} days) written to: {}",
            recorder.steps.len(),
            trace_path.display()
        );
    }

    Ok(())
}

fn run_compare(path: &Path, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let input = load_valid_input(path)?;
    let calculator = calculator_for(today);

    match calculator.compare(&input) {
        Some(comparison) if json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        Some(comparison) => print_comparison(&comparison),
        None => println!("No daily expense configured; nothing to compare."),
    }
    Ok(())
}

fn print_result(result: &SimpleRetirementResult) {
    let config = get_regional_config(result.input.region);
    let money = |amount: f64| format_currency_with_symbol(amount, config.currency_symbol);

    println!("Retirement Projection ({})", config.region);
    println!("======================\n");

    match (result.can_retire_at, result.retirement_date) {
        (Some(age), Some(date)) => {
            println!("  Retire at age {} on {}", age, date);
            println!("  Savings at retirement: {}", money(result.total_savings_at_retirement));
            println!("  Years of retirement: {}", result.years_of_retirement);
        }
        _ => {
            println!("  WARNING: the income goal is not reachable even without retiring.");
        }
    }
    if let Some(run_out) = result.run_out_date {
        println!("  Savings run out on: {}", run_out);
    }

    let input = &result.input;
    let rule = input.region.pension_strategy();
    let pension = rule.annual_amount(input.state_pension_annual, input.state_pension_percentage);
    if rule.uses_percentage() {
        println!(
            "  {} from age {}: {} a year ({}% of {})",
            config.pension_name,
            input.state_pension_age,
            money(pension),
            input.state_pension_percentage,
            money(input.state_pension_annual)
        );
    } else {
        println!(
            "  {} from age {}: {} a year",
            config.pension_name,
            input.state_pension_age,
            money(pension)
        );
    }
    println!();

    println!(
        "{:>5} {:>4} {:>14} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Year", "Age", "Start", "Contrib", "Growth", "Withdrawn", "Pension", "End"
    );
    println!("{}", "-".repeat(93));
    for row in &result.projections {
        println!(
            "{:>5} {:>4} {:>14} {:>12} {:>12} {:>12} {:>12} {:>14}",
            row.year,
            row.age,
            money(row.start_balance),
            money(row.contributions),
            money(row.growth),
            money(row.withdrawals),
            money(row.state_pension_income),
            money(row.end_balance),
        );
    }

    println!("\nScenarios:");
    for scenario in &result.scenarios {
        let ending = match scenario.run_out_date {
            Some(date) => format!("runs out {}", date),
            None => "lasts".to_string(),
        };
        println!(
            "  {} (age {:>3}): final {:>14}  {}",
            scenario.retirement_date,
            scenario.retirement_age,
            money(scenario.final_balance_at_death),
            ending
        );
    }
}

fn print_comparison(comparison: &CoffeeVsInvestmentComparison) {
    let config = get_regional_config(comparison.with_coffee.input.region);
    let money = |amount: f64| format_currency_with_symbol(amount, config.currency_symbol);
    let describe = |result: &SimpleRetirementResult| {
        match (result.can_retire_at, result.retirement_date) {
            (Some(age), Some(date)) => format!("age {} on {}", age, date),
            _ => "not reachable".to_string(),
        }
    };
    let impact = &comparison.impact;

    println!("Daily Expense vs Investment");
    println!("===========================\n");
    println!("  Spending:  retire {}", describe(&comparison.with_coffee));
    println!("  Investing: retire {}", describe(&comparison.without_coffee));
    println!();
    println!("  Annual spend: {}", money(impact.annual_coffee_spending));
    println!("  Years of spending: {}", impact.years_of_coffee_spending);
    println!(
        "  Total spend until retirement: {}",
        money(impact.total_coffee_spending_until_retirement)
    );
    println!(
        "  Retire {} days earlier ({} years)",
        impact.retirement_date_improvement, impact.retirement_age_improvement
    );
    println!("  Extra savings at retirement: {}", money(impact.total_savings_improvement));
}
