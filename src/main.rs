use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use collateral_planner::config::{AppConfig, PlanConfig};
use collateral_planner::error::AppError;
use collateral_planner::telemetry;
use collateral_planner::workflows::revaluation::{
    write_plan, PlanSummary, PortfolioLoader, RevaluationPlanEntry, RevaluationPlanner,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "collateral-planner",
    about = "Derive collateral revaluation plans from portfolio exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Revaluation plan operations
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Derive the plan and write it as JSON
    Generate(GenerateArgs),
    /// Derive the plan and print bucket counts without writing anything
    Summary(PlanArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Portfolio file (.json or .csv); overrides PLAN_PORTFOLIO_PATH
    #[arg(long)]
    input: Option<PathBuf>,
    /// Evaluation date for timeframe buckets (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Seed of the random source; overrides PLAN_SEED
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    plan: PlanArgs,
    /// Output JSON file; overrides PLAN_OUTPUT_PATH
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(environment = ?config.environment, "collateral planner starting");

    match cli.command {
        Command::Plan {
            command: PlanCommand::Generate(args),
        } => run_generate(config.plan, args),
        Command::Plan {
            command: PlanCommand::Summary(args),
        } => run_summary(config.plan, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn apply_overrides(mut config: PlanConfig, args: &PlanArgs) -> PlanConfig {
    if let Some(input) = &args.input {
        config.portfolio_path = input.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
}

fn derive_plan(
    config: &PlanConfig,
    today: Option<NaiveDate>,
) -> Result<Vec<RevaluationPlanEntry>, AppError> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let records = PortfolioLoader::from_path(&config.portfolio_path)?;
    info!(
        path = %config.portfolio_path.display(),
        records = records.len(),
        "portfolio loaded"
    );

    let mut planner = RevaluationPlanner::from_config(config, today);
    Ok(planner.generate(&records))
}

fn run_generate(config: PlanConfig, args: GenerateArgs) -> Result<(), AppError> {
    let mut config = apply_overrides(config, &args.plan);
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let plan = derive_plan(&config, args.plan.today)?;
    write_plan(&config.output_path, &plan)?;

    println!(
        "Saved revaluation plan for {} records to {}",
        plan.len(),
        config.output_path.display()
    );
    render_summary(&PlanSummary::from_entries(&plan), false);
    Ok(())
}

fn run_summary(config: PlanConfig, args: PlanArgs) -> Result<(), AppError> {
    let config = apply_overrides(config, &args);
    let plan = derive_plan(&config, args.today)?;
    render_summary(&PlanSummary::from_entries(&plan), true);
    Ok(())
}

fn render_summary(summary: &PlanSummary, with_types: bool) {
    println!("\nTimeframes ({} total)", summary.total);
    for bucket in &summary.by_timeframe {
        println!("- {}: {}", bucket.timeframe_label, bucket.count);
    }

    if !with_types {
        return;
    }

    println!("\nBase types");
    for entry in &summary.by_base_type {
        println!("- {}: {}", entry.base_type.label(), entry.count);
    }

    println!(
        "\nCollateral value {:.2}, synthetic market value {:.2}",
        summary.total_collateral_value, summary.total_market_value
    );
}
