//! ValorAr CLI
//!
//! Quote a position, value a CSV of positions, or run a compound projection.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use valorar_engine::instrument::load_requests;
use valorar_engine::projection::{DurationUnit, ProjectionConfig, ProjectionEngine, ProjectionInput, RateKind};
use valorar_engine::{EngineConfig, EstimatorGateway, InstrumentCategory, InstrumentQuoteRequest, ValuationEngine};

#[derive(Parser)]
#[command(name = "valorar")]
#[command(author, version, about = "Yield and maturity estimates for Argentine fixed income", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate maturity and yields for one position
    Quote {
        #[arg(long)]
        category: InstrumentCategory,
        #[arg(long)]
        ticker: String,
        /// Price per 100 nominals
        #[arg(long)]
        price: f64,
        /// Invested amount in pesos
        #[arg(long)]
        amount: f64,
        /// Purchase date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Market TNA in percent
        #[arg(long)]
        tna: Option<f64>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip the remote estimator
        #[arg(long)]
        local_only: bool,
    },

    /// Value every row of a CSV with the local engine
    Batch {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compound projection with optional monthly contributions
    Simulate {
        #[arg(long)]
        principal: f64,
        /// Rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long, value_enum, default_value = "nominal-annual")]
        rate_kind: RateKindArg,
        #[arg(long)]
        duration: i64,
        #[arg(long, value_enum, default_value = "months")]
        unit: UnitArg,
        /// Added every 30 days
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        /// Print the per-period ledger
        #[arg(long)]
        periods: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RateKindArg {
    NominalAnnual,
    MonthlyEffective,
    AnnualEffective,
}

impl From<RateKindArg> for RateKind {
    fn from(arg: RateKindArg) -> Self {
        match arg {
            RateKindArg::NominalAnnual => RateKind::NominalAnnual,
            RateKindArg::MonthlyEffective => RateKind::MonthlyEffective,
            RateKindArg::AnnualEffective => RateKind::AnnualEffective,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Days,
    Months,
    Years,
}

impl From<UnitArg> for DurationUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Days => DurationUnit::Days,
            UnitArg::Months => DurationUnit::Months,
            UnitArg::Years => DurationUnit::Years,
        }
    }
}

/// Flat output row for batch valuation
#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    category: &'static str,
    ticker: String,
    amount: f64,
    maturity_date: String,
    maturity_value: f64,
    nominals: Option<f64>,
    tem: String,
    tna: String,
    tae: String,
    tir: String,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote { category, ticker, price, amount, date, tna, config, local_only } => {
            let config = load_config(config.as_deref())?;
            let mut request = InstrumentQuoteRequest::new(category, ticker, price, amount, date);
            if let Some(tna) = tna {
                request = request.with_market_tna(tna);
            }
            let quote = request.validate().context("Invalid quote request")?;

            let gateway = if local_only {
                EstimatorGateway::local_only(ValuationEngine::new(config))
            } else {
                EstimatorGateway::from_config(config)
            };

            let estimate = gateway.estimate(&quote).await;
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }

        Commands::Batch { input, output, config } => {
            let config = load_config(config.as_deref())?;
            run_batch(&input, output.as_deref(), config)?;
        }

        Commands::Simulate { principal, rate, rate_kind, duration, unit, contribution, periods } => {
            let input = ProjectionInput::new(principal, rate, rate_kind.into(), duration, unit.into())
                .with_contribution(contribution);
            let engine = ProjectionEngine::new(ProjectionConfig { detailed_output: periods });
            let result = engine.project(&input).context("Projection failed")?;

            if periods {
                println!("{:>6} {:>6} {:>16} {:>14} {:>12} {:>16}",
                    "Period", "Day", "Opening", "Interest", "Contrib", "Closing");
                println!("{}", "-".repeat(76));
                for row in &result.periods {
                    println!("{:>6} {:>6} {:>16.2} {:>14.2} {:>12.2} {:>16.2}",
                        row.period, row.end_day, row.opening_capital, row.interest,
                        row.contribution, row.closing_capital);
                }
                println!();
            }

            let summary = result.summary();
            println!("Days:            {}", summary.days);
            println!("Total invested:  $ {:.2}", summary.total_invested);
            println!("Interest earned: $ {:.2}", summary.total_interest);
            println!("Final capital:   $ {:.2}", summary.final_capital);
            println!("Total return:    {:.2}%", summary.effective_return_pct);
            if let Some(xirr) = result.money_weighted_return {
                println!("Annualized (XIRR): {:.2}%", xirr * 100.0);
            }
        }
    }

    Ok(())
}

fn run_batch(input: &Path, output: Option<&Path>, config: EngineConfig) -> Result<()> {
    let start = Instant::now();
    let loaded = load_requests(input).with_context(|| format!("Failed to read {}", input.display()))?;
    eprintln!("Loaded {} rows in {:?}", loaded.len(), start.elapsed());

    let mut quotes = Vec::with_capacity(loaded.len());
    for (row, parsed) in loaded {
        match parsed.and_then(InstrumentQuoteRequest::validate) {
            Ok(quote) => quotes.push((row, quote)),
            Err(e) => eprintln!("Skipping row {}: {}", row, e),
        }
    }

    let engine = ValuationEngine::new(config);
    let rows: Vec<BatchRow> = quotes
        .par_iter()
        .map(|(row, quote)| {
            let estimate = engine.estimate(quote);
            BatchRow {
                row: *row,
                category: quote.category().as_str(),
                ticker: quote.ticker().to_string(),
                amount: quote.amount(),
                maturity_date: estimate.maturity_date.to_string(),
                maturity_value: estimate.maturity_value,
                nominals: estimate.nominal_quantity,
                tem: estimate.tem.to_string(),
                tna: estimate.tna.to_string(),
                tae: estimate.tae.to_string(),
                tir: estimate.tir.to_string(),
            }
        })
        .collect();

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    eprintln!("Valued {} positions in {:?}", rows.len(), start.elapsed());
    Ok(())
}
