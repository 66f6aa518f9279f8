use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use itinera_budget::{BaseCost, BudgetEstimate, BudgetInput, parse_items_csv, reconcile_budget};
use itinera_core::{BudgetSummary, Itinerary};
use itinera_ingest::{ResolveOptions, TripPlan, parse_trip_plan};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "itinera", version, about = "Parse LLM trip plans into days, activities and budgets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a plan file (LLM text or a saved JSON day array); `-` reads stdin
    Parse {
        file: PathBuf,

        /// Print the parsed plan as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// First trip day (YYYY-MM-DD); overrides config
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Reconcile an estimated budget with extra items
    Budget {
        /// Plan file; its budget section and day count are used
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Budget estimate text or JSON file
        #[arg(long, conflicts_with = "base")]
        estimate: Option<PathBuf>,

        /// Numeric base cost
        #[arg(long)]
        base: Option<f64>,

        /// CSV of extra items: category,description,amount,currency,is_estimate,is_paid
        #[arg(long)]
        items: Option<PathBuf>,

        /// Overrides config
        #[arg(long)]
        travelers: Option<u32>,

        /// Trip length; defaults to the plan's day count
        #[arg(long)]
        days: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Manage config.toml under $ITINERA_HOME (default ~/.itinera)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("itinera=info,itinera_ingest=info,itinera_budget=info,itinera_core=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config_path = config::config_path()?;
    let cfg = config::Config::load(&config_path)?;

    match cli.command {
        Command::Parse {
            file,
            json,
            start_date,
        } => {
            let raw = state::read_input(&file)?;
            let options = ResolveOptions {
                start_date: start_date.or(cfg.parse.start_date),
            };
            let plan = parse_trip_plan(&raw, &options);
            info!(days = plan.days.len(), activities = plan.activity_count(), "plan parsed");

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }

        Command::Budget {
            plan,
            estimate,
            base,
            items,
            travelers,
            days,
            json,
        } => {
            let plan = match plan {
                Some(p) => Some(parse_trip_plan(
                    &state::read_input(&p)?,
                    &ResolveOptions::default(),
                )),
                None => None,
            };
            let base = base_cost(base, estimate, plan.as_ref())?;
            let items = match items {
                Some(p) => parse_items_csv(&p)
                    .with_context(|| format!("importing items from {}", p.display()))?,
                None => Vec::new(),
            };
            let days = days
                .or_else(|| plan.as_ref().map(|p| p.days.len() as u32))
                .unwrap_or(1);

            let input = BudgetInput::new(base)
                .with_items(items)
                .with_travelers(travelers.unwrap_or(cfg.budget.travelers))
                .with_per_person_categories(cfg.budget.per_person_categories.clone())
                .with_duration_days(days);
            let summary = reconcile_budget(&input);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, &cfg.budget.currency);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if config::Config::write_default(&config_path)? {
                    println!("Wrote {}", config_path.display());
                } else {
                    println!("Config already exists: {}", config_path.display());
                }
            }
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// `--base` wins, then an estimate file, then the plan's budget section, then the sum of
/// activity costs in the plan.
fn base_cost(
    base: Option<f64>,
    estimate: Option<PathBuf>,
    plan: Option<&TripPlan>,
) -> Result<BaseCost> {
    if let Some(n) = base {
        if !n.is_finite() || n < 0.0 {
            bail!("--base must be a non-negative number, got {n}");
        }
        return Ok(BaseCost::Numeric(n));
    }
    if let Some(p) = estimate {
        return Ok(BaseCost::Text(state::read_input(&p)?));
    }
    let Some(plan) = plan else {
        return Ok(BaseCost::Numeric(0.0));
    };
    let text = &plan.sections.budget_estimate;
    if BudgetEstimate::parse(text).total.is_some() {
        return Ok(BaseCost::Text(text.clone()));
    }
    Ok(BaseCost::Numeric(
        Itinerary::new(plan.days.clone()).plan_base_cost(),
    ))
}

fn print_plan(plan: &TripPlan) {
    for section in plan.sections.sections() {
        let lines = section.text.lines().count();
        if lines > 0 {
            println!("[{}] {} lines", section.kind.as_str(), lines);
        }
    }
    println!();

    for day in &plan.days {
        if day.date.is_empty() {
            println!("## Day {}", day.day);
        } else {
            println!("## Day {} ({})", day.day, day.date);
        }
        if day.is_empty {
            println!("  (no activities)");
        }
        for a in &day.activities {
            let cost = if a.cost > 0.0 {
                format!(" | {:.2}", a.cost)
            } else {
                String::new()
            };
            println!(
                "  {}-{} [{}] {}{}",
                a.start_time,
                a.end_time,
                a.category.as_str(),
                a.name,
                cost
            );
        }
        if !day.notes.is_empty() {
            println!("  notes: {}", day.notes.replace('\n', " / "));
        }
    }
}

fn print_summary(s: &BudgetSummary, currency: &str) {
    println!("Plan base cost:   {:>12.2} {currency}", s.plan_base_cost);
    println!("Extra items:      {:>12.2} {currency}", s.extra_items_total);
    println!("Total:            {:>12.2} {currency}", s.total_cost);
    println!("Suggested budget: {:>12.2} {currency}", s.suggested_budget);
    println!("Per day:          {:>12.2} {currency}", s.daily_cost);
}
