use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use etfguide_core::domain::portfolio::{Category, Portfolio, RiskBand};
use etfguide_core::recommend::reasons::reasons_for;
use etfguide_core::{Catalog, RecommendationResult, UserAnswers};

#[derive(Debug, Parser)]
#[command(name = "etfguide")]
struct Args {
    /// Catalog JSON file. Defaults to CATALOG_PATH, then the bundled catalog.
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Catalog summary.
    Stats,
    /// List portfolios, optionally filtered.
    List {
        #[arg(long)]
        risk_level: Option<u8>,
        /// Only ESG portfolios.
        #[arg(long)]
        esg: bool,
        /// multi, single or esg.
        #[arg(long)]
        category: Option<Category>,
        /// low, medium or high.
        #[arg(long)]
        band: Option<RiskBand>,
    },
    /// Show one portfolio with its components.
    Show { id: String },
    /// Report catalog records rejected at load; exits non-zero if any.
    Validate,
    /// Recommend portfolios for a set of questionnaire answers.
    Recommend {
        /// JSON answers file, or "-" for stdin.
        #[arg(long)]
        answers: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = etfguide_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(path) = args.catalog.clone() {
        settings.catalog_path = Some(path);
    }

    let result = run(&args, &settings);
    if let Err(e) = &result {
        sentry_anyhow::capture_anyhow(e);
        tracing::error!(error = ?e, "command failed");
    }
    result
}

fn run(args: &Args, settings: &etfguide_core::config::Settings) -> anyhow::Result<()> {
    let catalog = Catalog::from_settings(settings)?;

    match &args.command {
        Command::Stats => {
            let stats = catalog.stats();
            if args.json {
                return print_json(&stats);
            }
            println!("Catalog as of {}", catalog.as_of_date);
            println!("  portfolios:        {}", stats.total_portfolios);
            for (category, count) in &stats.per_category {
                println!("  {:<18} {count}", format!("{}:", category.as_str()));
            }
            println!("  risk levels:       {:?}", stats.risk_levels);
            println!("  distinct ETFs:     {}", stats.unique_components);
            println!("  rejected records:  {}", stats.rejected_records);
        }
        Command::List {
            risk_level,
            esg,
            category,
            band,
        } => {
            let query = etfguide_core::catalog::PortfolioQuery {
                risk_level: *risk_level,
                esg: esg.then_some(true),
                category: *category,
                band: *band,
            };
            let items = catalog.query(&query);
            if args.json {
                return print_json(&items);
            }
            for p in items {
                println!("{}", summary_line(p));
            }
        }
        Command::Show { id } => {
            let p = catalog
                .get(id)
                .with_context(|| format!("portfolio not found: {id}"))?;
            if args.json {
                return print_json(p);
            }
            print_portfolio(p);
        }
        Command::Validate => {
            let rejected = catalog.rejected();
            if args.json {
                print_json(&rejected)?;
            } else {
                println!(
                    "{} portfolios loaded, {} rejected",
                    catalog.len(),
                    rejected.len()
                );
                for err in rejected {
                    println!("  {err}");
                }
            }
            anyhow::ensure!(
                rejected.is_empty(),
                "catalog has {} invalid record(s)",
                rejected.len()
            );
        }
        Command::Recommend { answers } => {
            let answers = read_answers(answers)?;
            let result = catalog.recommend(&answers);
            if args.json {
                return print_json(&result);
            }
            print_recommendation(&result, &answers);
        }
    }

    Ok(())
}

fn read_answers(source: &str) -> anyhow::Result<UserAnswers> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read answers from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read answers file {source}"))?
    };
    serde_json::from_str(&text).context("answers must be a complete questionnaire (all ten fields)")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn summary_line(p: &Portfolio) -> String {
    format!(
        "{:<8} risk {} {:<4} {:>2} ETF  cost {:.2}%  {}",
        p.id,
        p.risk_level,
        if p.is_esg { "ESG" } else { "" },
        p.holding_count(),
        p.weighted_cost_ratio(),
        p.display_name
    )
}

fn print_portfolio(p: &Portfolio) {
    println!("{} - {}", p.id, p.display_name);
    println!(
        "  risk level {} ({:?}), min horizon {} years, rebalance {:?}",
        p.risk_level, p.risk_band(), p.min_horizon_years, p.rebalance_cadence
    );
    if p.alternatives {
        println!("  choose one of:");
    }
    for c in &p.components {
        println!(
            "  {:>6.2}%  {}  {}  (cost {:.2}%)",
            c.weight_percent, c.identifier, c.name, c.cost_ratio
        );
    }
    println!("  weighted cost ratio {:.2}%", p.weighted_cost_ratio());
    if !p.strategy_note.is_empty() {
        println!("  note: {}", p.strategy_note);
    }
}

fn print_recommendation(result: &RecommendationResult, answers: &UserAnswers) {
    println!("Allowed risk levels: {:?}", result.allowed_risk_levels);
    if result.is_empty() {
        println!("No portfolio matches these answers; try relaxing ESG or management constraints.");
        return;
    }
    for ranked in &result.ranked_portfolios {
        println!(
            "#{} (score {}) {}",
            ranked.rank,
            ranked.score,
            summary_line(&ranked.portfolio)
        );
        for reason in reasons_for(&ranked.portfolio, answers, result.ideal_risk_level) {
            println!("    - {reason}");
        }
    }
}

fn init_sentry(settings: &etfguide_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
