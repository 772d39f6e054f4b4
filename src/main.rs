//! shopdb CLI - sample storefront database over SQLite

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use shopdb::config::{self, ShopConfig};
use shopdb::storage::SqliteStore;
use shopdb::query::QueryEngine;
use shopdb::seed::SampleGenerator;
use shopdb::ui::{self, Icons};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "shopdb")]
#[command(version)]
#[command(about = "Sample storefront database - customers, credit cards, products and orders")]
#[command(long_about = r#"
shopdb declares a small storefront schema in SQLite, fills it with
synthetic customers and runs a few illustrative queries:
  • customers filtered by country code
  • customer counts grouped by country
  • customer names joined with their card numbers
  • order counts per customer

Example usage:
  shopdb demo
  shopdb seed --count 50 --seed 42
  shopdb customers --country LU
"#)]
struct Cli {
    /// Enable verbose logging (logs every statement)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the schema
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Insert the product catalogue and N synthetic customers
    Seed {
        /// Number of customers to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed for reproducible data
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List customers, optionally filtered by country code
    Customers {
        /// Exact country code to filter on
        #[arg(long)]
        country: Option<String>,
    },

    /// Count customers per country code
    Countries,

    /// Show each customer's name with their card number
    Cards,

    /// Show order counts per customer
    Orders,

    /// Show row counts per table
    Stats,

    /// Create the schema, seed it and run every query
    Demo {
        /// Number of customers to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed for reproducible data
        #[arg(short, long)]
        seed: Option<u64>,

        /// Country code for the filter query
        #[arg(long)]
        country: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = serde_json::json!({
            "ok": true,
            "command": command,
            "data": data,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    }
    Ok(())
}

pub fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    match output_mode {
        OutputMode::Human => ui::error(&format!("{:#}", err)),
        OutputMode::Json => {
            let envelope = serde_json::json!({
                "ok": false,
                "error": format!("{:#}", err),
            });
            println!("{}", envelope);
        }
    }
}

fn open_store(path: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(path)?;
    tracing::debug!("Opening {}", path.display());
    Ok(SqliteStore::open(path)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    if let Err(e) = execute(cli, output_mode) {
        emit_error(output_mode, &e);
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve config and database path, then dispatch
fn execute(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let shop_config = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();
    let database = shop_config.database_path(cli.database);

    run(cli.command, &shop_config, &config_path, &database, output_mode)
}

fn run(
    command: Commands,
    shop_config: &ShopConfig,
    config_path: &Path,
    database: &Path,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Init { force } => {
            let written = ShopConfig {
                database: Some(database.display().to_string()),
                sample_size: Some(shop_config.sample_size(None)),
                rng_seed: shop_config.rng_seed(None),
                country: Some(shop_config.country(None)),
            };
            // Config is only written once the store is usable
            let store = open_store(database)?;
            store.ensure_schema()?;
            config::write_config(config_path, &written, force)?;

            if output_mode.is_human() {
                ui::success(&format!("Config written to {}", config_path.display()));
                ui::status(Icons::DATABASE, "Database", &database.display().to_string());
            } else {
                emit_success(
                    output_mode,
                    "init",
                    serde_json::json!({
                        "config": config_path.display().to_string(),
                        "database": database.display().to_string(),
                    }),
                )?;
            }
        }

        Commands::Seed { count, seed } => {
            let count = shop_config.sample_size(count);
            let mut store = open_store(database)?;
            let mut generator = SampleGenerator::from_seed_option(shop_config.rng_seed(seed));

            let spinner = ui::Spinner::new(&format!("Seeding {} customers", count));
            let report = store.seed_sample_data(&mut generator, count)?;
            spinner.finish_and_clear();

            if output_mode.is_human() {
                ui::success("Sample data committed");
                ui::summary_row("Customers:", &report.customers.to_string());
                ui::summary_row("Credit cards:", &report.credit_cards.to_string());
                ui::summary_row("Products:", &report.products.to_string());
                ui::summary_row("Orders:", &report.orders.to_string());
            } else {
                emit_success(output_mode, "seed", serde_json::to_value(&report)?)?;
            }
        }

        Commands::Customers { country } => {
            let store = open_store(database)?;
            let engine = QueryEngine::new(&store);
            let customers = match &country {
                Some(code) => engine.list_customers_by_country(code)?,
                None => engine.list_customers()?,
            };

            if output_mode.is_human() {
                match &country {
                    Some(code) => ui::header(&format!("Customers with country code {}", code)),
                    None => ui::header("All customers"),
                }
                if customers.is_empty() {
                    ui::empty("No customers found.");
                } else {
                    println!("{}", ui::customer_table(&customers));
                }
            } else {
                emit_success(output_mode, "customers", serde_json::to_value(&customers)?)?;
            }
        }

        Commands::Countries => {
            let store = open_store(database)?;
            let counts = QueryEngine::new(&store).count_customers_by_country()?;

            if output_mode.is_human() {
                ui::header("Customers per country code");
                if counts.is_empty() {
                    ui::empty("No customers found.");
                } else {
                    println!("{}", ui::country_count_table(&counts));
                }
            } else {
                emit_success(output_mode, "countries", serde_json::to_value(&counts)?)?;
            }
        }

        Commands::Cards => {
            let store = open_store(database)?;
            let pairs = QueryEngine::new(&store).customers_with_card_numbers()?;

            if output_mode.is_human() {
                ui::header("Customers and their card numbers");
                if pairs.is_empty() {
                    ui::empty("No customers with cards.");
                } else {
                    println!("{}", ui::card_table(&pairs));
                }
            } else {
                emit_success(output_mode, "cards", serde_json::to_value(&pairs)?)?;
            }
        }

        Commands::Orders => {
            let store = open_store(database)?;
            let counts = QueryEngine::new(&store).order_counts_by_customer()?;

            if output_mode.is_human() {
                ui::header("Orders per customer");
                if counts.is_empty() {
                    ui::empty("No orders found.");
                } else {
                    println!("{}", ui::order_count_table(&counts));
                }
            } else {
                emit_success(output_mode, "orders", serde_json::to_value(&counts)?)?;
            }
        }

        Commands::Stats => {
            let store = open_store(database)?;
            let stats = store.stats()?;

            if output_mode.is_human() {
                let customers = stats.customers.to_string();
                let credit_cards = stats.credit_cards.to_string();
                let products = stats.products.to_string();
                let orders = stats.orders.to_string();

                ui::header(&format!("shopdb statistics ({})", database.display()));
                println!(
                    "{}",
                    ui::stats_table(&[
                        ("Customers", customers.as_str()),
                        ("Credit cards", credit_cards.as_str()),
                        ("Products", products.as_str()),
                        ("Orders", orders.as_str()),
                    ])
                );
            } else {
                emit_success(output_mode, "stats", serde_json::to_value(&stats)?)?;
            }
        }

        Commands::Demo { count, seed, country } => {
            run_demo(
                database,
                shop_config.sample_size(count),
                shop_config.rng_seed(seed),
                &shop_config.country(country),
                output_mode,
            )?;
        }
    }

    Ok(())
}

/// Schema, seed, then every query against one session
fn run_demo(
    database: &Path,
    count: usize,
    seed: Option<u64>,
    country: &str,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mut store = open_store(database)?;
    store.ensure_schema()?;

    let mut generator = SampleGenerator::from_seed_option(seed);
    let report = store.seed_sample_data(&mut generator, count)?;

    let engine = QueryEngine::new(&store);
    let customers = engine.list_customers()?;
    let in_country = engine.list_customers_by_country(country)?;
    let by_country = engine.count_customers_by_country()?;
    let cards = engine.customers_with_card_numbers()?;
    let orders = engine.order_counts_by_customer()?;

    if !output_mode.is_human() {
        return emit_success(
            output_mode,
            "demo",
            serde_json::json!({
                "seeded": report,
                "customers": customers,
                "country": country,
                "customers_in_country": in_country,
                "count_by_country": by_country,
                "customer_cards": cards,
                "order_counts": orders,
            }),
        );
    }

    ui::header("shopdb demo");
    ui::status(Icons::DATABASE, "Database", &database.display().to_string());
    ui::status(
        Icons::SPARKLE,
        "Seeded",
        &format!("{} customers, {} products", report.customers, report.products),
    );

    ui::section(&format!(" {} All customers ", Icons::PERSON));
    println!("{}", ui::customer_table(&customers));

    ui::section(&format!(" {} Customers with country code {} ", Icons::SEARCH, country));
    if in_country.is_empty() {
        ui::empty(&format!("No customers in {}.", country));
    } else {
        println!("{}", ui::customer_table(&in_country));
    }

    ui::section(&format!(" {} Count by country code ", Icons::GLOBE));
    println!("{}", ui::country_count_table(&by_country));

    ui::section(&format!(" {} Customer card numbers ", Icons::CARD));
    println!("{}", ui::card_table(&cards));

    ui::section(&format!(" {} Orders per customer ", Icons::CART));
    println!("{}", ui::order_count_table(&orders));

    println!();
    ui::success(&format!(
        "{} customers across {} country codes",
        customers.len(),
        by_country.len()
    ));
    Ok(())
}
