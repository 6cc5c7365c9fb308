//! Catalog Command Line Interface
//!
//! Terminal front end for the creature catalog: list and filter the first
//! index page, show the derived categories, open one creature's detail view,
//! or browse interactively with debounced search.
//!
//! # Usage
//!
//! ```bash
//! # Everything on the first page
//! catalog_cli list
//!
//! # Filter by category, then by name text
//! catalog_cli list --category fire
//! catalog_cli list --search saur
//!
//! # Detail view
//! catalog_cli show 25
//!
//! # Interactive: type to search, `:type grass` to pick a category
//! catalog_cli browse
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use creature_catalog::{
    CatalogConfig, CatalogLoader, CatalogSession, CatalogSource, CreatureDetail, FilterPolicy,
    HttpCatalogClient, Record, SessionStatus,
};

#[derive(Parser)]
#[command(name = "catalog_cli")]
#[command(version)]
#[command(about = "Browse the creature catalog from the terminal")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog API base URL
    #[arg(long, global = true, env = "CATALOG_API_BASE")]
    api_base: Option<String>,

    /// Index page size
    #[arg(long, global = true, env = "CATALOG_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Search debounce interval in milliseconds
    #[arg(long, global = true, env = "CATALOG_DEBOUNCE_MS")]
    debounce_ms: Option<u64>,

    /// How category and search text combine
    #[arg(long, global = true, value_enum)]
    policy: Option<PolicyArg>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    LastChanged,
    Intersect,
}

impl From<PolicyArg> for FilterPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LastChanged => FilterPolicy::LastChanged,
            PolicyArg::Intersect => FilterPolicy::Intersect,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and print the displayed records
    List {
        /// Category value to select (e.g. fire)
        #[arg(short, long)]
        category: Option<String>,

        /// Name text to search for (case-sensitive substring)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the categories derived from the loaded records
    Facets,

    /// Show the detail view for one creature
    Show {
        /// Creature id
        id: i64,
    },

    /// Interactive browsing: each input line is search text
    Browse,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "ERROR:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> Result<CatalogConfig> {
    let mut config = CatalogConfig::from_env()?;
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base)?;
    }
    if let Some(size) = cli.page_size {
        config = config.with_page_size(size)?;
    }
    if let Some(ms) = cli.debounce_ms {
        config = config.with_debounce_ms(ms)?;
    }
    if let Some(policy) = cli.policy {
        config = config.with_filter_policy(policy.into());
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let client = Arc::new(HttpCatalogClient::from_config(&config)?);

    match cli.command {
        Commands::List { category, search } => {
            let loader = CatalogLoader::from_config(client, &config);
            let mut session = CatalogSession::new(&config);
            session.mount(&loader).await;

            if let Some(value) = category.as_deref() {
                if !session.select_category_value(value) {
                    eprintln!("{} unknown category '{}'", "WARN:".yellow().bold(), value);
                }
            }
            if let Some(text) = search {
                session.input_text(text);
                session.debounced_changed().await;
            }

            print_results(&session, cli.json)
        }

        Commands::Facets => {
            let loader = CatalogLoader::from_config(client, &config);
            let catalog = loader.load().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&catalog.facets)?);
            } else if catalog.facets.is_empty() {
                println!("No categories");
            } else {
                for facet in &catalog.facets {
                    println!("{}  {}", facet.label.cyan(), facet.value.dimmed());
                }
            }
            Ok(())
        }

        Commands::Show { id } => {
            let response = client
                .fetch_detail_by_id(id)
                .await
                .with_context(|| format!("Failed to fetch details for #{}", id))?;
            let detail = CreatureDetail::from_response(&response);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(&detail);
            }
            Ok(())
        }

        Commands::Browse => {
            let loader = CatalogLoader::from_config(client, &config);
            browse(&config, &loader).await
        }
    }
}

// =============================================================================
// INTERACTIVE
// =============================================================================

async fn browse(config: &CatalogConfig, loader: &CatalogLoader) -> Result<()> {
    let mut session = CatalogSession::new(config);
    println!("{}", "Loading...".dimmed());
    session.mount(loader).await;

    let labels: Vec<&str> = session.facets().iter().map(|f| f.label.as_str()).collect();
    println!("{} {}", "Categories:".cyan().bold(), labels.join(", "));
    println!(
        "{}",
        "Type to search. :type <value> | :type | :search | :quit".dimmed()
    );
    print_results(&session, false)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match line.trim_end() {
                    ":quit" => break,
                    ":search" => {
                        session.search();
                        print_results(&session, false)?;
                    }
                    ":type" => {
                        session.select_category(None);
                        print_results(&session, false)?;
                    }
                    cmd if cmd.starts_with(":type ") => {
                        let value = cmd[":type ".len()..].trim();
                        if session.select_category_value(value) {
                            print_results(&session, false)?;
                        } else {
                            println!("{} unknown category '{}'", "WARN:".yellow().bold(), value);
                        }
                    }
                    text => session.input_text(text),
                }
            }
            changed = session.debounced_changed() => {
                if changed {
                    print_results(&session, false)?;
                }
            }
        }
    }

    session.teardown();
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_results(session: &CatalogSession, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session.displayed())?);
        return Ok(());
    }

    match session.status() {
        SessionStatus::Loading => println!("{}", "Loading...".dimmed()),
        SessionStatus::Empty => println!("{}", "No results".yellow()),
        SessionStatus::Results(_) => {
            for record in session.displayed() {
                print_record(record);
            }
        }
    }
    Ok(())
}

fn print_record(record: &Record) {
    let image = if record.image_url.is_some() {
        ""
    } else {
        " (no image)"
    };
    println!(
        "{} {} [{}]{}",
        format!("#{:<4}", record.id).dimmed(),
        record.name.bold(),
        record.categories.join(", "),
        image.dimmed()
    );
}

fn print_detail(detail: &CreatureDetail) {
    let row = |title: &str, value: String| println!("{} {}", title.cyan(), value.bold());

    row("Name:", detail.name.clone());
    row("Types:", detail.types.join(", "));
    row("Stats:", detail.stats.join(", "));
    row("Abilities:", detail.abilities.join(", "));
    row("Some Moves:", detail.moves.join(", "));
    row(
        "Image:",
        detail
            .image_url
            .clone()
            .unwrap_or_else(|| "none".to_string()),
    );
}
