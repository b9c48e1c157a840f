//! world-report CLI - demographic reports over the MySQL world dataset.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};
use world_report::{render, Config, MysqlStore, ReportError, ReportService};

#[derive(Parser)]
#[command(name = "world-report")]
#[command(about = "Demographic reports over the MySQL world dataset")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full report suite with the configured defaults
    Summary,

    /// List countries, population descending
    Countries {
        /// Only countries in this continent
        #[arg(long, conflicts_with = "region")]
        continent: Option<String>,

        /// Only countries in this region
        #[arg(long)]
        region: Option<String>,

        /// Cap the report at the N most populous countries
        #[arg(long)]
        top: Option<i64>,
    },

    /// List cities with their country, population descending
    Cities {
        /// Only cities whose country is in this continent
        #[arg(long)]
        continent: Option<String>,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), ReportError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(|e| ReportError::Config(e.to_string()))?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let store = MysqlStore::connect(&config).await?;
    let service = ReportService::new(store);

    let result = match cli.command {
        Commands::Summary => run_summary(&service, &config).await,
        Commands::Countries {
            continent,
            region,
            top,
        } => run_countries(&service, continent, region, top).await,
        Commands::Cities { continent } => run_cities(&service, continent).await,
        Commands::HealthCheck => run_health_check(&service).await,
    };

    service.store().close().await;
    result
}

/// The full demo sequence: every report operation once, with the
/// configured continent, region, and top-N defaults.
async fn run_summary(
    service: &ReportService<MysqlStore>,
    config: &Config,
) -> Result<(), ReportError> {
    let continent = &config.report.continent;
    let region = &config.report.region;
    let top_n = config.report.top_n;

    let countries = service.all_countries().await?;
    print_section("Countries");
    println!("Number of countries: {}\n", countries.len());
    print!("{}", render::render_countries(&countries));

    let by_continent = service.countries_by_continent(continent).await?;
    print_section(&format!("Countries in {continent}"));
    println!("Number of countries: {}\n", by_continent.len());
    print!("{}", render::render_countries(&by_continent));

    let by_region = service.countries_by_region(region).await?;
    print_section(&format!("Countries in {region}"));
    println!("Number of countries: {}\n", by_region.len());
    print!("{}", render::render_countries(&by_region));

    let top = service.top_countries(top_n).await?;
    print_section(&format!("Top {top_n} Countries"));
    print!("{}", render::render_countries(&top));

    let top_continent = service.top_countries_in_continent(top_n, continent).await?;
    print_section(&format!("Top {top_n} Countries in {continent}"));
    print!("{}", render::render_countries(&top_continent));

    let top_region = service.top_countries_in_region(top_n, region).await?;
    print_section(&format!("Top {top_n} Countries in {region}"));
    print!("{}", render::render_countries(&top_region));

    let cities = service.all_cities().await?;
    print_section("Cities");
    println!("Number of cities: {}\n", cities.len());
    print!("{}", render::render_cities(&cities));

    let cities_by_continent = service.cities_by_continent(continent).await?;
    print_section(&format!("Cities in {continent}"));
    println!("Number of cities: {}\n", cities_by_continent.len());
    print!("{}", render::render_cities(&cities_by_continent));

    Ok(())
}

async fn run_countries(
    service: &ReportService<MysqlStore>,
    continent: Option<String>,
    region: Option<String>,
    top: Option<i64>,
) -> Result<(), ReportError> {
    let countries = match (continent, region, top) {
        (Some(continent), None, None) => service.countries_by_continent(&continent).await?,
        (Some(continent), None, Some(n)) => {
            service.top_countries_in_continent(n, &continent).await?
        }
        (None, Some(region), None) => service.countries_by_region(&region).await?,
        (None, Some(region), Some(n)) => service.top_countries_in_region(n, &region).await?,
        (None, None, Some(n)) => service.top_countries(n).await?,
        (None, None, None) => service.all_countries().await?,
        (Some(_), Some(_), _) => unreachable!("clap rejects --continent with --region"),
    };

    print!("{}", render::render_countries(&countries));
    Ok(())
}

async fn run_cities(
    service: &ReportService<MysqlStore>,
    continent: Option<String>,
) -> Result<(), ReportError> {
    let cities = match continent {
        Some(continent) => service.cities_by_continent(&continent).await?,
        None => service.all_cities().await?,
    };

    print!("{}", render::render_cities(&cities));
    Ok(())
}

async fn run_health_check(service: &ReportService<MysqlStore>) -> Result<(), ReportError> {
    let start = Instant::now();
    service.store().ping().await?;
    println!("Database: OK ({}ms)", start.elapsed().as_millis());
    Ok(())
}

fn print_section(title: &str) {
    println!("\n**********{title}********\n");
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
