use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use flightmap::config::{Config, DataConfig};
use flightmap::constants::{AIRLINE_SAMPLE_SIZE, DEFAULT_SAMPLE_SIZE, SAMPLE_SEED, TOP_AIRLINES};
use flightmap::logging;
use flightmap::pipeline::Pipeline;
use flightmap::viz::{airline_dropdown_figure, filtered_figure, sample_figure, Figure, FlightSelection};

#[derive(Parser)]
#[command(name = "flightmap")]
#[command(about = "Historical airline route enrichment and flight path maps")]
#[command(version = "0.1.0")]
struct Cli {
    /// Base directory holding the input data files (overrides config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and print run accounting plus the busiest source
    /// countries
    Stats {
        /// How many countries to list
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
    /// Render a figure for a random sample of all enriched routes
    SampleMap {
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample_size: usize,
        /// Seed for sampling and trace colors
        #[arg(long, default_value_t = SAMPLE_SEED)]
        seed: u64,
        /// Where to write the figure JSON (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a dropdown figure over the busiest airlines
    AirlineMap {
        #[arg(long, default_value_t = TOP_AIRLINES)]
        top: usize,
        /// Routes sampled per airline
        #[arg(long, default_value_t = AIRLINE_SAMPLE_SIZE)]
        sample_size: usize,
        #[arg(long, default_value_t = SAMPLE_SEED)]
        seed: u64,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a figure filtered by airline full name and/or country
    FilterMap {
        #[arg(long)]
        airline: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn resolve_data_config(data_dir: Option<PathBuf>) -> Result<DataConfig, Box<dyn std::error::Error>> {
    match data_dir {
        Some(dir) => Ok(DataConfig::with_base_dir(dir)),
        None => Ok(Config::load()?.data),
    }
}

fn write_figure(figure: &Figure, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(figure)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            info!("Figure written to {}", path.display());
            println!("🗺️  Figure written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let data = resolve_data_config(cli.data_dir)?;

    match cli.command {
        Commands::Stats { top } => {
            let (dataset, summary) = Pipeline::run_with_airlines(&data)?;

            println!("\n📊 Pipeline Results:");
            println!("   Airports registered: {}", summary.airports_loaded);
            println!("   Raw route rows: {}", summary.raw_route_rows);
            println!("   Duplicates removed: {}", summary.duplicates_removed);
            println!(
                "   Missing destination ID: {}",
                summary.missing_destination_id
            );
            println!(
                "   Unmatched airports dropped: {}",
                summary.unmatched_airports_dropped
            );
            println!("   Enriched routes: {}", summary.enriched_routes);
            println!("   Labeled routes: {}", summary.labeled_routes);
            println!("   Duration: {:.2}s", summary.duration_secs);

            println!("\n🌍 Top {} Countries by Number of Flights:", top);
            for (country, count) in dataset.top_source_countries(top) {
                println!("   {country}: {count}");
            }
        }
        Commands::SampleMap {
            sample_size,
            seed,
            output,
        } => {
            let (dataset, _) = Pipeline::run(&data)?;
            let figure = sample_figure(&dataset, sample_size, seed);
            write_figure(&figure, output)?;
        }
        Commands::AirlineMap {
            top,
            sample_size,
            seed,
            output,
        } => {
            let (dataset, _) = Pipeline::run_with_airlines(&data)?;
            let figure = airline_dropdown_figure(&dataset, top, sample_size, seed);
            write_figure(&figure, output)?;
        }
        Commands::FilterMap {
            airline,
            country,
            output,
        } => {
            let (dataset, _) = Pipeline::run_with_airlines(&data)?;
            let selection = FlightSelection::new(airline, country);
            let figure = filtered_figure(&dataset, &selection);
            if figure.data.is_empty() {
                println!("⚠️  No routes match the selection");
            }
            write_figure(&figure, output)?;
        }
    }

    Ok(())
}
