use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::DataConfig;
use crate::error::Result;
use crate::pipeline::{
    airline_name_map, attach_airline_names, enrich_routes, load_airline_directory,
    load_airport_registry, load_route_feed,
};
use crate::types::EnrichedDataset;

/// Accounting for a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub airports_loaded: usize,
    pub raw_route_rows: usize,
    pub duplicates_removed: usize,
    pub missing_destination_id: usize,
    pub unmatched_airports_dropped: usize,
    pub enriched_routes: usize,
    /// Routes that matched an active carrier; zero when the airline join
    /// was not requested
    pub labeled_routes: usize,
    pub duration_secs: f64,
}

pub struct Pipeline;

impl Pipeline {
    /// Run the load → clean → join pipeline without the airline label
    /// join. Each call reloads everything from the input files; nothing
    /// is shared between runs.
    #[instrument(skip(config), fields(data_dir = %config.base_dir.display()))]
    pub fn run(config: &DataConfig) -> Result<(EnrichedDataset, PipelineSummary)> {
        Self::run_inner(config, false)
    }

    /// Run the full pipeline including the optional airline-name
    /// enrichment.
    #[instrument(skip(config), fields(data_dir = %config.base_dir.display()))]
    pub fn run_with_airlines(config: &DataConfig) -> Result<(EnrichedDataset, PipelineSummary)> {
        Self::run_inner(config, true)
    }

    fn run_inner(
        config: &DataConfig,
        with_airlines: bool,
    ) -> Result<(EnrichedDataset, PipelineSummary)> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let t_run = std::time::Instant::now();
        info!("🚀 Starting enrichment pipeline run {}", run_id);
        println!("🚀 Starting enrichment pipeline run {}", run_id);

        info!("🌍 Loading airport registry...");
        println!("🌍 Loading airport registry...");
        let registry = load_airport_registry(config.airports_path())?;
        println!("✅ {} airports registered", registry.len());

        info!("🧹 Loading and cleaning route feed...");
        println!("🧹 Loading and cleaning route feed...");
        let feed = load_route_feed(config.routes_path())?;
        println!(
            "✅ {} routes kept ({} duplicates, {} missing destination ID)",
            feed.routes.len(),
            feed.duplicates_removed,
            feed.missing_destination_id
        );

        info!("🔗 Joining routes with airport metadata...");
        println!("🔗 Joining routes with airport metadata...");
        let raw_route_rows = feed.raw_rows;
        let duplicates_removed = feed.duplicates_removed;
        let missing_destination_id = feed.missing_destination_id;
        let outcome = enrich_routes(feed.routes, &registry);
        let mut routes = outcome.routes;
        println!(
            "✅ {} routes enriched ({} dropped with unmatched airports)",
            routes.len(),
            outcome.unmatched_dropped
        );

        let labeled_routes = if with_airlines {
            info!("🏷️  Attaching airline names...");
            println!("🏷️  Attaching airline names...");
            let carriers = load_airline_directory(config.airlines_path())?;
            let names = airline_name_map(&carriers);
            let labeled = attach_airline_names(&mut routes, &names);
            println!("✅ {} of {} routes labeled", labeled, routes.len());
            labeled
        } else {
            0
        };

        let summary = PipelineSummary {
            run_id,
            started_at,
            airports_loaded: registry.len(),
            raw_route_rows,
            duplicates_removed,
            missing_destination_id,
            unmatched_airports_dropped: outcome.unmatched_dropped,
            enriched_routes: routes.len(),
            labeled_routes,
            duration_secs: t_run.elapsed().as_secs_f64(),
        };

        info!(
            "Pipeline run {} finished: {} enriched routes in {:.2}s",
            run_id, summary.enriched_routes, summary.duration_secs
        );
        Ok((EnrichedDataset::new(routes), summary))
    }
}
