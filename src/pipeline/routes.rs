use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::constants::UNKNOWN_EQUIPMENT;
use crate::error::{PipelineError, Result};
use crate::types::RouteRecord;

/// Raw route row as it appears in the feed, codeshare flag included.
#[derive(Debug, Clone, Deserialize)]
struct RouteRow {
    #[serde(rename = "Airline")]
    airline: String,
    #[serde(rename = "Source airport")]
    source_airport: String,
    #[serde(rename = "Destination airport")]
    destination_airport: String,
    #[serde(rename = "Destination airport ID")]
    destination_airport_id: Option<u32>,
    #[serde(rename = "Codeshare")]
    codeshare: Option<String>,
    #[serde(rename = "Equipment")]
    equipment: Option<String>,
}

impl RouteRow {
    /// Equality key for duplicate removal. The codeshare flag is not part
    /// of the record model, so it never distinguishes two rows; this keeps
    /// the cleaned collection duplicate-free regardless of cleaning order.
    fn dedup_key(&self) -> (String, String, String, Option<u32>, Option<String>) {
        (
            self.airline.clone(),
            self.source_airport.clone(),
            self.destination_airport.clone(),
            self.destination_airport_id,
            self.equipment.clone(),
        )
    }
}

/// Cleaned route feed plus the row accounting the summary reports
#[derive(Debug)]
pub struct RouteFeed {
    pub routes: Vec<RouteRecord>,
    pub raw_rows: usize,
    pub duplicates_removed: usize,
    pub missing_destination_id: usize,
}

/// Load and clean the raw route feed.
///
/// Cleaning order: exact-duplicate removal, then dropping rows without a
/// destination-airport ID, then discarding the codeshare column, then
/// defaulting missing equipment. The destination ID is the row-validity
/// proxy: a row without it could never join anyway.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_route_feed<P: AsRef<Path>>(path: P) -> Result<RouteFeed> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::MissingFile(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut seen = HashSet::new();
    let mut rows: Vec<RouteRow> = Vec::new();
    let mut raw_rows = 0usize;
    let mut duplicates_removed = 0usize;

    // First occurrence wins; input order is otherwise preserved
    for row in reader.deserialize() {
        let row: RouteRow = row?;
        raw_rows += 1;
        if !seen.insert(row.dedup_key()) {
            duplicates_removed += 1;
            continue;
        }
        rows.push(row);
    }

    let mut routes = Vec::with_capacity(rows.len());
    let mut missing_destination_id = 0usize;
    for row in rows {
        let Some(destination_airport_id) = row.destination_airport_id else {
            missing_destination_id += 1;
            continue;
        };
        routes.push(RouteRecord {
            airline: row.airline,
            source_airport: row.source_airport,
            destination_airport: row.destination_airport,
            destination_airport_id,
            equipment: row.equipment.unwrap_or_else(|| UNKNOWN_EQUIPMENT.to_string()),
        });
    }

    info!(
        "Cleaned route feed: {} raw rows, {} duplicates removed, {} missing destination ID, {} kept",
        raw_rows,
        duplicates_removed,
        missing_destination_id,
        routes.len()
    );

    Ok(RouteFeed {
        routes,
        raw_rows,
        duplicates_removed,
        missing_destination_id,
    })
}
