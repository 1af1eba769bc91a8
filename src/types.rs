use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Airport reference entry, keyed by IATA code in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A cleaned route from the feed. The codeshare flag has already been
/// discarded and equipment is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRecord {
    pub airline: String,
    pub source_airport: String,
    pub destination_airport: String,
    pub destination_airport_id: u32,
    pub equipment: String,
}

/// A route joined with the full airport record for both ends. Exists only
/// when both airport lookups succeeded, so geolocation is always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRoute {
    pub airline: String,
    /// Full carrier name from the airline directory; `None` when the code
    /// did not match an active carrier. Callers needing a label must handle
    /// the unlabeled case.
    pub airline_name: Option<String>,
    pub equipment: String,
    pub destination_airport_id: u32,
    pub source: AirportRecord,
    pub destination: AirportRecord,
}

/// Airline directory entry with a usable IATA code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRecord {
    pub iata: String,
    pub name: String,
    pub active: bool,
}

/// Immutable snapshot handed to the presentation layer. Constructed once
/// per pipeline run and never mutated afterwards, so sharing it read-only
/// across request handlers is safe.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedDataset {
    pub routes: Vec<EnrichedRoute>,
    /// Sorted unique airline full names present in the routes
    pub airline_names: Vec<String>,
    /// Sorted union of source and destination countries
    pub countries: Vec<String>,
    pub loaded_at: DateTime<Utc>,
}

impl EnrichedDataset {
    pub fn new(routes: Vec<EnrichedRoute>) -> Self {
        let airline_names: BTreeSet<String> = routes
            .iter()
            .filter_map(|r| r.airline_name.clone())
            .collect();
        let countries: BTreeSet<String> = routes
            .iter()
            .flat_map(|r| [r.source.country.clone(), r.destination.country.clone()])
            .collect();

        Self {
            routes,
            airline_names: airline_names.into_iter().collect(),
            countries: countries.into_iter().collect(),
            loaded_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Source countries ranked by flight count, busiest first. Ties break
    /// alphabetically so the ranking is stable across runs.
    pub fn top_source_countries(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for route in &self.routes {
            *counts.entry(route.source.country.as_str()).or_default() += 1;
        }
        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(country, count)| (country.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}
