use std::collections::HashMap;

use tracing::{info, instrument};

use crate::types::{AirportRecord, EnrichedRoute, RouteRecord};

/// Outcome of the airport join, with the drop count for run accounting
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub routes: Vec<EnrichedRoute>,
    pub unmatched_dropped: usize,
}

/// Join each route against the airport registry.
///
/// Source and destination codes are looked up independently; a route is
/// retained only when both lookups hit, so every enriched route carries
/// complete geolocation for both ends. An empty result is a valid state,
/// not an error. Airline names are attached in a later, non-filtering
/// step.
#[instrument(skip_all, fields(routes = routes.len(), airports = registry.len()))]
pub fn enrich_routes(
    routes: Vec<RouteRecord>,
    registry: &HashMap<String, AirportRecord>,
) -> EnrichmentOutcome {
    let mut enriched = Vec::with_capacity(routes.len());
    let mut unmatched_dropped = 0usize;

    for route in routes {
        let (Some(source), Some(destination)) = (
            registry.get(&route.source_airport),
            registry.get(&route.destination_airport),
        ) else {
            unmatched_dropped += 1;
            continue;
        };
        enriched.push(EnrichedRoute {
            airline: route.airline,
            airline_name: None,
            equipment: route.equipment,
            destination_airport_id: route.destination_airport_id,
            source: source.clone(),
            destination: destination.clone(),
        });
    }

    info!(
        "Enriched {} routes, dropped {} with unmatched airports",
        enriched.len(),
        unmatched_dropped
    );
    EnrichmentOutcome {
        routes: enriched,
        unmatched_dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(iata: &str, city: &str, country: &str, lat: f64, lon: f64) -> AirportRecord {
        AirportRecord {
            iata: iata.to_string(),
            name: format!("{iata} Field"),
            city: city.to_string(),
            country: country.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn route(src: &str, dst: &str) -> RouteRecord {
        RouteRecord {
            airline: "XX".to_string(),
            source_airport: src.to_string(),
            destination_airport: dst.to_string(),
            destination_airport_id: 2,
            equipment: "CR2".to_string(),
        }
    }

    fn registry() -> HashMap<String, AirportRecord> {
        let mut registry = HashMap::new();
        registry.insert("AAA".to_string(), airport("AAA", "X", "C1", 0.0, 0.0));
        registry.insert("BBB".to_string(), airport("BBB", "Y", "C2", 10.0, 10.0));
        registry
    }

    #[test]
    fn both_lookups_must_hit() {
        let outcome = enrich_routes(
            vec![route("AAA", "BBB"), route("AAA", "ZZZ"), route("ZZZ", "BBB")],
            &registry(),
        );
        assert_eq!(outcome.routes.len(), 1);
        assert_eq!(outcome.unmatched_dropped, 2);

        let enriched = &outcome.routes[0];
        assert_eq!(enriched.source.country, "C1");
        assert_eq!(enriched.destination.country, "C2");
        assert_eq!(enriched.destination.latitude, 10.0);
    }

    #[test]
    fn same_airport_can_appear_on_either_end() {
        let outcome = enrich_routes(vec![route("AAA", "BBB"), route("BBB", "AAA")], &registry());
        assert_eq!(outcome.routes.len(), 2);
        assert_eq!(outcome.routes[0].source.iata, "AAA");
        assert_eq!(outcome.routes[1].source.iata, "BBB");
    }

    #[test]
    fn empty_result_is_valid() {
        let outcome = enrich_routes(vec![route("YYY", "ZZZ")], &registry());
        assert!(outcome.routes.is_empty());
        assert_eq!(outcome.unmatched_dropped, 1);
    }
}
