use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::constants::COLOR_POOL;
use crate::types::EnrichedRoute;

/// A single Plotly-compatible scattergeo trace. Only the fields the map
/// variants use are modeled; optional fields are omitted from the JSON
/// when unset.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterGeo {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub mode: &'static str,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    pub hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: String,
    pub opacity: f64,
}

/// Which end of a route a marker trace plots
#[derive(Debug, Clone, Copy)]
pub enum Endpoint {
    Source,
    Destination,
}

/// Line trace for one flight path
pub fn route_line(route: &EnrichedRoute, color: &str, width: f64) -> ScatterGeo {
    ScatterGeo {
        trace_type: "scattergeo",
        mode: "lines",
        lon: vec![route.source.longitude, route.destination.longitude],
        lat: vec![route.source.latitude, route.destination.latitude],
        line: Some(LineStyle {
            width,
            color: color.to_string(),
        }),
        marker: None,
        hoverinfo: "text",
        text: Some(hover_label(route)),
        name: None,
        showlegend: false,
        visible: None,
    }
}

/// Marker trace for one end of every route in the slice
pub fn airport_markers(
    routes: &[&EnrichedRoute],
    endpoint: Endpoint,
    color: &str,
    name: &str,
) -> ScatterGeo {
    let (lon, lat): (Vec<f64>, Vec<f64>) = routes
        .iter()
        .map(|route| match endpoint {
            Endpoint::Source => (route.source.longitude, route.source.latitude),
            Endpoint::Destination => (route.destination.longitude, route.destination.latitude),
        })
        .unzip();

    ScatterGeo {
        trace_type: "scattergeo",
        mode: "markers",
        lon,
        lat,
        line: None,
        marker: Some(MarkerStyle {
            size: 4,
            color: color.to_string(),
            opacity: 0.7,
        }),
        hoverinfo: "skip",
        text: None,
        name: Some(name.to_string()),
        showlegend: true,
        visible: None,
    }
}

fn hover_label(route: &EnrichedRoute) -> String {
    let base = format!(
        "{}, {} ➝ {}, {}",
        route.source.city, route.source.country, route.destination.city, route.destination.country
    );
    match &route.airline_name {
        Some(name) => format!("{base} ({name})"),
        None => base,
    }
}

/// Deterministic sample of up to `n` routes. Collections at or under the
/// limit pass through untouched, in order.
pub fn sample_routes<'a>(routes: &[&'a EnrichedRoute], n: usize, seed: u64) -> Vec<&'a EnrichedRoute> {
    if routes.len() <= n {
        return routes.to_vec();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, routes.len(), n)
        .into_iter()
        .map(|i| routes[i])
        .collect()
}

/// Seeded color stream for line traces
pub struct ColorPicker {
    rng: StdRng,
}

impl ColorPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self) -> &'static str {
        COLOR_POOL[self.rng.gen_range(0..COLOR_POOL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AirportRecord;

    fn route() -> EnrichedRoute {
        EnrichedRoute {
            airline: "XX".to_string(),
            airline_name: Some("Example Air".to_string()),
            equipment: "CR2".to_string(),
            destination_airport_id: 2,
            source: AirportRecord {
                iata: "AAA".to_string(),
                name: "Alpha Field".to_string(),
                city: "X".to_string(),
                country: "C1".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            },
            destination: AirportRecord {
                iata: "BBB".to_string(),
                name: "Beta Field".to_string(),
                city: "Y".to_string(),
                country: "C2".to_string(),
                latitude: 10.0,
                longitude: 20.0,
            },
        }
    }

    #[test]
    fn route_line_spans_both_endpoints() {
        let trace = route_line(&route(), "blue", 1.0);
        assert_eq!(trace.lon, vec![0.0, 20.0]);
        assert_eq!(trace.lat, vec![0.0, 10.0]);
        assert_eq!(trace.text.as_deref(), Some("X, C1 ➝ Y, C2 (Example Air)"));
        assert!(!trace.showlegend);
    }

    #[test]
    fn unlabeled_routes_hover_without_airline() {
        let mut unlabeled = route();
        unlabeled.airline_name = None;
        let trace = route_line(&unlabeled, "blue", 1.0);
        assert_eq!(trace.text.as_deref(), Some("X, C1 ➝ Y, C2"));
    }

    #[test]
    fn sampling_is_deterministic_for_a_seed() {
        let routes: Vec<EnrichedRoute> = (0..50)
            .map(|i| {
                let mut r = route();
                r.destination_airport_id = i;
                r
            })
            .collect();
        let refs: Vec<&EnrichedRoute> = routes.iter().collect();

        let first = sample_routes(&refs, 10, 42);
        let second = sample_routes(&refs, 10, 42);
        let ids = |sample: &[&EnrichedRoute]| {
            sample.iter().map(|r| r.destination_airport_id).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.len(), 10);
    }

    #[test]
    fn small_collections_pass_through_unsampled() {
        let routes = [route(), route()];
        let refs: Vec<&EnrichedRoute> = routes.iter().collect();
        assert_eq!(sample_routes(&refs, 300, 42).len(), 2);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let trace = route_line(&route(), "blue", 1.0);
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scattergeo");
        assert!(json.get("marker").is_none());
        assert!(json.get("visible").is_none());
    }
}
