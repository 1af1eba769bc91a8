use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::{
    DEFAULT_SAMPLE_SIZE, DESTINATION_MARKER_COLOR, SAMPLE_SEED, SOURCE_MARKER_COLOR,
};
use crate::types::{EnrichedDataset, EnrichedRoute};
use crate::viz::filter::FlightSelection;
use crate::viz::traces::{
    airport_markers, route_line, sample_routes, ColorPicker, Endpoint, ScatterGeo,
};

/// A Plotly-compatible figure document: trace list plus layout
#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<ScatterGeo>,
    pub layout: Value,
}

fn geo_layout(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "showlegend": true,
        "height": 650,
        "margin": { "r": 0, "t": 50, "l": 0, "b": 0 },
        "geo": {
            "projection": { "type": "natural earth" },
            "showcountries": true,
            "landcolor": "lightgrey",
            "showocean": true,
            "oceancolor": "lightblue"
        }
    })
}

/// Lines for every route in the slice plus the two endpoint marker
/// traces, the shape every map variant shares
fn route_traces(routes: &[&EnrichedRoute], colors: &mut ColorPicker, width: f64) -> Vec<ScatterGeo> {
    let mut traces: Vec<ScatterGeo> = routes
        .iter()
        .map(|route| route_line(route, colors.pick(), width))
        .collect();
    traces.push(airport_markers(
        routes,
        Endpoint::Source,
        SOURCE_MARKER_COLOR,
        "Source Airports",
    ));
    traces.push(airport_markers(
        routes,
        Endpoint::Destination,
        DESTINATION_MARKER_COLOR,
        "Destination Airports",
    ));
    traces
}

/// Figure over a seeded random sample of the whole snapshot
pub fn sample_figure(dataset: &EnrichedDataset, sample_size: usize, seed: u64) -> Figure {
    let all: Vec<&EnrichedRoute> = dataset.routes.iter().collect();
    let sampled = sample_routes(&all, sample_size, seed);
    let mut colors = ColorPicker::new(seed);

    let title = format!("Sample of {} Global Flight Paths", sampled.len());
    Figure {
        data: route_traces(&sampled, &mut colors, 1.0),
        layout: geo_layout(&title),
    }
}

/// Figure for one airline/country selection. Results are sampled only
/// when both selectors are wildcards; a selection that matches nothing
/// produces an empty figure, not an error.
pub fn filtered_figure(dataset: &EnrichedDataset, selection: &FlightSelection) -> Figure {
    let layout = geo_layout("Flight Paths by Airline and Country");
    let filtered = selection.apply(dataset);
    if filtered.is_empty() {
        return Figure {
            data: Vec::new(),
            layout,
        };
    }

    let shown = if selection.is_unfiltered() {
        sample_routes(&filtered, DEFAULT_SAMPLE_SIZE, SAMPLE_SEED)
    } else {
        filtered
    };

    let mut colors = ColorPicker::new(SAMPLE_SEED);
    Figure {
        data: route_traces(&shown, &mut colors, 1.0),
        layout,
    }
}

/// Dropdown figure over the busiest airlines: each airline's sampled
/// traces are toggled by an updatemenus button, with a final Show All.
pub fn airline_dropdown_figure(
    dataset: &EnrichedDataset,
    top_n: usize,
    per_airline: usize,
    seed: u64,
) -> Figure {
    let top_airlines = top_airline_codes(dataset, top_n);
    let mut colors = ColorPicker::new(seed);

    let mut data: Vec<ScatterGeo> = Vec::new();
    let mut group_sizes: Vec<(String, usize)> = Vec::new();

    for (i, code) in top_airlines.iter().enumerate() {
        let routes: Vec<&EnrichedRoute> = dataset
            .routes
            .iter()
            .filter(|route| route.airline == *code)
            .collect();
        // Offset seed per airline so groups draw distinct samples
        let sampled = sample_routes(&routes, per_airline, seed + i as u64);
        let visible = i == 0;

        let mut group: Vec<ScatterGeo> = sampled
            .iter()
            .map(|route| {
                let mut trace = route_line(route, colors.pick(), 1.2);
                trace.name = Some(format!("{code} Route"));
                trace.visible = Some(visible);
                trace
            })
            .collect();

        let mut source = airport_markers(
            &sampled,
            Endpoint::Source,
            colors.pick(),
            &format!("{code} Source"),
        );
        source.visible = Some(visible);
        group.push(source);

        let mut destination = airport_markers(
            &sampled,
            Endpoint::Destination,
            colors.pick(),
            &format!("{code} Destination"),
        );
        destination.visible = Some(visible);
        group.push(destination);

        group_sizes.push((code.clone(), group.len()));
        data.extend(group);
    }

    let total_traces = data.len();
    let mut buttons = Vec::new();
    let mut offset = 0usize;
    for (code, size) in &group_sizes {
        let mut visibility = vec![false; total_traces];
        for slot in visibility.iter_mut().skip(offset).take(*size) {
            *slot = true;
        }
        buttons.push(json!({
            "args": [{ "visible": visibility }],
            "label": code,
            "method": "update"
        }));
        offset += size;
    }
    buttons.push(json!({
        "args": [{ "visible": vec![true; total_traces] }],
        "label": "Show All",
        "method": "update"
    }));

    let mut layout = geo_layout("Flight Paths by Airline");
    if let Some(layout_map) = layout.as_object_mut() {
        layout_map.insert(
            "updatemenus".to_string(),
            json!([{
                "buttons": buttons,
                "direction": "down",
                "showactive": true,
                "x": 0.1,
                "y": 1.1
            }]),
        );
    }

    Figure { data, layout }
}

/// Airline codes ranked by route count, busiest first; ties break on the
/// code so the ranking is stable
fn top_airline_codes(dataset: &EnrichedDataset, n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for route in &dataset.routes {
        *counts.entry(route.airline.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(n).map(|(code, _)| code.to_string()).collect()
}
