use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use askama::Template;
use serde::Serialize;

use flightmap::config::{Config, DataConfig};
use flightmap::constants::{ALL_AIRLINES, ALL_COUNTRIES};
use flightmap::pipeline::Pipeline;
use flightmap::viz::{filtered_figure, FlightSelection};

mod state;
mod templates;

use state::AppState;
use templates::IndexTemplate;

#[derive(Serialize)]
struct OptionsResponse {
    airlines: Vec<String>,
    countries: Vec<String>,
}

fn selector_options(state: &AppState) -> OptionsResponse {
    let mut airlines = vec![ALL_AIRLINES.to_string()];
    airlines.extend(state.dataset.airline_names.iter().cloned());
    let mut countries = vec![ALL_COUNTRIES.to_string()];
    countries.extend(state.dataset.countries.iter().cloned());
    OptionsResponse {
        airlines,
        countries,
    }
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let options = selector_options(&state);
    let template = IndexTemplate {
        airlines: options.airlines,
        countries: options.countries,
    };
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => Html(format!("Template error: {}", e)).into_response(),
    }
}

/// Figure for the current selection, recomputed synchronously on every
/// request. The snapshot itself is never mutated, so no caching and no
/// locking are needed.
async fn figure_handler(
    State(state): State<AppState>,
    Query(selection): Query<FlightSelection>,
) -> impl IntoResponse {
    Json(filtered_figure(&state.dataset, &selection))
}

async fn options_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(selector_options(&state))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "flightmap-web",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn load_data_config() -> DataConfig {
    match Config::load() {
        Ok(config) => config.data,
        Err(_) => DataConfig::with_base_dir("data".into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = load_data_config();
    let (dataset, summary) = Pipeline::run_with_airlines(&data)?;
    println!(
        "📦 Snapshot ready: {} enriched routes ({} labeled)",
        summary.enriched_routes, summary.labeled_routes
    );

    let app_state = AppState {
        dataset: Arc::new(dataset),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/api/figure", get(figure_handler))
        .route("/api/options", get(options_handler))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("Flight map running on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;
    Ok(())
}
