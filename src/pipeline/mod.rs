// Data enrichment pipeline: load, clean, join, and label routes

pub mod airlines;
pub mod airports;
pub mod enrich;
pub mod routes;
pub mod run;

pub use airlines::{airline_name_map, attach_airline_names, load_airline_directory};
pub use airports::load_airport_registry;
pub use enrich::{enrich_routes, EnrichmentOutcome};
pub use routes::{load_route_feed, RouteFeed};
pub use run::{Pipeline, PipelineSummary};
