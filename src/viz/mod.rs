// Presentation layer: figure documents built from the enriched snapshot

pub mod figure;
pub mod filter;
pub mod traces;

pub use figure::{airline_dropdown_figure, filtered_figure, sample_figure, Figure};
pub use filter::FlightSelection;
pub use traces::{sample_routes, ScatterGeo};
