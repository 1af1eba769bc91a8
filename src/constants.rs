/// Sentinels, defaults, and file names shared across the pipeline and the
/// presentation layer.

// Missing-value marker used by the airline directory
pub const NA_SENTINEL: &str = "\\N";

// Active-carrier flag as encoded in the airline directory
pub const AIRLINE_ACTIVE_FLAG: &str = "Y";

// Fallback for routes missing an aircraft type
pub const UNKNOWN_EQUIPMENT: &str = "Unknown";

// Selector wildcards understood by the filter layer
pub const ALL_AIRLINES: &str = "All Airlines";
pub const ALL_COUNTRIES: &str = "All Countries";

// Default file names inside the data directory
pub const AIRPORTS_FILE: &str = "airports.csv";
pub const ROUTES_FILE: &str = "routes.csv";
pub const AIRLINES_FILE: &str = "airlines.dat";

// Sampling defaults for the map variants
pub const DEFAULT_SAMPLE_SIZE: usize = 300;
pub const AIRLINE_SAMPLE_SIZE: usize = 150;
pub const TOP_AIRLINES: usize = 10;
pub const SAMPLE_SEED: u64 = 42;

// Color pool for flight-path traces
pub const COLOR_POOL: &[&str] = &[
    "blue", "purple", "orange", "teal", "magenta", "cyan", "limegreen", "gold", "pink", "coral",
    "darkred", "olive",
];

// Marker colors for the filtered map endpoints
pub const SOURCE_MARKER_COLOR: &str = "limegreen";
pub const DESTINATION_MARKER_COLOR: &str = "red";
