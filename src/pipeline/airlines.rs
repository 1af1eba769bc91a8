use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::constants::{AIRLINE_ACTIVE_FLAG, NA_SENTINEL};
use crate::error::{PipelineError, Result};
use crate::types::{AirlineRecord, EnrichedRoute};

/// Raw airline directory row. The file has no header and a fixed
/// 8-column layout, so fields deserialize positionally.
#[derive(Debug, Deserialize)]
struct AirlineRow {
    _airline_id: Option<String>,
    name: Option<String>,
    _alias: Option<String>,
    iata: Option<String>,
    _icao: Option<String>,
    _callsign: Option<String>,
    _country: Option<String>,
    active: Option<String>,
}

/// Load the airline directory, keeping only entries with a usable IATA
/// code (present and not the `\N` marker) and a name. The active flag is
/// carried on the record; `airline_name_map` applies the active filter.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_airline_directory<P: AsRef<Path>>(path: P) -> Result<Vec<AirlineRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::MissingFile(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut carriers = Vec::new();

    for row in reader.deserialize() {
        let row: AirlineRow = row?;
        let Some(iata) = row.iata.filter(|code| !code.is_empty() && code != NA_SENTINEL) else {
            continue;
        };
        let Some(name) = row.name else {
            continue;
        };
        carriers.push(AirlineRecord {
            iata,
            name,
            active: row.active.as_deref() == Some(AIRLINE_ACTIVE_FLAG),
        });
    }

    info!("Loaded {} airline directory entries", carriers.len());
    Ok(carriers)
}

/// Mapping from airline IATA code to full name, restricted to active
/// carriers. Duplicate codes resolve last-write-wins, matching the
/// airport registry policy.
pub fn airline_name_map(carriers: &[AirlineRecord]) -> HashMap<String, String> {
    carriers
        .iter()
        .filter(|carrier| carrier.active)
        .map(|carrier| (carrier.iata.clone(), carrier.name.clone()))
        .collect()
}

/// Left-join airline full names onto enriched routes. Unlike the airport
/// join this never drops a row: routes without a matching carrier keep
/// `None` and stay in the collection. Returns how many routes were
/// labeled.
pub fn attach_airline_names(
    routes: &mut [EnrichedRoute],
    names: &HashMap<String, String>,
) -> usize {
    let mut labeled = 0usize;
    for route in routes.iter_mut() {
        route.airline_name = names.get(&route.airline).cloned();
        if route.airline_name.is_some() {
            labeled += 1;
        }
    }
    info!("Labeled {} of {} routes with airline names", labeled, routes.len());
    labeled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AirportRecord;
    use std::io::Write;

    fn write_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn enriched(airline: &str) -> EnrichedRoute {
        let airport = AirportRecord {
            iata: "AAA".to_string(),
            name: "Alpha Field".to_string(),
            city: "X".to_string(),
            country: "C1".to_string(),
            latitude: 0.0,
            longitude: 0.0,
        };
        EnrichedRoute {
            airline: airline.to_string(),
            airline_name: None,
            equipment: "CR2".to_string(),
            destination_airport_id: 2,
            source: airport.clone(),
            destination: airport,
        }
    }

    #[test]
    fn only_active_carriers_enter_the_name_map() {
        let file = write_fixture(
            "1,Example Air,\\N,XX,EXA,EXAMPLE,C1,Y\n\
             2,Other Air,\\N,YY,OTH,OTHER,C2,N\n",
        );
        let carriers = load_airline_directory(file.path()).unwrap();
        assert_eq!(carriers.len(), 2);

        let names = airline_name_map(&carriers);
        assert_eq!(names.len(), 1);
        assert_eq!(names["XX"], "Example Air");
    }

    #[test]
    fn sentinel_and_missing_codes_are_unusable() {
        let file = write_fixture(
            "1,No Code Air,\\N,\\N,NCA,NOCODE,C1,Y\n\
             2,Blank Air,\\N,,BLA,BLANK,C1,Y\n\
             3,Example Air,\\N,XX,EXA,EXAMPLE,C1,Y\n",
        );
        let carriers = load_airline_directory(file.path()).unwrap();
        assert_eq!(carriers.len(), 1);
        assert_eq!(carriers[0].iata, "XX");
    }

    #[test]
    fn unmatched_airlines_keep_the_route() {
        let mut routes = vec![enriched("XX"), enriched("QQ")];
        let mut names = HashMap::new();
        names.insert("XX".to_string(), "Example Air".to_string());

        let labeled = attach_airline_names(&mut routes, &names);
        assert_eq!(labeled, 1);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].airline_name.as_deref(), Some("Example Air"));
        assert_eq!(routes[1].airline_name, None);
    }

    #[test]
    fn missing_file_is_a_load_time_error() {
        let err = load_airline_directory("does/not/exist.dat").unwrap_err();
        assert!(matches!(err, PipelineError::MissingFile(_)));
    }
}
