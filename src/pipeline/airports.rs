use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::{PipelineError, Result};
use crate::types::AirportRecord;

/// Raw airport row as it appears in the reference file. Every field is
/// optional at this stage; rows missing anything the join needs are
/// excluded from the registry rather than carried as partial records.
#[derive(Debug, Deserialize)]
struct AirportRow {
    #[serde(rename = "IATA")]
    iata: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
}

impl AirportRow {
    fn into_record(self) -> Option<AirportRecord> {
        let iata = self.iata.filter(|code| !code.trim().is_empty())?;
        Some(AirportRecord {
            iata,
            name: self.name?,
            city: self.city?,
            country: self.country?,
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// Load the airport reference file into a registry keyed by IATA code.
///
/// Duplicate codes resolve last-write-wins; airport codes are expected to
/// be unique, so a duplicate is a data-quality concern for the source, not
/// a condition this loader masks. Malformed numeric fields propagate as
/// parse failures.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_airport_registry<P: AsRef<Path>>(path: P) -> Result<HashMap<String, AirportRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::MissingFile(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut registry: HashMap<String, AirportRecord> = HashMap::new();
    let mut unusable = 0usize;

    for row in reader.deserialize() {
        let row: AirportRow = row?;
        let Some(record) = row.into_record() else {
            unusable += 1;
            continue;
        };
        if let Some(previous) = registry.insert(record.iata.clone(), record) {
            debug!("Duplicate IATA code {}, keeping the later entry", previous.iata);
        }
    }

    info!(
        "Loaded {} airports ({} rows unusable for joins)",
        registry.len(),
        unusable
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_registry_keyed_by_iata() {
        let file = write_fixture(
            "Name,City,Country,IATA,Latitude,Longitude\n\
             Alpha Field,X,C1,AAA,0,0\n\
             Beta Field,Y,C2,BBB,10,10\n",
        );
        let registry = load_airport_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry["AAA"].country, "C1");
        assert_eq!(registry["BBB"].latitude, 10.0);
    }

    #[test]
    fn skips_rows_without_coordinates_or_code() {
        let file = write_fixture(
            "Name,City,Country,IATA,Latitude,Longitude\n\
             Alpha Field,X,C1,AAA,0,0\n\
             No Coords,Y,C2,BBB,,\n\
             No Code,Z,C3,,5,5\n",
        );
        let registry = load_airport_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_key("AAA"));
    }

    #[test]
    fn duplicate_codes_resolve_last_write_wins() {
        let file = write_fixture(
            "Name,City,Country,IATA,Latitude,Longitude\n\
             First,X,C1,AAA,0,0\n\
             Second,Y,C2,AAA,10,10\n",
        );
        let registry = load_airport_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry["AAA"].name, "Second");
    }

    #[test]
    fn missing_file_is_a_load_time_error() {
        let err = load_airport_registry("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, PipelineError::MissingFile(_)));
    }

    #[test]
    fn malformed_latitude_propagates_parse_failure() {
        let file = write_fixture(
            "Name,City,Country,IATA,Latitude,Longitude\n\
             Alpha Field,X,C1,AAA,not-a-number,0\n",
        );
        let err = load_airport_registry(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Csv(_)));
    }
}
