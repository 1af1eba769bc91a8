use serde::Deserialize;

use crate::constants::{ALL_AIRLINES, ALL_COUNTRIES};
use crate::types::{EnrichedDataset, EnrichedRoute};

/// Selector state for the filtered map variants. Deserializes directly
/// from the interactive variant's query string; absent, empty, or
/// wildcard values mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightSelection {
    pub airline: Option<String>,
    pub country: Option<String>,
}

impl FlightSelection {
    pub fn new(airline: Option<String>, country: Option<String>) -> Self {
        Self { airline, country }
    }

    /// Active airline filter, `None` when unset or the wildcard
    pub fn airline_filter(&self) -> Option<&str> {
        self.airline
            .as_deref()
            .filter(|value| !value.is_empty() && *value != ALL_AIRLINES)
    }

    /// Active country filter, `None` when unset or the wildcard
    pub fn country_filter(&self) -> Option<&str> {
        self.country
            .as_deref()
            .filter(|value| !value.is_empty() && *value != ALL_COUNTRIES)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.airline_filter().is_none() && self.country_filter().is_none()
    }

    /// Select matching routes from the snapshot. The airline selector
    /// matches the full carrier name; the country selector matches either
    /// end of the route. An empty result is a valid outcome the caller
    /// renders as "no data".
    pub fn apply<'a>(&self, dataset: &'a EnrichedDataset) -> Vec<&'a EnrichedRoute> {
        dataset
            .routes
            .iter()
            .filter(|route| {
                if let Some(airline) = self.airline_filter() {
                    if route.airline_name.as_deref() != Some(airline) {
                        return false;
                    }
                }
                if let Some(country) = self.country_filter() {
                    if route.source.country != country && route.destination.country != country {
                        return false;
                    }
                }
                true
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AirportRecord;

    fn airport(iata: &str, country: &str) -> AirportRecord {
        AirportRecord {
            iata: iata.to_string(),
            name: format!("{iata} Field"),
            city: iata.to_lowercase(),
            country: country.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn dataset() -> EnrichedDataset {
        EnrichedDataset::new(vec![
            EnrichedRoute {
                airline: "XX".to_string(),
                airline_name: Some("Example Air".to_string()),
                equipment: "CR2".to_string(),
                destination_airport_id: 1,
                source: airport("AAA", "C1"),
                destination: airport("BBB", "C2"),
            },
            EnrichedRoute {
                airline: "YY".to_string(),
                airline_name: None,
                equipment: "73G".to_string(),
                destination_airport_id: 2,
                source: airport("BBB", "C2"),
                destination: airport("CCC", "C3"),
            },
        ])
    }

    #[test]
    fn wildcards_and_empty_values_select_everything() {
        let dataset = dataset();
        let all = FlightSelection::new(
            Some(ALL_AIRLINES.to_string()),
            Some(ALL_COUNTRIES.to_string()),
        );
        assert_eq!(all.apply(&dataset).len(), 2);
        assert!(all.is_unfiltered());

        let empty = FlightSelection::new(Some(String::new()), None);
        assert_eq!(empty.apply(&dataset).len(), 2);
    }

    #[test]
    fn airline_filter_matches_full_name_only() {
        let dataset = dataset();
        let selection = FlightSelection::new(Some("Example Air".to_string()), None);
        let selected = selection.apply(&dataset);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].airline, "XX");
    }

    #[test]
    fn country_filter_matches_either_end() {
        let dataset = dataset();
        let selection = FlightSelection::new(None, Some("C2".to_string()));
        assert_eq!(selection.apply(&dataset).len(), 2);

        let narrow = FlightSelection::new(None, Some("C3".to_string()));
        let selected = narrow.apply(&dataset);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].airline, "YY");
    }

    #[test]
    fn unmatched_country_yields_empty_not_error() {
        let dataset = dataset();
        let selection = FlightSelection::new(None, Some("Nowhere".to_string()));
        assert!(selection.apply(&dataset).is_empty());
    }

    #[test]
    fn combined_filters_intersect() {
        let dataset = dataset();
        let selection =
            FlightSelection::new(Some("Example Air".to_string()), Some("C3".to_string()));
        assert!(selection.apply(&dataset).is_empty());
    }
}
