//! Race Dataset Module
//! Immutable in-memory table of race records, loaded once at startup.

use std::collections::BTreeSet;

use super::loader::DatasetError;

/// A single race event. Every retained record has usable `distance` and
/// `elevation_gain` values; `country` is already trimmed and title-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceRecord {
    pub race: String,
    /// Distance in miles.
    pub distance: f64,
    /// Elevation gain in feet.
    pub elevation_gain: f64,
    pub country: String,
    pub aid_stations: f64,
}

/// The full race table plus precomputed filter bounds. Never mutated after
/// construction; shared by reference across all pipeline invocations.
#[derive(Debug, Clone)]
pub struct RaceDataset {
    records: Vec<RaceRecord>,
    distance_span: (f64, f64),
    countries: Vec<String>,
}

impl RaceDataset {
    /// Build a dataset from cleaned records, precomputing the distance
    /// span and the sorted country list for the filter controls.
    pub fn new(records: Vec<RaceRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in &records {
            min = min.min(record.distance);
            max = max.max(record.distance);
        }

        let countries: Vec<String> = records
            .iter()
            .filter(|r| !r.country.is_empty())
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            records,
            distance_span: (min, max),
            countries,
        })
    }

    pub fn records(&self) -> &[RaceRecord] {
        &self.records
    }

    /// Closed [min, max] interval over `distance`.
    pub fn distance_span(&self) -> (f64, f64) {
        self.distance_span
    }

    /// Distinct normalized country values, sorted, for the dropdown.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(race: &str, distance: f64, country: &str) -> RaceRecord {
        RaceRecord {
            race: race.to_string(),
            distance,
            elevation_gain: 1000.0,
            country: country.to_string(),
            aid_stations: 3.0,
        }
    }

    #[test]
    fn span_covers_min_and_max_distance() {
        let dataset = RaceDataset::new(vec![
            record("A", 31.0, "Usa"),
            record("B", 100.0, "France"),
            record("C", 50.0, "Usa"),
        ])
        .expect("dataset");
        assert_eq!(dataset.distance_span(), (31.0, 100.0));
    }

    #[test]
    fn countries_are_distinct_sorted_and_skip_empty() {
        let dataset = RaceDataset::new(vec![
            record("A", 10.0, "Usa"),
            record("B", 20.0, ""),
            record("C", 30.0, "France"),
            record("D", 40.0, "Usa"),
        ])
        .expect("dataset");
        assert_eq!(dataset.countries(), ["France", "Usa"]);
    }

    #[test]
    fn empty_record_set_is_rejected() {
        assert!(matches!(
            RaceDataset::new(Vec::new()),
            Err(DatasetError::Empty)
        ));
    }
}
