//! Dataset Loader Module
//! Fetches the remote race CSV and cleans it with Polars.

use polars::prelude::*;
use std::io::{Cursor, Read};
use thiserror::Error;

use super::dataset::{RaceDataset, RaceRecord};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] ureq::Error),
    #[error("failed to read dataset response: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("dataset has no usable rows")]
    Empty,
}

/// Handles remote CSV fetching and load-time cleaning with Polars.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Fetch the dataset from `url` and build the cleaned in-memory table.
    /// Any failure here is fatal for the dashboard; there is no retry.
    pub fn fetch(url: &str) -> Result<RaceDataset, DatasetError> {
        let response = ureq::get(url).call()?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Self::from_csv_bytes(bytes)
    }

    /// Parse CSV bytes using Polars.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<RaceDataset, DatasetError> {
        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;
        Self::from_frame(&df)
    }

    /// Extract cleaned records from the raw frame: rows missing `distance`
    /// or `elevation_gain` are dropped, `country` is trimmed and
    /// title-cased, missing `aid_stations` counts as zero.
    fn from_frame(df: &DataFrame) -> Result<RaceDataset, DatasetError> {
        let race = Self::column(df, "race")?;
        let country = Self::column(df, "country")?;
        let distance = Self::numeric_column(df, "distance")?;
        let elevation = Self::numeric_column(df, "elevation_gain")?;
        let aid_stations = Self::numeric_column(df, "aid_stations")?;

        let distance = distance.f64()?;
        let elevation = elevation.f64()?;
        let aid_stations = aid_stations.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(distance), Some(elevation_gain)) = (distance.get(i), elevation.get(i))
            else {
                continue;
            };
            if distance.is_nan() || elevation_gain.is_nan() {
                continue;
            }

            records.push(RaceRecord {
                race: Self::string_at(race, i).unwrap_or_default(),
                distance,
                elevation_gain,
                country: Self::string_at(country, i)
                    .map(|c| title_case(&c))
                    .unwrap_or_default(),
                aid_stations: aid_stations.get(i).filter(|v| !v.is_nan()).unwrap_or(0.0),
            });
        }

        RaceDataset::new(records)
    }

    fn column<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Column, DatasetError> {
        df.column(name).map_err(|_| DatasetError::MissingColumn(name))
    }

    fn numeric_column(df: &DataFrame, name: &'static str) -> Result<Column, DatasetError> {
        Ok(Self::column(df, name)?.cast(&DataType::Float64)?)
    }

    fn string_at(column: &Column, i: usize) -> Option<String> {
        match column.get(i) {
            Ok(value) if !value.is_null() => {
                Some(value.to_string().trim_matches('"').to_string())
            }
            _ => None,
        }
    }
}

/// Trim and title-case a country value ("  new zealand " -> "New Zealand").
fn title_case(s: &str) -> String {
    s.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
