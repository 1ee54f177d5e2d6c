//! Data module - Dataset model and remote CSV loading

mod dataset;
mod loader;

pub use dataset::{RaceDataset, RaceRecord};
pub use loader::{DatasetError, DatasetLoader};
