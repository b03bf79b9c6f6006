//! Projection Data
//!
//! Turns raw weekly box scores into labeled samples for the weekly fantasy
//! performance classifier. Each sample describes a player's three most recent
//! weeks and is labeled with the points bucket of the following week. Samples
//! anchored at the latest week in the data form the testing set; all earlier
//! ones form the training set.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod reader;
pub mod splitter;
pub mod window;
pub mod writer;


pub use config::ProjectionConfig;
pub use engine::ProjectionEngine;
pub use error::{ProjectionError, Result};
pub use models::*;
pub use reader::{DatasetReader, LoadedDataset};
pub use splitter::{DatasetSplitter, Partition};
pub use window::{FeatureWindowBuilder, WindowOutcome};
pub use writer::DatasetWriter;
