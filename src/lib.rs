//! Fashion-brand equity forecasting.
//!
//! [`model::train`] loads and cleans the brand table and fits a linear model
//! once; [`forecast::project`] compounds one brand's historical growth rates
//! over a list of years; [`report`] formats the result for display.

pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod model;
pub mod report;

pub use dataset::{BrandRecord, Dataset};
pub use error::{ConfigError, DataLoadError, ProjectionError, TrainError};
pub use forecast::{project, ProjectedEquity, Projection};
pub use model::{train, TrainedModel};
