//! Streaming analytics over measurement logs: CDFs, dense time-series
//! bucketing, reservoir sampling, streaming percentile estimation, online
//! summary statistics, and paired significance testing.

pub mod cdf;
pub mod error;
pub mod percentile;
pub mod reservoir;
pub mod summary;
pub mod timeseries;
pub mod ttest;

pub use cdf::{cdf, CdfPoint};
pub use error::AnalyticsError;
pub use percentile::percentile;
pub use reservoir::{sample, stable_seed, Sample};
pub use summary::{summarize, Summary};
pub use timeseries::{timeseries, TimeseriesPoint};
pub use ttest::{t_test, Difference};
