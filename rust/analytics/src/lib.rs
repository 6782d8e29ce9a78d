//! # handlens-analytics: Job Score Analytics
//!
//! Turns the per-player score series of a job (one value per completed hand) into
//! per-iteration statistics, chart-ready downsampled series and a ranked list of
//! interesting hands.
//!
//! ## Core Modules
//!
//! - [`series`] - Job score series keyed by player name
//! - [`stats`] - Per-iteration mean, variance, standard deviation and range
//! - [`highlights`] - Heuristic detection of interesting iterations
//! - [`downsample`] - Bucket averaging for charts
//!
//! ## Quick Start
//!
//! ```rust
//! use handlens_analytics::highlights::Detector;
//! use handlens_analytics::series::JobScores;
//! use handlens_analytics::stats::aggregate;
//!
//! let scores = JobScores::from_json(r#"{"alice": [100, 150, 90], "bob": [100, 80, 200]}"#)
//!     .expect("valid series");
//! let stats = aggregate(&scores);
//! assert_eq!(stats[1].mean, 115.0);
//! assert_eq!(stats[1].standard_deviation, 35.0);
//!
//! let highlights = Detector::default().detect(&stats);
//! assert!(highlights.len() <= 10);
//! ```

pub mod downsample;
pub mod errors;
pub mod highlights;
pub mod series;
pub mod stats;

pub use errors::AnalyticsError;
