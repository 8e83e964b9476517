//! # fpentropy-core
//!
//! **How much does your window size give away?**
//!
//! `fpentropy-core` measures the identifying information carried by browser
//! screen-resolution fingerprints, both as observed and after simulating a
//! window-resizing defense that rounds and caps the inner window size.
//!
//! ## Quick Start
//!
//! ```
//! use fpentropy_core::{FilterBounds, Histogram, ResizeConfig, SweepOptions, filter, sweep};
//!
//! let counts: Histogram = [
//!     ("1366x768x24", 40u64),
//!     ("1920x1080x24", 35),
//!     ("1280x1024x24", 15),
//!     ("1440x900x24", 10),
//! ]
//! .into_iter()
//! .collect();
//!
//! let usable = filter(&counts, &FilterBounds::default());
//! let report = sweep(&usable, &[ResizeConfig::default()], &SweepOptions::seeded(7)).unwrap();
//! let best = report.by_entropy()[0];
//! assert_eq!(report.results().len(), 1);
//! assert!(best.utilization > 0.0 && best.utilization <= 1.0);
//! ```
//!
//! ## Architecture
//!
//! Ingest → Filter → Resize (per entry) → Aggregate → Entropy → Rank
//!
//! Every stage is a pure function of its input. The only state is the list of
//! sweep results, which the caller owns.

pub mod aggregate;
pub mod entropy;
pub mod error;
pub mod export;
pub mod filter;
pub mod histogram;
pub mod ingest;
pub mod resize;
pub mod resolution;
pub mod sweep;

pub use aggregate::{Aggregated, aggregate};
pub use entropy::{EntropySummary, min_entropy, shannon_entropy, surprisal};
pub use error::{Error, Result};
pub use export::{csv_file_name, sorted_by_count, write_csv, write_csv_file};
pub use filter::{FilterBounds, filter};
pub use histogram::Histogram;
pub use ingest::{InputFormat, read_counts, read_counts_path};
pub use resize::{
    AspectRatioCorrection, DEFAULT_TOOLBAR_HEIGHT, OUTPUT_COLOR_DEPTH, ResizeConfig, Resized,
    resize,
};
pub use resolution::{ParseError, Resolution};
pub use sweep::{
    MeasurementResult, RankKey, SweepOptions, SweepReport, load_configs, measure, presets, sweep,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
