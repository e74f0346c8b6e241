//! FAC scoring: flag ions selectively enriched in groups of biological replicates
//!
//! This library turns a table of peak areas (samples × ions, each sample
//! assigned to a group) into one score per group and ion. The score grows with
//! how strongly an ion is enriched in its group relative to every other sample.
//!
//! The main components of this library are:
//! - `FacScore`: The scoring pipeline (aggregation, ratio, log transform,
//!   z-score, sign gate, normalization)
//! - `FacConfig`: Run configuration, including the `Normalization` scheme and
//!   the `DegeneratePolicy` for groups whose log means have no spread
//! - `PeakTable`, `IonMatrix`, `ScoreTable`: The input and derived tables
//! - `io`: Loading peak tables and writing score tables as CSV/TSV
//!
//! Score tables list groups in lexicographic order of their labels and ions in
//! the order of the input header, followed by the `max_value` column.
//!
//! ```no_run
//! use facscore::{io, FacConfig, FacScore};
//!
//! let config = FacConfig::default();
//! let table = io::read_peak_table("peaks.csv", &config.group_column, None)?;
//! let results = FacScore::new(&table, config).run()?;
//! io::write_score_table("scores.csv", &results.normalized)?;
//! # Ok::<(), facscore::FacError>(())
//! ```

mod aggregate;
mod config;
mod error;
pub mod io;
mod math;
mod pipeline;
mod ratio;
mod results;
mod score;
mod table;
mod transform;
mod utils;
mod zscore;

pub use aggregate::{aggregate, GroupMeans};
pub use config::{
    DegeneratePolicy, FacConfig, Normalization, DEFAULT_FIXED_OFFSET, DEFAULT_GROUP_COLUMN,
    DEFAULT_REFERENCE_GROUP,
};
pub use error::{FacError, Result};
pub use math::RATIO_SENTINEL;
pub use pipeline::FacScore;
pub use ratio::abundance_ratio;
pub use results::FacResults;
pub use score::{gate_multiplier, is_gated, raw_scores, ScoreTable, MAX_VALUE_COLUMN};
pub use table::{IonMatrix, PeakTable};
pub use transform::log_transform;
pub use zscore::zscore;
