//! Aggregators over the cleaned dataset.
//!
//! Every function here borrows the immutable record slice and returns a new
//! derived value; nothing retains state between calls.
//!
//! - `trend`: per-year category mode
//! - `outliers`: per-category Tukey-fence trimming and quantiles
//! - `rank`: top-N channels by metric within a category
//! - `summary`: per-category means and descriptive statistics

pub mod outliers;
pub mod rank;
pub mod summary;
pub mod trend;

pub use outliers::*;
pub use rank::*;
pub use summary::*;
pub use trend::*;
