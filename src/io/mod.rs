//! Input/output helpers.
//!
//! - CSV ingest + cleaning (`ingest`)
//! - ranking/summary exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
