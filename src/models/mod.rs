//! Data models

pub mod record;
pub mod filter;

pub use record::*;
pub use filter::*;
