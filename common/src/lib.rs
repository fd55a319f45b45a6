//! moneyfx Common Types
//!
//! Shared value types used across the moneyfx workspace: currency codes,
//! conversion pairs and the base-relative rate table.

pub mod monetary;
pub mod rates;

pub use monetary::*;
pub use rates::*;
