//! Matching and ranking.
//!
//! - [`scorer`]: the tiered similarity function shared by the catalog providers
//! - [`aggregator`]: fans a query out to every provider, merges and stably
//!   sorts the results, and appends the fallback item

pub mod aggregator;
pub mod scorer;

pub use aggregator::{aggregate, Aggregator};
pub use scorer::{effective_score, score};
