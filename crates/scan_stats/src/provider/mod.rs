//! The read-through cached stat provider and its statistic catalog.

mod cached;
mod catalog;

pub use cached::{build_providers, ProviderError, ProviderSet, StatFetcher, StatProvider};
pub use catalog::{cache_key, Scope, StatKind};
