//! Result aggregation across providers.
//!
//! One query produces one ranked list:
//!
//! 1. every provider is asked in registration order and the outputs are
//!    concatenated,
//! 2. the concatenation is stably sorted by descending score, so equal scores
//!    keep provider order and each provider's own order,
//! 3. exactly one fallback item is appended, whatever the query.
//!
//! Nothing is deduplicated here. Two providers returning the same name both
//! show up.

use crate::domain::ScoredItem;
use crate::providers::ItemProvider;

/// Merges `providers`' results for `query` into one ranked list ending with the
/// fallback item.
#[must_use]
pub fn aggregate(query: &str, providers: &[Box<dyn ItemProvider>]) -> Vec<ScoredItem> {
    let _span =
        tracing::debug_span!("aggregate", query_len = query.len(), providers = providers.len())
            .entered();

    let mut ranked: Vec<ScoredItem> = providers
        .iter()
        .flat_map(|provider| {
            let items = provider.search(query);
            tracing::trace!(provider = provider.name(), count = items.len(), "provider results");
            items
        })
        .collect();

    // `sort_by` is stable: ties keep concatenation order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.push(ScoredItem::fallback(query));

    tracing::debug!(result_count = ranked.len(), "aggregation complete");
    ranked
}

/// Ordered set of providers consulted for every query.
///
/// Registration order is significant: it breaks ties between equal scores.
#[derive(Default)]
pub struct Aggregator {
    providers: Vec<Box<dyn ItemProvider>>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider after all previously registered ones.
    pub fn register(&mut self, provider: Box<dyn ItemProvider>) {
        tracing::debug!(provider = provider.name(), "registering provider");
        self.providers.push(provider);
    }

    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn ItemProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Runs [`aggregate`] over the registered providers.
    #[must_use]
    pub fn aggregate(&self, query: &str) -> Vec<ScoredItem> {
        aggregate(query, &self.providers)
    }

    /// Mutable access to a registered provider by name, for snapshot handoff.
    pub fn provider_mut(&mut self, name: &str) -> Option<&mut (dyn ItemProvider + 'static)> {
        self.providers
            .iter_mut()
            .find(|provider| provider.name() == name)
            .map(|provider| &mut **provider)
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("providers", &self.provider_names())
            .finish()
    }
}
