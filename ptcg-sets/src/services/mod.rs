//! Service modules for the set-data pipelines
//!
//! - Identity resolution and aggregation (the per-set core)
//! - Set listing and series filtering
//! - Card sources: local catalog mirror and remote catalog API

pub mod aggregator;
pub mod card_source;
pub mod catalog_client;
pub mod identity_resolver;
pub mod retry;
pub mod set_lister;

pub use aggregator::{aggregate, build_set_record};
pub use card_source::{CardSource, LocalCardSource};
pub use catalog_client::{
    fetch_all_cards, CardPage, CatalogApi, CatalogClient, CatalogClientConfig, CatalogError,
};
pub use identity_resolver::{normalize_name, resolve, IdentityKey};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use set_lister::{filter_sets, load_sets_file, SeriesFilter};
