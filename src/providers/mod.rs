//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::ProviderBackend`]
//! that scrapes a specific search engine's HTML results page.

pub mod bing;
pub mod duckduckgo;

pub use bing::BingProvider;
pub use duckduckgo::DuckDuckGoProvider;
