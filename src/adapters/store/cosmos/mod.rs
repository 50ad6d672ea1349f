//! Azure Cosmos DB store backend
//!
//! Document-database persistence for vitals: a singleton latest snapshot
//! per user plus an append-only history sequence, both partitioned by
//! `/userId`.

pub mod client;
pub mod store;

pub use client::CosmosVitalsClient;
pub use store::CosmosStore;
