// Vitalis - Personal Vitals Tracking
// Copyright (c) 2025 Vitalis Contributors
// Licensed under the MIT License

//! # Vitalis - Personal Vitals Tracking
//!
//! Vitalis is the core of a personal health tracker: it records vital-sign
//! measurements (blood pressure, heart rate, blood sugar, temperature,
//! oxygen saturation, weight), evaluates them against fixed clinical
//! thresholds, composes a dashboard view, extracts vitals from document
//! photos via a vision model, and exports history.
//!
//! ## Architecture
//!
//! Vitalis follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (status evaluation, dashboard, repository, service, export)
//! - [`adapters`] - External integrations (document store, identity provider, AI endpoint, BLE)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitalis::adapters::store::MemoryStore;
//! use vitalis::core::VitalsService;
//! use vitalis::domain::{UserId, VitalRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = VitalsService::new(Arc::new(MemoryStore::new()));
//!     let user = UserId::new("user-1")?;
//!
//!     let draft = VitalRecord::builder(user.clone())
//!         .blood_pressure(118, 76)
//!         .build();
//!     service.record(draft).await?;
//!
//!     for card in service.dashboard(&user).await? {
//!         println!("{}: {} ({})", card.label, card.value, card.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Write Contract
//!
//! Every creation path (manual entry, device stream, document import)
//! converges on the same contract: the draft is merged field-by-field into
//! the latest snapshot in application code, the snapshot is replaced
//! wholesale, and the draft is appended to the immutable history. The two
//! writes are sequential with no cross-write atomicity; the dashboard
//! re-reads the snapshot on every load.
//!
//! ## Status Evaluation
//!
//! [`core::status::evaluate`] maps measurements to `{normal, alert,
//! critical}` with fixed thresholds and is deliberately fail-open: a
//! missing or non-numeric reading is "nothing to flag", never an alert.
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]:
//!
//! ```rust,no_run
//! use vitalis::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = vitalis::config::load_config("vitalis.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! The two deliberate exceptions are the history and range reads, which
//! degrade to empty sequences so dashboard rendering never blocks on a
//! history error.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
