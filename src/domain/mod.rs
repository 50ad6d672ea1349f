//! Domain models and types for vitalis.
//!
//! This module contains the core domain models, types and business rules:
//!
//! - **Strongly-typed identifiers** ([`UserId`], [`RecordId`])
//! - **The measurement model** ([`VitalRecord`] and its builder)
//! - **Vital-sign tags and provenance** ([`VitalKind`], [`VitalSource`])
//! - **Error types** ([`VitalError`], [`StoreError`], [`AuthError`], [`AiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so different id kinds can't be mixed:
//!
//! ```rust
//! use vitalis::domain::{RecordId, UserId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let user_id = UserId::new("user-123")?;
//! let record_id = RecordId::new("a2f4-...-9c1b")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: UserId = record_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Builder Pattern
//!
//! Records are constructed through a builder that fills date and source
//! defaults:
//!
//! ```rust
//! use vitalis::domain::{UserId, VitalRecord, VitalSource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = VitalRecord::builder(UserId::new("user-123")?)
//!     .blood_pressure(118, 76)
//!     .source(VitalSource::Manual)
//!     .build();
//! assert!(record.has_measurements());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod vital;

// Re-export commonly used types for convenience
pub use errors::{AiError, AuthError, StoreError, VitalError};
pub use ids::{RecordId, UserId};
pub use record::{VitalRecord, VitalRecordBuilder};
pub use result::Result;
pub use vital::{VitalKind, VitalSource, DASHBOARD_KINDS};
