//! Business logic
//!
//! The pure pieces (status evaluation, recency formatting, dashboard
//! aggregation, export formatting) plus the repository and the service
//! that coordinates the write paths.

pub mod dashboard;
pub mod export;
pub mod insights;
pub mod recency;
pub mod repository;
pub mod service;
pub mod status;

pub use dashboard::{build_dashboard, VitalCard};
pub use repository::VitalsRepository;
pub use service::VitalsService;
pub use status::{evaluate, StatusTier};
