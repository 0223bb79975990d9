//! Business logic services.

pub mod aggregation;
pub mod course;
pub mod dashboard;
pub mod fallback;
pub mod progress;
