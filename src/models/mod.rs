//! Database models and request DTOs for the dashboard domain.

pub mod course;
pub mod progress;
pub mod query;
