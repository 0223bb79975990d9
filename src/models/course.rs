//! Course catalog model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry for a course. Reference data, never mutated by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub total_lessons: i32,
}
