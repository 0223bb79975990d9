//! Per-student course progress model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One student's tracked state for one course. Unique per `(student_id, course_id)`.
///
/// `completed_lessons <= total_lessons` is expected but not enforced by storage;
/// consumers must tolerate records that violate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(rename = "userId")]
    pub student_id: i64,
    pub course_id: i64,
    pub completed_lessons: i32,
    pub total_lessons: i32,
    /// Hours, fractional.
    #[serde(rename = "timeSpent")]
    pub time_spent_hours: f64,
    /// Percentage in `0..=100`.
    #[serde(rename = "progress")]
    pub progress_percent: f64,
    #[serde(rename = "lastAccessed")]
    pub last_accessed_at: DateTime<Utc>,
    pub enrolled_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Exactly 100% progress.
    pub fn is_completed(&self) -> bool {
        self.progress_percent == 100.0
    }

    /// Started but not finished. A record at 0% counts as not started.
    pub fn is_in_progress(&self) -> bool {
        self.progress_percent > 0.0 && self.progress_percent < 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(progress: f64) -> ProgressRecord {
        ProgressRecord {
            student_id: 1,
            course_id: 1,
            completed_lessons: 0,
            total_lessons: 4,
            time_spent_hours: 0.0,
            progress_percent: progress,
            last_accessed_at: Utc::now(),
            enrolled_at: Utc::now(),
        }
    }

    #[test]
    fn classification_boundaries() {
        assert!(!record(0.0).is_completed());
        assert!(!record(0.0).is_in_progress());
        assert!(record(0.5).is_in_progress());
        assert!(record(99.9).is_in_progress());
        assert!(record(100.0).is_completed());
        assert!(!record(100.0).is_in_progress());
    }

    #[test]
    fn serializes_dashboard_field_names() {
        let json = serde_json::to_value(record(50.0)).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["progress"], 50.0);
        assert!(json.get("timeSpent").is_some());
        assert!(json.get("lastAccessed").is_some());
        assert!(json.get("enrolledAt").is_some());
    }
}
