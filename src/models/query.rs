//! Query-string primitives shared by the dashboard and analytics endpoints.

use serde::Deserialize;

/// Student assumed when a request names none.
pub const DEFAULT_STUDENT_ID: i64 = 1;

/// `?userId=` selector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

impl StudentQuery {
    /// Requested student, falling back to [`DEFAULT_STUDENT_ID`].
    pub fn student_id(&self) -> i64 {
        self.user_id.unwrap_or(DEFAULT_STUDENT_ID)
    }
}

/// `?userId=&days=` selector for trend analytics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub days: Option<i64>,
}

impl TrendQuery {
    /// Default trailing window in days.
    const DEFAULT_DAYS: i64 = 30;

    pub fn student_id(&self) -> i64 {
        self.user_id.unwrap_or(DEFAULT_STUDENT_ID)
    }

    /// Window length clamped to `0..=max_days`. Never negative.
    pub fn window_days(&self, max_days: u32) -> u32 {
        let days = self
            .days
            .unwrap_or(Self::DEFAULT_DAYS)
            .clamp(0, i64::from(max_days));
        u32::try_from(days).unwrap_or(max_days)
    }
}
