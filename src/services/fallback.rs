//! Placeholder substitution for empty or failed dashboard lookups.
//!
//! In [`FallbackMode::Degrade`] an empty result or any data-access error is
//! answered with a fixed demo dataset and a success status. In
//! [`FallbackMode::Strict`] empty results pass through unchanged and errors
//! propagate to the caller.

use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;

use crate::errors::AppError;
use crate::models::course::Course;
use crate::services::aggregation::{
    round_one_decimal, CourseProgress, DashboardStats, ProgressSummary, TrendCourse, TrendPoint,
};

/// How empty results and data-access failures are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Substitute placeholder data and always report success.
    #[default]
    Degrade,
    /// Return real (possibly empty) results and surface errors.
    Strict,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Degrade => "degrade",
            Self::Strict => "strict",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown fallback mode '{0}', expected 'degrade' or 'strict'")]
pub struct UnknownFallbackMode(String);

impl FromStr for FallbackMode {
    type Err = UnknownFallbackMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "strict" => Ok(Self::Strict),
            other => Err(UnknownFallbackMode(other.to_string())),
        }
    }
}

/// A computed result, tagged with whether the underlying lookup found anything.
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    /// Nothing matched. Carries the engine's own zero/empty result.
    Empty(T),
}

impl<T> Outcome<Vec<T>> {
    /// `Empty` when the list has no items.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty(items)
        } else {
            Self::Found(items)
        }
    }
}

/// Apply the fallback policy to a computed outcome.
///
/// Failure takes precedence over emptiness: an `Err` in degrade mode is logged
/// and replaced by the placeholder.
pub fn resolve<T>(
    mode: FallbackMode,
    context: &'static str,
    outcome: Result<Outcome<T>, AppError>,
    placeholder: impl FnOnce() -> T,
) -> Result<T, AppError> {
    match (outcome, mode) {
        (Ok(Outcome::Found(value)), _) => Ok(value),
        (Ok(Outcome::Empty(value)), FallbackMode::Strict) => Ok(value),
        (Ok(Outcome::Empty(_)), FallbackMode::Degrade) => {
            tracing::info!(context, "No data found, returning placeholder data");
            Ok(placeholder())
        }
        (Err(e), FallbackMode::Degrade) => {
            tracing::warn!(context, error = %e, "Lookup failed, returning placeholder data");
            Ok(placeholder())
        }
        (Err(e), FallbackMode::Strict) => Err(e),
    }
}

/// Static row backing one placeholder course and its demo progress.
struct PlaceholderCourse {
    course_id: i64,
    title: &'static str,
    description: &'static str,
    thumbnail: &'static str,
    total_lessons: i32,
    completed_lessons: i32,
    time_spent_hours: f64,
    progress_percent: f64,
    /// Unix seconds.
    last_accessed: i64,
}

const PLACEHOLDER_COURSES: [PlaceholderCourse; 2] = [
    PlaceholderCourse {
        course_id: 1,
        title: "JavaScript Fundamentals",
        description: "Learn basics of JS",
        thumbnail: "js.png",
        total_lessons: 4,
        completed_lessons: 2,
        time_spent_hours: 8.5,
        progress_percent: 50.0,
        // 2024-01-15T10:30:00Z
        last_accessed: 1_705_314_600,
    },
    PlaceholderCourse {
        course_id: 2,
        title: "React.js for Beginners",
        description: "Learn React from scratch",
        thumbnail: "react.png",
        total_lessons: 4,
        completed_lessons: 1,
        time_spent_hours: 5.2,
        progress_percent: 25.0,
        // 2024-01-14T14:20:00Z
        last_accessed: 1_705_242_000,
    },
];

/// Summary counters served alongside the placeholder courses.
pub const PLACEHOLDER_SUMMARY: ProgressSummary = ProgressSummary {
    total_courses: 2,
    total_time_spent: 13.7,
    average_progress: 37.5,
    completed_courses: 0,
    in_progress_courses: 2,
};

/// Catalog rows for the placeholder courses.
pub fn placeholder_courses() -> Vec<Course> {
    PLACEHOLDER_COURSES
        .iter()
        .map(|p| Course {
            course_id: p.course_id,
            title: p.title.to_string(),
            description: p.description.to_string(),
            thumbnail: p.thumbnail.to_string(),
            total_lessons: p.total_lessons,
        })
        .collect()
}

/// Placeholder courses whose id is in `course_ids`, in placeholder order.
pub fn placeholder_courses_matching(course_ids: &[i64]) -> Vec<Course> {
    placeholder_courses()
        .into_iter()
        .filter(|c| course_ids.contains(&c.course_id))
        .collect()
}

/// Recent-course entries for the placeholder dashboard, newest first.
pub fn placeholder_recent_courses() -> Vec<CourseProgress> {
    PLACEHOLDER_COURSES
        .iter()
        .map(|p| CourseProgress {
            course_id: p.course_id,
            completed_lessons: p.completed_lessons,
            total_lessons: p.total_lessons,
            time_spent: p.time_spent_hours,
            progress: p.progress_percent,
            last_accessed: DateTime::from_timestamp(p.last_accessed, 0).unwrap_or_default(),
            title: p.title.to_string(),
            description: p.description.to_string(),
            thumbnail: p.thumbnail.to_string(),
        })
        .collect()
}

/// Complete placeholder dashboard.
pub fn placeholder_stats() -> DashboardStats {
    DashboardStats {
        summary: PLACEHOLDER_SUMMARY,
        recent_courses: placeholder_recent_courses(),
    }
}

/// Demo trend series: one point per day for `window_days + 1` days ending at `today`.
///
/// Values are random within fixed bounds and carry no meaning. Each placeholder
/// course gets 0.5–2.5 hours and 1–2 lessons per day; day totals are their sums.
pub fn synthetic_trend(window_days: u32, today: NaiveDate, rng: &mut impl Rng) -> Vec<TrendPoint> {
    (0..=window_days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let courses: Vec<TrendCourse> = PLACEHOLDER_COURSES
                .iter()
                .map(|p| TrendCourse {
                    course_id: p.course_id,
                    title: p.title.to_string(),
                    time_spent: round_one_decimal(rng.random_range(0.5..2.5)),
                    lessons_completed: rng.random_range(1..=2),
                })
                .collect();
            TrendPoint {
                date,
                daily_time_spent: round_one_decimal(courses.iter().map(|c| c.time_spent).sum()),
                daily_lessons_completed: courses.iter().map(|c| c.lessons_completed).sum(),
                courses,
            }
        })
        .collect()
}

/// [`synthetic_trend`] ending today, using the thread-local RNG.
pub fn synthetic_trend_today(window_days: u32) -> Vec<TrendPoint> {
    synthetic_trend(window_days, Utc::now().date_naive(), &mut rand::rng())
}
