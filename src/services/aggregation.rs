//! Dashboard aggregation engine: summary counters, recent courses, and daily trends.
//!
//! Everything here is pure. Callers fetch progress records and the catalog rows
//! they reference, then merge them through these functions.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::course::Course;
use crate::models::progress::ProgressRecord;

/// Maximum number of entries in [`DashboardStats::recent_courses`].
pub const RECENT_COURSES_LIMIT: usize = 4;

/// Title used when a progress record references a course missing from the catalog.
pub const UNKNOWN_COURSE_TITLE: &str = "Unknown Course";

/// Catalog rows keyed by `course_id`.
pub type CourseIndex = HashMap<i64, Course>;

/// Build a [`CourseIndex`] from catalog rows.
pub fn index_courses(courses: Vec<Course>) -> CourseIndex {
    courses.into_iter().map(|c| (c.course_id, c)).collect()
}

/// Unrounded totals over a student's records.
///
/// Produced either by [`summarize`] or by the store's grouped-aggregate query.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct RawTotals {
    pub record_count: i64,
    pub time_spent_sum: f64,
    pub progress_sum: f64,
    pub completed_count: i64,
    pub in_progress_count: i64,
}

/// Summary counters for the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_courses: i64,
    pub total_time_spent: f64,
    pub average_progress: f64,
    pub completed_courses: i64,
    pub in_progress_courses: i64,
}

/// A student's progress in one course, merged with its catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: i64,
    pub completed_lessons: i32,
    pub total_lessons: i32,
    pub time_spent: f64,
    pub progress: f64,
    pub last_accessed: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

/// Aggregated statistics for one student's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub recent_courses: Vec<CourseProgress>,
}

/// Per-course slice of a [`TrendPoint`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendCourse {
    pub course_id: i64,
    pub title: String,
    pub time_spent: f64,
    pub lessons_completed: i64,
}

/// Activity for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub daily_time_spent: f64,
    pub daily_lessons_completed: i64,
    pub courses: Vec<TrendCourse>,
}

/// Round to one decimal place, half away from zero. Non-finite input yields `0.0`.
pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Accumulate [`RawTotals`] with a manual pass over the records.
pub fn raw_totals(records: &[ProgressRecord]) -> RawTotals {
    records.iter().fold(RawTotals::default(), |mut acc, r| {
        acc.record_count += 1;
        acc.time_spent_sum += r.time_spent_hours;
        acc.progress_sum += r.progress_percent;
        if r.is_completed() {
            acc.completed_count += 1;
        }
        if r.is_in_progress() {
            acc.in_progress_count += 1;
        }
        acc
    })
}

impl RawTotals {
    /// Apply the dashboard's rounding rules. Zero records give a zero summary.
    pub fn finalize(&self) -> ProgressSummary {
        if self.record_count <= 0 {
            return ProgressSummary::default();
        }
        ProgressSummary {
            total_courses: self.record_count,
            total_time_spent: round_one_decimal(self.time_spent_sum),
            average_progress: round_one_decimal(self.progress_sum / self.record_count as f64),
            completed_courses: self.completed_count,
            in_progress_courses: self.in_progress_count,
        }
    }
}

/// Summary counters for a student's records.
pub fn summarize(records: &[ProgressRecord]) -> ProgressSummary {
    raw_totals(records).finalize()
}

/// The most recently accessed records, newest first, capped at [`RECENT_COURSES_LIMIT`].
///
/// Ties on access time are ordered by course id, matching `progress::find_recent`.
pub fn recent_records(records: &[ProgressRecord]) -> Vec<&ProgressRecord> {
    let mut sorted: Vec<&ProgressRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.last_accessed_at
            .cmp(&a.last_accessed_at)
            .then(a.course_id.cmp(&b.course_id))
    });
    sorted.truncate(RECENT_COURSES_LIMIT);
    sorted
}

/// Left-join records to the catalog, preserving order.
///
/// Missing courses get [`UNKNOWN_COURSE_TITLE`] and empty description/thumbnail.
pub fn join_catalog<'a>(
    records: impl IntoIterator<Item = &'a ProgressRecord>,
    courses: &CourseIndex,
) -> Vec<CourseProgress> {
    records
        .into_iter()
        .map(|r| {
            let course = courses.get(&r.course_id);
            CourseProgress {
                course_id: r.course_id,
                completed_lessons: r.completed_lessons,
                total_lessons: r.total_lessons,
                time_spent: r.time_spent_hours,
                progress: r.progress_percent,
                last_accessed: r.last_accessed_at,
                title: course
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| UNKNOWN_COURSE_TITLE.to_string()),
                description: course.map(|c| c.description.clone()).unwrap_or_default(),
                thumbnail: course.map(|c| c.thumbnail.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Full dashboard statistics from one student's records and the referenced catalog rows.
///
/// Empty input yields zero counters and no recent courses.
pub fn compute_dashboard_stats(
    records: &[ProgressRecord],
    courses: &CourseIndex,
) -> DashboardStats {
    DashboardStats {
        summary: summarize(records),
        recent_courses: join_catalog(recent_records(records), courses),
    }
}

/// Start of the trailing window ending at `now`.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    now - TimeDelta::days(i64::from(window_days))
}

/// Daily activity over the trailing `window_days` window ending at `now`.
///
/// Records are bucketed by the UTC date of their last access. Groups whose
/// course is missing from the catalog are dropped. Days without activity are
/// not synthesized. Output is ascending by date, courses ascending by id.
pub fn compute_trend(
    records: &[ProgressRecord],
    courses: &CourseIndex,
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<TrendPoint> {
    let since = window_start(now, window_days);

    let mut by_day_course: BTreeMap<(NaiveDate, i64), (f64, i64)> = BTreeMap::new();
    for r in records
        .iter()
        .filter(|r| r.last_accessed_at >= since && r.last_accessed_at <= now)
    {
        let entry = by_day_course
            .entry((r.last_accessed_at.date_naive(), r.course_id))
            .or_insert((0.0, 0));
        entry.0 += r.time_spent_hours;
        entry.1 += i64::from(r.completed_lessons);
    }

    let mut by_day: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();
    for ((date, course_id), (time_spent, lessons)) in by_day_course {
        let Some(course) = courses.get(&course_id) else {
            continue;
        };
        let point = by_day.entry(date).or_insert_with(|| TrendPoint {
            date,
            daily_time_spent: 0.0,
            daily_lessons_completed: 0,
            courses: Vec::new(),
        });
        point.daily_time_spent += time_spent;
        point.daily_lessons_completed += lessons;
        point.courses.push(TrendCourse {
            course_id,
            title: course.title.clone(),
            time_spent: round_one_decimal(time_spent),
            lessons_completed: lessons,
        });
    }

    by_day
        .into_values()
        .map(|mut point| {
            point.daily_time_spent = round_one_decimal(point.daily_time_spent);
            point
        })
        .collect()
}
