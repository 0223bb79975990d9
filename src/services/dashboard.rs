//! Dashboard statistics, trends, and catalog lookups with placeholder fallback.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::progress::ProgressRecord;
use crate::services::aggregation::{
    compute_dashboard_stats, compute_trend, index_courses, join_catalog, summarize, window_start,
    CourseIndex, CourseProgress, DashboardStats, ProgressSummary, TrendPoint,
};
use crate::services::course as course_store;
use crate::services::fallback::{self, FallbackMode, Outcome};
use crate::services::progress as progress_store;

/// Courses shown in the catalog overview.
const FEATURED_COURSES_LIMIT: i64 = 4;
/// Progress entries shown as recent activity in the catalog overview.
const RECENT_ACTIVITY_LIMIT: i64 = 5;
/// Courses suggested per recommendation request.
const RECOMMENDATIONS_LIMIT: i64 = 3;

/// Every progress record of a student, merged with catalog titles.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProgressReport {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub course_progress: Vec<CourseProgress>,
}

/// Catalog size, featured courses, and (optionally) a student's progress and recent activity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    pub total_courses: i64,
    /// Every progress record of the student, with course titles.
    pub user_progress: Vec<CourseProgress>,
    pub featured_courses: Vec<Course>,
    pub recent_activity: Vec<CourseProgress>,
}

/// Dashboard statistics computed by the store's grouped aggregate.
pub async fn get_stats(
    pool: &PgPool,
    student_id: i64,
    mode: FallbackMode,
) -> Result<DashboardStats, AppError> {
    let outcome = aggregated_stats(pool, student_id).await;
    fallback::resolve(mode, "dashboard_stats", outcome, fallback::placeholder_stats)
}

/// Dashboard statistics computed in-process from the raw records.
///
/// Numerically equivalent to [`get_stats`] for the same data.
pub async fn get_stats_simple(
    pool: &PgPool,
    student_id: i64,
    mode: FallbackMode,
) -> Result<DashboardStats, AppError> {
    let outcome = simple_stats(pool, student_id).await;
    fallback::resolve(mode, "dashboard_stats_simple", outcome, fallback::placeholder_stats)
}

/// Daily progress trend over the trailing `window_days`.
pub async fn get_trend(
    pool: &PgPool,
    student_id: i64,
    window_days: u32,
    mode: FallbackMode,
) -> Result<Vec<TrendPoint>, AppError> {
    let outcome = trend(pool, student_id, window_days, Utc::now()).await;
    fallback::resolve(mode, "progress_trend", outcome, || {
        fallback::synthetic_trend_today(window_days)
    })
}

/// Catalog rows for `course_ids`. Callers validate that the list is non-empty.
pub async fn get_course_details(
    pool: &PgPool,
    course_ids: &[i64],
    mode: FallbackMode,
) -> Result<Vec<Course>, AppError> {
    let outcome = course_store::find_by_ids(pool, course_ids)
        .await
        .map(Outcome::from_items);
    fallback::resolve(mode, "course_details", outcome, || {
        fallback::placeholder_courses_matching(course_ids)
    })
}

/// Summary counters plus every course the student is enrolled in.
pub async fn get_student_progress(
    pool: &PgPool,
    student_id: i64,
) -> Result<StudentProgressReport, AppError> {
    let records = progress_store::find_by_student(pool, student_id).await?;
    let courses = fetch_course_index(pool, &records).await?;
    Ok(StudentProgressReport {
        summary: summarize(&records),
        course_progress: join_catalog(&records, &courses),
    })
}

/// Catalog overview, with the student's progress and recent activity when a student is given.
pub async fn get_course_overview(
    pool: &PgPool,
    student_id: Option<i64>,
) -> Result<CourseOverview, AppError> {
    let (total_courses, featured_courses) = tokio::try_join!(
        course_store::count(pool),
        course_store::list_first(pool, FEATURED_COURSES_LIMIT),
    )?;

    let (user_progress, recent_activity) = match student_id {
        Some(id) => fetch_student_activity(pool, id).await?,
        None => (Vec::new(), Vec::new()),
    };

    Ok(CourseOverview {
        total_courses,
        user_progress,
        featured_courses,
        recent_activity,
    })
}

/// Catalog courses the student is not enrolled in.
pub async fn get_recommendations(pool: &PgPool, student_id: i64) -> Result<Vec<Course>, AppError> {
    let enrolled = progress_store::enrolled_course_ids(pool, student_id).await?;
    course_store::list_excluding(pool, &enrolled, RECOMMENDATIONS_LIMIT).await
}

async fn aggregated_stats(
    pool: &PgPool,
    student_id: i64,
) -> Result<Outcome<DashboardStats>, AppError> {
    let totals = progress_store::aggregate_totals(pool, student_id).await?;
    tracing::debug!(student_id, records = totals.record_count, "Aggregated progress totals");
    if totals.record_count == 0 {
        return Ok(Outcome::Empty(DashboardStats::default()));
    }

    let recent = progress_store::find_recent_for_dashboard(pool, student_id).await?;
    let courses = fetch_course_index(pool, &recent).await?;

    Ok(Outcome::Found(DashboardStats {
        summary: totals.finalize(),
        recent_courses: join_catalog(&recent, &courses),
    }))
}

async fn simple_stats(pool: &PgPool, student_id: i64) -> Result<Outcome<DashboardStats>, AppError> {
    let records = progress_store::find_by_student(pool, student_id).await?;
    tracing::debug!(student_id, records = records.len(), "Loaded progress records");

    let courses = fetch_course_index(pool, &records).await?;
    Ok(stats_outcome(&records, &courses))
}

fn stats_outcome(records: &[ProgressRecord], courses: &CourseIndex) -> Outcome<DashboardStats> {
    if records.is_empty() {
        Outcome::Empty(DashboardStats::default())
    } else {
        Outcome::Found(compute_dashboard_stats(records, courses))
    }
}

async fn trend(
    pool: &PgPool,
    student_id: i64,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<Outcome<Vec<TrendPoint>>, AppError> {
    let since = window_start(now, window_days);
    let records = progress_store::find_accessed_since(pool, student_id, since).await?;
    tracing::debug!(student_id, window_days, records = records.len(), "Loaded trend records");

    let courses = fetch_course_index(pool, &records).await?;
    Ok(trend_outcome(&records, &courses, window_days, now))
}

/// Empty when no record inside the window maps to a catalog course.
fn trend_outcome(
    records: &[ProgressRecord],
    courses: &CourseIndex,
    window_days: u32,
    now: DateTime<Utc>,
) -> Outcome<Vec<TrendPoint>> {
    Outcome::from_items(compute_trend(records, courses, window_days, now))
}

/// All of a student's progress plus the most recent entries, both joined with titles.
async fn fetch_student_activity(
    pool: &PgPool,
    student_id: i64,
) -> Result<(Vec<CourseProgress>, Vec<CourseProgress>), AppError> {
    let (records, recent) = tokio::try_join!(
        progress_store::find_by_student(pool, student_id),
        progress_store::find_recent(pool, student_id, RECENT_ACTIVITY_LIMIT),
    )?;
    // Recent entries are a subset of the student's records.
    let courses = fetch_course_index(pool, &records).await?;
    Ok((join_catalog(&records, &courses), join_catalog(&recent, &courses)))
}

/// Second half of the fetch-then-merge join: catalog rows for the records' courses.
async fn fetch_course_index(
    pool: &PgPool,
    records: &[ProgressRecord],
) -> Result<CourseIndex, AppError> {
    let ids: Vec<i64> = records
        .iter()
        .map(|r| r.course_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let courses = course_store::find_by_ids(pool, &ids).await?;
    Ok(index_courses(courses))
}
