//! Progress store queries over `student_progress`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::progress::ProgressRecord;
use crate::services::aggregation::{RawTotals, RECENT_COURSES_LIMIT};

const PROGRESS_COLUMNS: &str = "student_id, course_id, completed_lessons, total_lessons, \
     time_spent_hours, progress_percent, last_accessed_at, enrolled_at";

/// All progress records for a student.
pub async fn find_by_student(
    pool: &PgPool,
    student_id: i64,
) -> Result<Vec<ProgressRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProgressRecord>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM student_progress WHERE student_id = $1 ORDER BY course_id"
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Grouped aggregate over a student's records, computed by the database.
///
/// Rounding is left to [`RawTotals::finalize`] so both stats paths share one rule.
pub async fn aggregate_totals(pool: &PgPool, student_id: i64) -> Result<RawTotals, AppError> {
    let row = sqlx::query_as::<_, RawTotals>(
        r#"
        SELECT
            COUNT(*)                                    AS record_count,
            COALESCE(SUM(time_spent_hours), 0)::float8  AS time_spent_sum,
            COALESCE(SUM(progress_percent), 0)::float8  AS progress_sum,
            COALESCE(SUM(CASE WHEN progress_percent = 100 THEN 1 ELSE 0 END), 0)::int8
                                                        AS completed_count,
            COALESCE(SUM(
                CASE WHEN progress_percent > 0 AND progress_percent < 100 THEN 1 ELSE 0 END
            ), 0)::int8                                 AS in_progress_count
        FROM student_progress
        WHERE student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// The student's most recently accessed records, newest first, ties by course id.
pub async fn find_recent(
    pool: &PgPool,
    student_id: i64,
    limit: i64,
) -> Result<Vec<ProgressRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProgressRecord>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM student_progress
         WHERE student_id = $1
         ORDER BY last_accessed_at DESC, course_id
         LIMIT $2"
    ))
    .bind(student_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Records feeding the dashboard's recent-course list.
pub async fn find_recent_for_dashboard(
    pool: &PgPool,
    student_id: i64,
) -> Result<Vec<ProgressRecord>, AppError> {
    find_recent(pool, student_id, RECENT_COURSES_LIMIT as i64).await
}

/// Records last accessed at or after `since`.
pub async fn find_accessed_since(
    pool: &PgPool,
    student_id: i64,
    since: DateTime<Utc>,
) -> Result<Vec<ProgressRecord>, AppError> {
    let rows = sqlx::query_as::<_, ProgressRecord>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM student_progress
         WHERE student_id = $1 AND last_accessed_at >= $2
         ORDER BY last_accessed_at"
    ))
    .bind(student_id)
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Ids of every course the student is enrolled in.
pub async fn enrolled_course_ids(pool: &PgPool, student_id: i64) -> Result<Vec<i64>, AppError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT course_id FROM student_progress WHERE student_id = $1 ORDER BY course_id",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}
