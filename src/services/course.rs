//! Course catalog queries over `courses`.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::course::Course;

/// Batch membership lookup, ordered by id.
pub async fn find_by_ids(pool: &PgPool, course_ids: &[i64]) -> Result<Vec<Course>, AppError> {
    if course_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query_as::<_, Course>(
        r#"
        SELECT course_id, title, description, thumbnail, total_lessons
        FROM courses
        WHERE course_id = ANY($1)
        ORDER BY course_id
        "#,
    )
    .bind(course_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Total number of catalog entries.
pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// First `limit` courses by id.
pub async fn list_first(pool: &PgPool, limit: i64) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>(
        r#"
        SELECT course_id, title, description, thumbnail, total_lessons
        FROM courses
        ORDER BY course_id
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// First `limit` courses by id whose id is not in `excluded`.
pub async fn list_excluding(
    pool: &PgPool,
    excluded: &[i64],
    limit: i64,
) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>(
        r#"
        SELECT course_id, title, description, thumbnail, total_lessons
        FROM courses
        WHERE NOT (course_id = ANY($1))
        ORDER BY course_id
        LIMIT $2
        "#,
    )
    .bind(excluded)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
