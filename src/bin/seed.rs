//! Seed script for development: populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use chrono::{TimeDelta, Utc};
use sqlx::PgPool;

use progress_dashboard::models::course::Course;
use progress_dashboard::services::fallback::placeholder_courses;

/// Student whose dashboard gets sample progress.
const DEMO_STUDENT_ID: i64 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = progress_dashboard::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    progress_dashboard::db::run_migrations(&pool).await?;

    println!("=== Progress Dashboard Seed Script ===");

    seed_courses(&pool).await?;
    seed_progress(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Dashboard: GET /api/v1/dashboard/stats?userId={DEMO_STUDENT_ID}");

    Ok(())
}

async fn seed_courses(pool: &PgPool) -> anyhow::Result<()> {
    let mut courses = placeholder_courses();
    courses.push(Course {
        course_id: 3,
        title: "TypeScript in Practice".to_string(),
        description: "Types for real-world JavaScript".to_string(),
        thumbnail: "ts.png".to_string(),
        total_lessons: 6,
    });
    courses.push(Course {
        course_id: 4,
        title: "Node.js APIs".to_string(),
        description: "Build HTTP services with Node".to_string(),
        thumbnail: "node.png".to_string(),
        total_lessons: 5,
    });

    for course in &courses {
        sqlx::query(
            r#"
            INSERT INTO courses (course_id, title, description, thumbnail, total_lessons)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (course_id) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description,
                thumbnail = EXCLUDED.thumbnail,
                total_lessons = EXCLUDED.total_lessons
            "#,
        )
        .bind(course.course_id)
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.thumbnail)
        .bind(course.total_lessons)
        .execute(pool)
        .await?;
    }

    println!("[done] Upserted {} courses", courses.len());
    Ok(())
}

async fn seed_progress(pool: &PgPool) -> anyhow::Result<()> {
    let now = Utc::now();
    // (course_id, completed, total, hours, percent, days since last access)
    let rows: [(i64, i32, i32, f64, f64, i64); 3] = [
        (1, 2, 4, 8.5, 50.0, 1),
        (2, 1, 4, 5.2, 25.0, 3),
        (3, 6, 6, 11.0, 100.0, 12),
    ];

    for (course_id, completed, total, hours, percent, days_ago) in rows {
        let last_accessed = now - TimeDelta::days(days_ago);
        sqlx::query(
            r#"
            INSERT INTO student_progress
                (student_id, course_id, completed_lessons, total_lessons,
                 time_spent_hours, progress_percent, last_accessed_at, enrolled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (student_id, course_id) DO UPDATE
            SET completed_lessons = EXCLUDED.completed_lessons,
                total_lessons = EXCLUDED.total_lessons,
                time_spent_hours = EXCLUDED.time_spent_hours,
                progress_percent = EXCLUDED.progress_percent,
                last_accessed_at = EXCLUDED.last_accessed_at,
                updated_at = NOW()
            "#,
        )
        .bind(DEMO_STUDENT_ID)
        .bind(course_id)
        .bind(completed)
        .bind(total)
        .bind(hours)
        .bind(percent)
        .bind(last_accessed)
        .bind(last_accessed - TimeDelta::days(30))
        .execute(pool)
        .await?;
    }

    println!("[done] Upserted {} progress records for student {DEMO_STUDENT_ID}", rows.len());
    Ok(())
}
