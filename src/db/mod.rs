//! Database module for SQLite persistence.
//!
//! Holds the two collections: `foods` and `food_requests`.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS foods (
            id TEXT PRIMARY KEY,
            food_name TEXT NOT NULL,
            food_image TEXT,
            food_quantity INTEGER NOT NULL,
            pickup_location TEXT,
            expired_date TEXT,
            additional_notes TEXT,
            donar_name TEXT,
            donator_email TEXT NOT NULL,
            donator_image TEXT,
            food_status TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No foreign key on food_id: requests keep their own copy of the listing
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS food_requests (
            id TEXT PRIMARY KEY,
            food_id TEXT,
            food_name TEXT,
            food_image TEXT,
            donar_name TEXT,
            donar_email TEXT,
            pickup_location TEXT,
            expired_date TEXT,
            additional_notes TEXT,
            user_email TEXT NOT NULL,
            request_date TEXT NOT NULL,
            donation_money REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_foods_donator_email ON foods(donator_email);
        CREATE INDEX IF NOT EXISTS idx_food_requests_user_email ON food_requests(user_email);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
