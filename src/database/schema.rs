use anyhow::Result;
use sqlx::{MySql, Pool};
use tracing::info;

pub async fn initialize_schema(pool: &Pool<MySql>) -> Result<()> {
    info!("Initializing database schema...");

    // Create complaints table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS complaints (
            seq INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            id CHAR(36) NOT NULL UNIQUE,
            user_id VARCHAR(256) NOT NULL,
            user_name VARCHAR(255) NOT NULL,
            image_url MEDIUMTEXT NOT NULL,
            latitude DOUBLE NOT NULL DEFAULT 0,
            longitude DOUBLE NOT NULL DEFAULT 0,
            address VARCHAR(512) NOT NULL,
            description TEXT NOT NULL,
            ai_summary TEXT NOT NULL,
            ai_key_details TEXT NOT NULL,
            waste_detected BOOLEAN NOT NULL DEFAULT FALSE,
            waste_type ENUM('plastic','organic','electronic','glass','paper','metal','textile','hazardous','mixed','unknown') NULL,
            severity ENUM('low','medium','high','critical') NULL,
            analysis_details TEXT NOT NULL,
            status ENUM('pending','in-progress','resolved') NOT NULL DEFAULT 'pending',
            resolution_details TEXT NULL,
            resolved_at TIMESTAMP NULL,
            feedback_rating TINYINT UNSIGNED NULL,
            feedback_comment TEXT NULL,
            feedback_submitted_at TIMESTAMP NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            INDEX idx_user_id (user_id),
            INDEX idx_status (status),
            INDEX idx_created_at (created_at)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id VARCHAR(256) NOT NULL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(320) NOT NULL,
            contact_number VARCHAR(32) NULL,
            role ENUM('citizen','worker') NOT NULL DEFAULT 'citizen',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            INDEX idx_role (role)
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully");
    Ok(())
}
