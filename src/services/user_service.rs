use sqlx::{mysql::MySqlRow, MySql, Pool, Row};

use super::ServiceError;
use crate::models::{RegisterUserRequest, UserProfile, UserRole};

/// Creates a profile or updates an existing one. Omitting `role` keeps
/// whatever role the profile already has.
pub async fn upsert_user(
    pool: &Pool<MySql>,
    req: &RegisterUserRequest,
) -> Result<UserProfile, ServiceError> {
    sqlx::query(
        "INSERT INTO users (id, name, email, contact_number, role)
         VALUES (?, ?, ?, ?, COALESCE(?, 'citizen'))
         ON DUPLICATE KEY UPDATE
            name = VALUES(name),
            email = VALUES(email),
            contact_number = VALUES(contact_number),
            role = COALESCE(?, role)",
    )
    .bind(req.id.as_str())
    .bind(req.name.as_str())
    .bind(req.email.as_str())
    .bind(req.contact_number.as_deref())
    .bind(req.role.map(|r| r.as_str()))
    .bind(req.role.map(|r| r.as_str()))
    .execute(pool)
    .await?;

    get_user(pool, &req.id)
        .await?
        .ok_or(ServiceError::Database(sqlx::Error::RowNotFound))
}

pub async fn get_user(
    pool: &Pool<MySql>,
    user_id: &str,
) -> Result<Option<UserProfile>, ServiceError> {
    let row = sqlx::query(
        "SELECT id, name, email, contact_number, role, created_at
         FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(user_from_row))
}

fn user_from_row(row: MySqlRow) -> UserProfile {
    let role: String = row.get("role");
    UserProfile {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        contact_number: row.get("contact_number"),
        role: UserRole::parse(&role).unwrap_or(UserRole::Citizen),
        created_at: row.get("created_at"),
    }
}
