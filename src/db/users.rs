use sqlx::{Pool, Sqlite};
use crate::db::models::{User, UserSummary};
use crate::error::AppError;

pub struct UserRepository;

impl UserRepository {
    /// Insert a non-admin user. Uniqueness of `username` is left to the table.
    pub async fn create(
        pool: &Pool<Sqlite>,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
INSERT INTO users (username, password_hash)
VALUES (?, ?)
RETURNING id, username, password_hash, is_admin
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_username(
        pool: &Pool<Sqlite>,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, is_admin FROM users WHERE username = ?"
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn list_all(pool: &Pool<Sqlite>) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, is_admin FROM users ORDER BY id ASC"
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}
