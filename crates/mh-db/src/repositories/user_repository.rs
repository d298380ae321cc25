//! User repository.

use crate::repositories::role_repository;
use crate::{DbError, Result as DbErrorResult};

use mh_core::{Role, User};

use std::collections::HashSet;
use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// A user together with its role references resolved.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<Role>,
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the user on first login, refresh name/profile on later logins.
    /// The id is assigned once and never regenerated.
    pub async fn upsert_login(
        &self,
        id: &str,
        name: &str,
        profile_url: Option<&str>,
    ) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (id, name, profile_url) VALUES (?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    profile_url = excluded.profile_url
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(profile_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, profile_url FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut user = User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            profile_url: row.try_get("profile_url")?,
            roles: Vec::new(),
        };
        user.roles = self.role_ids_for(&user.id).await?;

        Ok(Some(user))
    }

    /// Resolve the user together with its full role records, in list order.
    pub async fn find_with_roles(&self, id: &str) -> DbErrorResult<Option<UserWithRoles>> {
        let Some(mut user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r#"
                SELECT r.id, r.name, r.color, r.permissions
                FROM user_roles ur
                JOIN roles r ON r.id = ur.role_id
                WHERE ur.user_id = ?
                ORDER BY ur.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let roles = rows
            .iter()
            .map(role_repository::role_from_row)
            .collect::<DbErrorResult<Vec<Role>>>()?;
        user.roles = roles.iter().map(|role| role.id).collect();

        Ok(Some(UserWithRoles { user, roles }))
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, profile_url FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let mut user = User {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                profile_url: row.try_get("profile_url")?,
                roles: Vec::new(),
            };
            user.roles = self.role_ids_for(&user.id).await?;
            users.push(user);
        }

        Ok(users)
    }

    /// Replace the user's ordered role list. Duplicate references collapse
    /// onto their first position. Returns false when the user is absent.
    pub async fn set_roles(&self, id: &str, roles: &[Uuid]) -> DbErrorResult<bool> {
        let mut tx = self.pool.begin().await?;

        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut position = 0i64;
        for role_id in roles {
            if !seen.insert(*role_id) {
                continue;
            }
            sqlx::query("INSERT INTO user_roles (user_id, role_id, position) VALUES (?, ?, ?)")
                .bind(id)
                .bind(role_id.to_string())
                .bind(position)
                .execute(&mut *tx)
                .await?;
            position += 1;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn role_ids_for(&self, user_id: &str) -> DbErrorResult<Vec<Uuid>> {
        let rows =
            sqlx::query("SELECT role_id FROM user_roles WHERE user_id = ? ORDER BY position")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|row| {
                let raw: String = row.try_get("role_id")?;
                Uuid::parse_str(&raw).map_err(|e| DbError::Initialization {
                    message: format!("Invalid UUID in user_roles.role_id: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .collect()
    }
}
