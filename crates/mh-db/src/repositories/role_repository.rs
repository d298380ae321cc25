//! Role repository.
//!
//! The protected roles ("Default", "Admin") are filtered out at the query
//! level on update and delete, so a protected target reports the same
//! zero-rows outcome as a missing one.

use crate::{DbError, Result as DbErrorResult};

use mh_core::models::role::PROTECTED_ROLE_NAMES;
use mh_core::{Permission, Role};

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, role: &Role) -> DbErrorResult<()> {
        sqlx::query("INSERT INTO roles (id, name, color, permissions) VALUES (?, ?, ?, ?)")
            .bind(role.id.to_string())
            .bind(&role.name)
            .bind(&role.color)
            .bind(encode_permissions(&role.permissions)?)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Role>> {
        let row = sqlx::query("SELECT id, name, color, permissions FROM roles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| role_from_row(&r)).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Role>> {
        let rows = sqlx::query("SELECT id, name, color, permissions FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(role_from_row).collect()
    }

    /// Number of users currently holding the role.
    pub async fn user_count(&self, id: Uuid) -> DbErrorResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE role_id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    /// Persist the patched role. Returns false when the id does not resolve
    /// to a role outside the protected set.
    pub async fn update_unprotected(&self, role: &Role) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE roles SET name = ?, color = ?, permissions = ?
                WHERE id = ? AND name NOT IN (?, ?)
            "#,
        )
        .bind(&role.name)
        .bind(&role.color)
        .bind(encode_permissions(&role.permissions)?)
        .bind(role.id.to_string())
        .bind(PROTECTED_ROLE_NAMES[0])
        .bind(PROTECTED_ROLE_NAMES[1])
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the role and pull it from every user's role list in a single
    /// transaction. Returns the number of users that lost the role, or None
    /// when the id does not resolve to a deletable role.
    pub async fn delete_cascading(&self, id: Uuid) -> DbErrorResult<Option<u64>> {
        let id_str = id.to_string();
        let mut tx = self.pool.begin().await?;

        let unassigned = sqlx::query("DELETE FROM user_roles WHERE role_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM roles WHERE id = ? AND name NOT IN (?, ?)")
            .bind(&id_str)
            .bind(PROTECTED_ROLE_NAMES[0])
            .bind(PROTECTED_ROLE_NAMES[1])
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(unassigned))
    }
}

fn encode_permissions(permissions: &[Permission]) -> DbErrorResult<String> {
    serde_json::to_string(permissions).map_err(|e| DbError::Initialization {
        message: format!("Failed to encode permissions: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

pub(crate) fn role_from_row(row: &SqliteRow) -> DbErrorResult<Role> {
    let id: String = row.try_get("id")?;
    let permissions: String = row.try_get("permissions")?;

    Ok(Role {
        id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
            message: format!("Invalid UUID in role.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        name: row.try_get("name")?,
        color: row.try_get("color")?,
        permissions: serde_json::from_str(&permissions).map_err(|e| DbError::Initialization {
            message: format!("Invalid permissions JSON in role.permissions: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
