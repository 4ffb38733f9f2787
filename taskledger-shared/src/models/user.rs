/// User model and database operations
///
/// Users are provisioned by the seeding binary and are never created, mutated
/// or deleted by API operations. Each user holds exactly one role.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('Manager', 'Team Member');
///
/// CREATE TABLE users (
///     user_id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     name VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'Team Member',
///     email VARCHAR(255) NOT NULL
/// );
/// ```
///
/// # Security
///
/// ⚠️  Passwords are stored and compared in plaintext. This mirrors the
/// existing data set and is a known weakness: the password column must never
/// be serialized into API responses (it is skipped by `Serialize`).

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use std::fmt;
use std::str::FromStr;

use super::UserId;

/// User role
///
/// Roles are compared by exact equality; there is no hierarchy between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    /// Creates, edits and deletes projects and tasks
    #[sqlx(rename = "Manager")]
    #[serde(rename = "Manager")]
    Manager,

    /// Works on assigned tasks: updates their status and logs time
    #[sqlx(rename = "Team Member")]
    #[serde(rename = "Team Member")]
    TeamMember,
}

impl Role {
    /// Returns the stored/display form of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::TeamMember => "Team Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(Role::Manager),
            "Team Member" => Ok(Role::TeamMember),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub user_id: UserId,

    /// Login name (unique)
    pub username: String,

    /// Plaintext password (never serialized)
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Display name
    pub name: String,

    /// Role of this user
    pub role: Role,

    /// Contact email
    pub email: String,
}

/// Input for provisioning a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub email: String,
}

impl User {
    /// Inserts a new user and returns its ID
    ///
    /// Only used by seeding; API operations never create users.
    pub async fn create(conn: &mut PgConnection, data: NewUser) -> Result<UserId, sqlx::Error> {
        let (user_id,): (UserId,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password, name, role, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id
            "#,
        )
        .bind(data.username)
        .bind(data.password)
        .bind(data.name)
        .bind(data.role)
        .bind(data.email)
        .fetch_one(conn)
        .await?;

        Ok(user_id)
    }

    /// Finds a user by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: UserId) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, name, role, email
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Finds a user by username and plaintext password
    ///
    /// ⚠️  Credentials are compared in the clear by the database.
    pub async fn find_by_credentials(
        conn: &mut PgConnection,
        username: &str,
        password: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, name, role, email
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(conn)
        .await?;

        Ok(user)
    }

    /// Counts all users
    pub async fn count(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(conn)
            .await?;

        Ok(count)
    }
}
