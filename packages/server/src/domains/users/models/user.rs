use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::UserId;

/// Fallback profile picture when signup does not supply one.
pub const DEFAULT_PFP_URL: &str =
    "https://icrier.org/wp-content/uploads/2022/09/Event-Image-Not-Found.jpg";

/// User model - SQL persistence layer
///
/// The email is stored only as a keyed hash (`email_hash`); the reversible
/// `auth_code` is the path back to the plaintext address. Passwords are
/// stored bcrypt-hashed, never compared in plaintext.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email_hash: String,
    pub password_hash: String,
    pub pfp: String,

    // Phone verification state
    pub phone: Option<String>,
    pub phone_verified: bool,
    pub otp_code: Option<String>,

    // Opaque verification/reset code and its freshness timestamp
    pub auth_code: String,
    pub auth_code_created_at: DateTime<Utc>,

    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user: how organizers, attendees, and comment
/// authors appear to other users.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub pfp: String,
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    id: UserId,
    name: String,
    pfp: String,
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find user by hashed email (the unique lookup key)
    pub async fn find_by_email_hash(
        email_hash: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email_hash = $1")
            .bind(email_hash)
            .fetch_optional(pool)
            .await
    }

    /// Insert new user
    pub async fn insert(&self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                id,
                name,
                email_hash,
                password_hash,
                pfp,
                phone,
                phone_verified,
                otp_code,
                auth_code,
                auth_code_created_at,
                verified
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email_hash)
        .bind(&self.password_hash)
        .bind(&self.pfp)
        .bind(&self.phone)
        .bind(self.phone_verified)
        .bind(&self.otp_code)
        .bind(&self.auth_code)
        .bind(self.auth_code_created_at)
        .bind(self.verified)
        .fetch_one(pool)
        .await
    }

    /// Flip the email-verified flag
    pub async fn set_verified(id: UserId, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Store a freshly issued opaque code, resetting its freshness clock
    pub async fn set_auth_code(
        id: UserId,
        auth_code: &str,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET auth_code = $2, auth_code_created_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(auth_code)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Replace the stored password hash
    pub async fn set_password(
        id: UserId,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Store (or clear) the outstanding SMS code
    pub async fn set_otp(
        id: UserId,
        otp_code: Option<&str>,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET otp_code = $2 WHERE id = $1")
            .bind(id)
            .bind(otp_code)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark the phone verified and clear the outstanding code
    pub async fn set_phone_verified(id: UserId, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET phone_verified = TRUE, otp_code = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Partial profile update. A phone change invalidates the previous
    /// verification: the flag drops and any outstanding code is cleared.
    pub async fn update_profile(
        id: UserId,
        name: Option<&str>,
        pfp: Option<&str>,
        phone: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "UPDATE users SET
                name = COALESCE($2, name),
                pfp = COALESCE($3, pfp),
                phone = COALESCE($4, phone),
                phone_verified = CASE WHEN $4 IS NULL THEN phone_verified ELSE FALSE END,
                otp_code = CASE WHEN $4 IS NULL THEN otp_code ELSE NULL END
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(pfp)
        .bind(phone)
        .fetch_optional(pool)
        .await
    }

    /// Resolve a batch of user ids to their public `{name, pfp}` summaries.
    /// Unknown ids are simply absent from the map.
    pub async fn summaries_by_ids(
        ids: &[UserId],
        pool: &PgPool,
    ) -> Result<HashMap<UserId, UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, UserSummaryRow>(
            "SELECT id, name, pfp FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.id,
                    UserSummary {
                        name: row.name,
                        pfp: row.pfp,
                    },
                )
            })
            .collect())
    }
}
