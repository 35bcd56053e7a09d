use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::common::AuditLogId;

/// Days a log row survives before the opportunistic purge removes it.
const RETENTION_DAYS: i32 = 15;

/// Client audit log entry. Fire-and-forget: nothing in the primary flows
/// depends on these rows.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: AuditLogId,
    pub origin: String,
    pub kind: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Append an entry, purging expired rows as a side effect. The purge is
    /// best-effort; a failure there never fails the insert.
    pub async fn append(
        origin: String,
        kind: String,
        message: String,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        if let Err(e) = sqlx::query(
            "DELETE FROM audit_logs WHERE created_at < NOW() - make_interval(days => $1)",
        )
        .bind(RETENTION_DAYS)
        .execute(pool)
        .await
        {
            warn!(error = %e, "Audit log purge failed");
        }

        sqlx::query_as::<_, Self>(
            "INSERT INTO audit_logs (id, origin, kind, message)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(AuditLogId::new())
        .bind(origin)
        .bind(kind)
        .bind(message)
        .fetch_one(pool)
        .await
    }
}
