//! Client audit log endpoint (public, fire-and-forget sink).

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::common::ApiResult;
use crate::domains::audit::AuditLog;
use crate::kernel::ServerDeps;

#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub origin: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

pub async fn create_log_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<LogRequest>,
) -> ApiResult<(StatusCode, Json<AuditLog>)> {
    let entry = AuditLog::append(req.origin, req.kind, req.message, &deps.db_pool).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
