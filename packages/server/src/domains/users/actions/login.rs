//! Login action

use crate::common::{ApiError, ApiResult};
use crate::domains::auth::verify_password;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Validate credentials and issue a session token.
pub async fn login(email: String, password: String, deps: &ServerDeps) -> ApiResult<String> {
    let email_hash = deps.hash_email(&email);
    let user = User::find_by_email_hash(&email_hash, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid password"));
    }
    if !user.verified {
        return Err(ApiError::forbidden("Email not verified"));
    }

    let token = deps.jwt_service.create_token(user.id)?;
    Ok(token)
}
