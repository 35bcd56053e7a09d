//! Email verification action

use crate::common::{ApiError, ApiResult};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Resolve the email from the opaque code and flip the verified flag.
pub async fn verify_email(auth_code: String, deps: &ServerDeps) -> ApiResult<()> {
    let email = deps
        .code_cipher
        .recover(&auth_code)
        .ok_or_else(|| ApiError::validation("Invalid auth code"))?;

    let email_hash = deps.hash_email(&email);
    let user = User::find_by_email_hash(&email_hash, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid auth code"))?;

    if user.verified {
        return Err(ApiError::validation("Email already verified"));
    }
    if user.auth_code != auth_code {
        return Err(ApiError::unauthorized("Invalid auth code"));
    }

    User::set_verified(user.id, &deps.db_pool).await?;
    Ok(())
}
