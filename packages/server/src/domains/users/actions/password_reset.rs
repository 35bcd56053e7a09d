//! Password reset actions (request + perform)

use anyhow::Context;

use crate::common::{ApiError, ApiResult};
use crate::domains::auth::hash_password;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Email a reset link. The stored code is reissued when it is older than the
/// configured freshness window, otherwise the still-fresh one is reused.
///
/// Unlike the signup notification this send is awaited: the whole point of
/// the request is the email, so a delivery failure fails it.
pub async fn request_password_reset(email: String, deps: &ServerDeps) -> ApiResult<()> {
    let email_hash = deps.hash_email(&email);
    let user = User::find_by_email_hash(&email_hash, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Email not registered."))?;

    let mut auth_code = user.auth_code.clone();
    if chrono::Utc::now() - user.auth_code_created_at > deps.auth_code_ttl {
        auth_code = deps.code_cipher.issue(&email);
        User::set_auth_code(user.id, &auth_code, &deps.db_pool).await?;
    }

    let reset_url = format!("{}/reset-password?code={}", deps.frontend_url, auth_code);
    let subject = format!("{} Password Reset", deps.email_name);
    let text = format!(
        "Hi {}! You have requested a password reset for {}.",
        user.name, deps.email_name
    );
    let html = format!(
        "<b><p>Hi {}!</p></b><p>You have requested a password reset for {}.</p>\
         <p>Click on the link below to reset your password:</p>\
         <p><a href=\"{}\">Reset Password</a></p>",
        user.name, deps.email_name, reset_url
    );

    deps.mailer
        .send(&email, &subject, &text, &html)
        .await
        .context("Failed to send password reset email")?;

    Ok(())
}

/// Perform the reset: the code must decode, match the stored one, and still
/// be inside the freshness window.
pub async fn reset_password(
    auth_code: String,
    password: String,
    deps: &ServerDeps,
) -> ApiResult<()> {
    let email = deps
        .code_cipher
        .recover(&auth_code)
        .ok_or_else(|| ApiError::validation("Invalid auth code"))?;

    let email_hash = deps.hash_email(&email);
    let user = User::find_by_email_hash(&email_hash, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid auth code"))?;

    if chrono::Utc::now() - user.auth_code_created_at > deps.auth_code_ttl {
        return Err(ApiError::validation("Auth code expired"));
    }
    if user.auth_code != auth_code {
        return Err(ApiError::unauthorized("Invalid auth code"));
    }
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let password_hash = hash_password(&password, deps.bcrypt_cost)?;
    User::set_password(user.id, &password_hash, &deps.db_pool).await?;
    Ok(())
}
