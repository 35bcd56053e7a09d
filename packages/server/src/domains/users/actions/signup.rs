//! Signup action

use tracing::warn;

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::auth::hash_password;
use crate::domains::users::models::{User, DEFAULT_PFP_URL};
use crate::kernel::ServerDeps;

/// Create an unverified account and send the verification link.
///
/// The email send is fire-and-forget: a delivery failure is logged and never
/// fails the signup.
pub async fn signup(
    name: String,
    email: String,
    password: String,
    img_url: Option<String>,
    deps: &ServerDeps,
) -> ApiResult<()> {
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let email_hash = deps.hash_email(&email);
    if User::find_by_email_hash(&email_hash, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("User already exists"));
    }

    let auth_code = deps.code_cipher.issue(&email);
    let password_hash = hash_password(&password, deps.bcrypt_cost)?;

    let user = User {
        id: UserId::new(),
        name: name.clone(),
        email_hash,
        password_hash,
        pfp: img_url.unwrap_or_else(|| DEFAULT_PFP_URL.to_string()),
        phone: None,
        phone_verified: false,
        otp_code: None,
        auth_code: auth_code.clone(),
        auth_code_created_at: chrono::Utc::now(),
        verified: false,
        created_at: chrono::Utc::now(),
    };
    user.insert(&deps.db_pool).await?;

    let mailer = deps.mailer.clone();
    let email_name = deps.email_name.clone();
    let verify_url = format!("{}/verify-email?code={}", deps.frontend_url, auth_code);
    tokio::spawn(async move {
        let subject = format!("{} Sign Up", email_name);
        let text = format!("Hi {}! You have signed up for {}!", name, email_name);
        let html = format!(
            "<b><p>Hi {}!</p></b><p>You have signed up for {}!</p>\
             <p>Click on the link below to verify your email address:</p>\
             <p><a href=\"{}\">Verify Email</a></p>",
            name, email_name, verify_url
        );
        if let Err(e) = mailer.send(&email, &subject, &text, &html).await {
            warn!(error = %e, "Failed to send verification email");
        }
    });

    Ok(())
}
