//! Federated (Google) login action

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::auth::hash_password;
use crate::domains::users::models::{User, DEFAULT_PFP_URL};
use crate::kernel::ServerDeps;

/// Verify a Google-issued identity assertion and issue a session token.
///
/// First-time logins auto-provision a pre-verified account with a random
/// password, revealed once in the welcome email. An existing unverified
/// account is flipped verified by the federated proof.
pub async fn google_login(id_token: String, deps: &ServerDeps) -> ApiResult<String> {
    let identity = deps
        .identity
        .verify(&id_token)
        .await
        .map_err(|_| ApiError::unauthorized("Invalid identity token"))?;

    let email_hash = deps.hash_email(&identity.email);
    let user = match User::find_by_email_hash(&email_hash, &deps.db_pool).await? {
        Some(user) => {
            if !user.verified {
                User::set_verified(user.id, &deps.db_pool).await?;
            }
            user
        }
        None => {
            let generated_password: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(16)
                .map(char::from)
                .collect();

            let user = User {
                id: UserId::new(),
                name: identity.name.clone(),
                email_hash,
                password_hash: hash_password(&generated_password, deps.bcrypt_cost)?,
                pfp: identity
                    .picture
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PFP_URL.to_string()),
                phone: None,
                phone_verified: false,
                otp_code: None,
                auth_code: deps.code_cipher.issue(&identity.email),
                auth_code_created_at: chrono::Utc::now(),
                verified: true,
                created_at: chrono::Utc::now(),
            };
            let user = user.insert(&deps.db_pool).await?;
            info!(user_id = %user.id, "Provisioned new user from Google login");

            let mailer = deps.mailer.clone();
            let email_name = deps.email_name.clone();
            let email = identity.email.clone();
            let name = identity.name.clone();
            tokio::spawn(async move {
                let subject = format!("Welcome to {}", email_name);
                let text = format!(
                    "Hi {}! Your {} account was created from your Google login. \
                     Your generated password is: {}",
                    name, email_name, generated_password
                );
                let html = format!(
                    "<b><p>Hi {}!</p></b><p>Your {} account was created from your \
                     Google login.</p><p>Your generated password is: \
                     <code>{}</code></p>",
                    name, email_name, generated_password
                );
                if let Err(e) = mailer.send(&email, &subject, &text, &html).await {
                    warn!(error = %e, "Failed to send welcome email");
                }
            });

            user
        }
    };

    let token = deps.jwt_service.create_token(user.id)?;
    Ok(token)
}
