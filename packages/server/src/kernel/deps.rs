//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to every request handler through an
//! axum `Extension`. All external services sit behind trait abstractions so
//! tests can swap them out.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::{CodeCipher, JwtService};
use crate::kernel::traits::{BaseMailer, BaseSmsSender};
use crate::kernel::BaseIdentityVerifier;

// =============================================================================
// TwilioService Adapter (implements BaseSmsSender trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseSmsSender trait
pub struct TwilioSmsSender(pub Arc<TwilioService>);

impl TwilioSmsSender {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseSmsSender for TwilioSmsSender {
    async fn send_sms(&self, phone_number: &str, body: &str) -> Result<()> {
        self.0
            .send_sms(phone_number, body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers and actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn BaseMailer>,
    pub sms: Arc<dyn BaseSmsSender>,
    pub identity: Arc<dyn BaseIdentityVerifier>,
    pub jwt_service: Arc<JwtService>,
    pub code_cipher: Arc<CodeCipher>,
    /// Secret keying the stored email hashes.
    pub email_hash_secret: String,
    pub bcrypt_cost: u32,
    /// How long a verification/reset code stays fresh.
    pub auth_code_ttl: chrono::Duration,
    /// Base URL the verification/reset links point at.
    pub frontend_url: String,
    /// Display name used in outgoing email.
    pub email_name: String,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db_pool: PgPool,
        mailer: Arc<dyn BaseMailer>,
        sms: Arc<dyn BaseSmsSender>,
        identity: Arc<dyn BaseIdentityVerifier>,
        jwt_service: Arc<JwtService>,
        code_cipher: Arc<CodeCipher>,
        email_hash_secret: String,
        bcrypt_cost: u32,
        auth_code_ttl_secs: i64,
        frontend_url: String,
        email_name: String,
    ) -> Self {
        Self {
            db_pool,
            mailer,
            sms,
            identity,
            jwt_service,
            code_cipher,
            email_hash_secret,
            bcrypt_cost,
            auth_code_ttl: chrono::Duration::seconds(auth_code_ttl_secs),
            frontend_url,
            email_name,
        }
    }

    /// Hash an email under the configured secret.
    pub fn hash_email(&self, email: &str) -> String {
        crate::domains::auth::hash_email(&self.email_hash_secret, email)
    }
}
