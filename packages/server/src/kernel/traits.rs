// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "sign up a user") lives in domain actions that use
// these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMailer)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Mailer Trait (Infrastructure - SMTP)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send an email with plain-text and HTML alternatives.
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<()>;
}

// =============================================================================
// SMS Trait (Infrastructure - OTP delivery)
// =============================================================================

#[async_trait]
pub trait BaseSmsSender: Send + Sync {
    /// Send an SMS message to an E.164 phone number.
    async fn send_sms(&self, phone_number: &str, body: &str) -> Result<()>;
}

// =============================================================================
// Federated Identity Trait (Infrastructure - Google login)
// =============================================================================

/// Identity attested by an external provider.
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[async_trait]
pub trait BaseIdentityVerifier: Send + Sync {
    /// Verify an externally-issued identity assertion and return the
    /// attested identity. Fails on invalid/expired tokens or audience
    /// mismatch.
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity>;
}
