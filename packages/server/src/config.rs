use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub email_hash_secret: String,
    /// Hex-encoded 32-byte AES key for the reversible auth codes.
    pub encryption_key: String,
    /// Hex-encoded 16-byte AES IV for the reversible auth codes.
    pub encryption_iv: String,
    pub bcrypt_cost: u32,
    /// Seconds a verification/reset code stays fresh.
    pub auth_code_ttl_secs: i64,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub email_name: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from_number: String,
    pub google_client_id: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            frontend_url: env::var("FRONTEND_URL").context("FRONTEND_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "we-meet-offline".to_string()),
            email_hash_secret: env::var("EMAIL_HASH_SECRET")
                .context("EMAIL_HASH_SECRET must be set")?,
            encryption_key: env::var("ENCRYPTION_KEY").context("ENCRYPTION_KEY must be set")?,
            encryption_iv: env::var("ENCRYPTION_IV").context("ENCRYPTION_IV must be set")?,
            bcrypt_cost: env::var("SALT_WORK_FACTOR")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .context("SALT_WORK_FACTOR must be a valid number")?,
            auth_code_ttl_secs: env::var("AUTH_CODE_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("AUTH_CODE_TTL_SECS must be a valid number")?,
            smtp_host: env::var("EMAIL_SMTP_HOST").context("EMAIL_SMTP_HOST must be set")?,
            smtp_port: env::var("EMAIL_SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("EMAIL_SMTP_PORT must be a valid number")?,
            smtp_user: env::var("EMAIL_USER").context("EMAIL_USER must be set")?,
            smtp_pass: env::var("EMAIL_PASS").context("EMAIL_PASS must be set")?,
            email_name: env::var("EMAIL_NAME").unwrap_or_else(|_| "We Meet Offline".to_string()),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            twilio_from_number: env::var("TWILIO_FROM_NUMBER")
                .context("TWILIO_FROM_NUMBER must be set")?,
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .context("GOOGLE_CLIENT_ID must be set")?,
        })
    }
}
