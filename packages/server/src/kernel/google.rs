//! Google ID-token verification via the tokeninfo endpoint.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::kernel::traits::{BaseIdentityVerifier, FederatedIdentity};

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Fields of the tokeninfo response we care about.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: String,
    #[serde(default)]
    email_verified: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl BaseIdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<FederatedIdentity> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .context("Failed to reach Google tokeninfo")?;

        if !response.status().is_success() {
            bail!("Google rejected the identity token");
        }

        let info: TokenInfo = response
            .json()
            .await
            .context("Failed to parse tokeninfo response")?;

        if info.aud != self.client_id {
            bail!("Identity token audience mismatch");
        }
        if info.email_verified.as_deref() != Some("true") {
            bail!("Google account email is not verified");
        }

        Ok(FederatedIdentity {
            name: info.name.unwrap_or_else(|| info.email.clone()),
            email: info.email,
            picture: info.picture,
        })
    }
}
