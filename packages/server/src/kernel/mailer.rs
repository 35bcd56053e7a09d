//! SMTP mailer (lettre) behind the `BaseMailer` trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::kernel::traits::BaseMailer;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a STARTTLS transport against the configured relay. `from_name`
    /// is the display name, `from_addr` the account the mail is sent as.
    pub fn new(
        host: &str,
        port: u16,
        user: String,
        pass: String,
        from_name: &str,
        from_addr: &str,
    ) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("Invalid SMTP host")?
            .port(port)
            .credentials(Credentials::new(user, pass))
            .build();

        let from: Mailbox = format!("{} <{}>", from_name, from_addr)
            .parse()
            .context("Invalid sender mailbox")?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl BaseMailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse().context("Invalid recipient address")?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                html.to_string(),
            ))
            .context("Failed to build email")?;

        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;

        Ok(())
    }
}
