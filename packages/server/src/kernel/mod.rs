// Infrastructure layer: trait abstractions over external services and the
// dependency container handed to every handler.

pub mod deps;
pub mod google;
pub mod mailer;
pub mod traits;

pub use deps::{ServerDeps, TwilioSmsSender};
pub use google::GoogleVerifier;
pub use mailer::SmtpMailer;
pub use traits::{BaseIdentityVerifier, BaseMailer, BaseSmsSender, FederatedIdentity};
