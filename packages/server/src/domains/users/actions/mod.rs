// User/credential workflow actions. One file per workflow.

pub mod google_login;
pub mod login;
pub mod otp;
pub mod password_reset;
pub mod profile;
pub mod signup;
pub mod verify_email;

pub use google_login::google_login;
pub use login::login;
pub use otp::{request_otp, verify_otp};
pub use password_reset::{request_password_reset, reset_password};
pub use profile::{get_profile, update_profile, ProfileView};
pub use signup::signup;
pub use verify_email::verify_email;
