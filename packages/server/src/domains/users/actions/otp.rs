//! Phone verification actions (OTP issuance + check)

use rand::Rng;
use tracing::{info, warn};

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Generate a 6-digit code, persist it on the user, and text it out.
///
/// Re-issuance is blocked once the phone is verified. The SMS send is
/// fire-and-forget.
pub async fn request_otp(user_id: UserId, deps: &ServerDeps) -> ApiResult<()> {
    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.phone_verified {
        return Err(ApiError::validation("Phone already verified"));
    }
    let phone = user
        .phone
        .ok_or_else(|| ApiError::validation("No phone number on file"))?;

    let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
    User::set_otp(user_id, Some(&code), &deps.db_pool).await?;

    let sms = deps.sms.clone();
    let email_name = deps.email_name.clone();
    tokio::spawn(async move {
        let body = format!("Your {} verification code is {}", email_name, code);
        if let Err(e) = sms.send_sms(&phone, &body).await {
            warn!(error = %e, "Failed to send OTP SMS");
        }
    });

    Ok(())
}

/// Compare the supplied code against the stored one and flip the
/// phone-verified flag.
pub async fn verify_otp(user_id: UserId, code: String, deps: &ServerDeps) -> ApiResult<()> {
    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.phone_verified {
        return Err(ApiError::validation("Phone already verified"));
    }
    let stored = user
        .otp_code
        .ok_or_else(|| ApiError::validation("No verification in progress"))?;

    if stored != code {
        return Err(ApiError::unauthorized("Invalid verification code"));
    }

    User::set_phone_verified(user_id, &deps.db_pool).await?;
    info!(user_id = %user_id, "Phone verified");
    Ok(())
}
