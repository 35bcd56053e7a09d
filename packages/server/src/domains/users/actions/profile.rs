//! Profile read/update actions

use serde::Serialize;

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::events::models::EventSummary;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Profile as returned to its owner: identity fields plus the three derived
/// event lists, each an indexed reverse lookup rather than a scan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: String,
    pub pfp: String,
    pub phone: Option<String>,
    pub phone_verified: bool,
    /// Plaintext address, recovered from the stored opaque code.
    pub email: Option<String>,
    pub created_events: Vec<EventSummary>,
    pub attending_events: Vec<EventSummary>,
    pub requested_events: Vec<EventSummary>,
}

pub async fn get_profile(user_id: UserId, deps: &ServerDeps) -> ApiResult<ProfileView> {
    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let email = deps.code_cipher.recover(&user.auth_code);

    let created_events = EventSummary::created_by(user_id, &deps.db_pool).await?;
    let attending_events = EventSummary::attended_by(user_id, &deps.db_pool).await?;
    let requested_events = EventSummary::requested_by(user_id, &deps.db_pool).await?;

    Ok(ProfileView {
        name: user.name,
        pfp: user.pfp,
        phone: user.phone,
        phone_verified: user.phone_verified,
        email,
        created_events,
        attending_events,
        requested_events,
    })
}

pub async fn update_profile(
    user_id: UserId,
    name: Option<String>,
    pfp: Option<String>,
    phone: Option<String>,
    deps: &ServerDeps,
) -> ApiResult<()> {
    if matches!(&name, Some(n) if n.trim().is_empty()) {
        return Err(ApiError::validation("Name must not be empty"));
    }

    User::update_profile(
        user_id,
        name.as_deref(),
        pfp.as_deref(),
        phone.as_deref(),
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(())
}
