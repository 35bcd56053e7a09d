//! Attendance workflow actions
//!
//! Each action loads the aggregate, applies the in-memory transition, and
//! persists the whole row back.

use tracing::info;

use crate::common::{ApiError, ApiResult, UserId};
use crate::domains::events::models::{Event, RemoveOutcome, UnregisterOutcome};
use crate::kernel::ServerDeps;

async fn load(title: &str, deps: &ServerDeps) -> ApiResult<Event> {
    Event::find_by_title(title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))
}

/// none -> pending
pub async fn register(caller: UserId, title: String, deps: &ServerDeps) -> ApiResult<()> {
    let mut event = load(&title, deps).await?;
    event.register(caller)?;
    event.save(&deps.db_pool).await?;
    Ok(())
}

/// confirmed -> none, or pending -> none (cancellation)
pub async fn unregister(
    caller: UserId,
    title: String,
    deps: &ServerDeps,
) -> ApiResult<UnregisterOutcome> {
    let mut event = load(&title, deps).await?;
    let outcome = event.unregister(caller)?;
    event.save(&deps.db_pool).await?;
    Ok(outcome)
}

/// pending -> confirmed (organizer only)
pub async fn approve_attendee(
    caller: UserId,
    title: String,
    attendee_id: UserId,
    deps: &ServerDeps,
) -> ApiResult<()> {
    let mut event = load(&title, deps).await?;
    event.approve_attendee(caller, attendee_id)?;
    event.save(&deps.db_pool).await?;
    info!(event_id = %event.id, attendee_id = %attendee_id, "Attendee approved");
    Ok(())
}

/// confirmed -> none (removal) or pending -> none (rejection), organizer only
pub async fn remove_attendee(
    caller: UserId,
    title: String,
    attendee_id: UserId,
    deps: &ServerDeps,
) -> ApiResult<RemoveOutcome> {
    let mut event = load(&title, deps).await?;
    let outcome = event.remove_attendee(caller, attendee_id)?;
    event.save(&deps.db_pool).await?;
    Ok(outcome)
}
