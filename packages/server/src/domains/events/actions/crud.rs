//! Event create/update/delete actions

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::common::{ApiError, ApiResult, EventId, UserId};
use crate::domains::events::models::{Event, DEFAULT_EVENT_PICTURE};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub title: String,
    pub description: String,
    pub begins_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub img_url: Option<String>,
}

/// Updates select the event by title; the title itself is not renameable
/// and the organizer is never taken from the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    pub title: String,
    pub description: Option<String>,
    pub begins_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_virtual: Option<bool>,
    pub address: Option<String>,
    pub tags: Option<Vec<String>>,
    pub img_url: Option<String>,
}

/// Create an event owned by the caller.
///
/// Creating events requires a verified phone; titles are globally unique.
pub async fn create_event(
    caller: UserId,
    input: CreateEventInput,
    deps: &ServerDeps,
) -> ApiResult<Event> {
    let user = User::find_by_id(caller, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    if !user.phone_verified {
        return Err(ApiError::forbidden("Phone not verified"));
    }

    Event::validate_times(input.begins_at, input.ends_at)?;

    if Event::find_by_title(&input.title, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Event with this title already exists"));
    }

    let event = Event {
        id: EventId::new(),
        title: input.title,
        description: input.description,
        begins_at: input.begins_at,
        ends_at: input.ends_at,
        is_virtual: input.is_virtual,
        address: input.address,
        tags: input.tags,
        organizer_id: caller,
        attendee_ids: Vec::new(),
        requested_attendee_ids: Vec::new(),
        comments: Vec::new(),
        picture: input
            .img_url
            .unwrap_or_else(|| DEFAULT_EVENT_PICTURE.to_string()),
        created_at: chrono::Utc::now(),
    };

    let event = event.insert(&deps.db_pool).await?;
    info!(event_id = %event.id, organizer_id = %caller, "Event created");
    Ok(event)
}

/// Organizer-only partial update. The merged timestamps must still satisfy
/// start < end before anything is persisted.
pub async fn update_event(
    caller: UserId,
    input: UpdateEventInput,
    deps: &ServerDeps,
) -> ApiResult<()> {
    let mut event = Event::find_by_title(&input.title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    if !event.is_organizer(caller) {
        return Err(ApiError::forbidden("Unauthorized action"));
    }

    let begins_at = input.begins_at.unwrap_or(event.begins_at);
    let ends_at = input.ends_at.unwrap_or(event.ends_at);
    Event::validate_times(begins_at, ends_at)?;

    event.begins_at = begins_at;
    event.ends_at = ends_at;
    if let Some(description) = input.description {
        event.description = description;
    }
    if let Some(is_virtual) = input.is_virtual {
        event.is_virtual = is_virtual;
    }
    if let Some(address) = input.address {
        event.address = address;
    }
    if let Some(tags) = input.tags {
        event.tags = tags;
    }
    if let Some(img_url) = input.img_url {
        event.picture = img_url;
    }

    event.save(&deps.db_pool).await?;
    Ok(())
}

/// Organizer-only delete.
pub async fn delete_event(caller: UserId, title: String, deps: &ServerDeps) -> ApiResult<()> {
    let event = Event::find_by_title(&title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    if !event.is_organizer(caller) {
        return Err(ApiError::forbidden("Unauthorized action"));
    }

    Event::delete(event.id, &deps.db_pool).await?;
    info!(event_id = %event.id, "Event deleted");
    Ok(())
}
