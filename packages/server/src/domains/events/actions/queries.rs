//! Event read actions: listings, detail, caller status, and the gated
//! address/attendee disclosure.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::{page_count, ApiError, ApiResult, PageParams, UserId};
use crate::domains::events::models::{Event, EventWithOrganizer};
use crate::domains::users::models::{User, UserSummary};
use crate::kernel::ServerDeps;

/// Public projection of an event: address and both attendance lists
/// redacted, organizer reduced to `{name, pfp}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub title: String,
    pub description: String,
    pub begins_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_virtual: bool,
    pub tags: Vec<String>,
    pub picture: String,
    pub organizer: UserSummary,
}

impl From<EventWithOrganizer> for EventView {
    fn from(row: EventWithOrganizer) -> Self {
        EventView {
            title: row.event.title,
            description: row.event.description,
            begins_at: row.event.begins_at,
            ends_at: row.event.ends_at,
            is_virtual: row.event.is_virtual,
            tags: row.event.tags,
            picture: row.event.picture,
            organizer: UserSummary {
                name: row.organizer_name,
                pfp: row.organizer_pfp,
            },
        }
    }
}

/// All events, soonest first.
pub async fn list_events(deps: &ServerDeps) -> ApiResult<Vec<EventView>> {
    let rows = EventWithOrganizer::list_all(&deps.db_pool).await?;
    Ok(rows.into_iter().map(EventView::from).collect())
}

#[derive(Debug, Serialize)]
pub struct EventPage {
    pub events: Vec<EventView>,
    pub pages: i64,
}

/// One zero-based page of events plus the total page count.
pub async fn list_events_page(
    page: i64,
    limit: i64,
    deps: &ServerDeps,
) -> ApiResult<EventPage> {
    let params = PageParams::new(page, limit)?;
    let total = Event::count_all(&deps.db_pool).await?;
    let rows = EventWithOrganizer::list_page(params, &deps.db_pool).await?;

    Ok(EventPage {
        events: rows.into_iter().map(EventView::from).collect(),
        pages: page_count(total, params.limit),
    })
}

pub async fn get_event_by_title(title: String, deps: &ServerDeps) -> ApiResult<EventView> {
    let row = EventWithOrganizer::find_by_title(&title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;
    Ok(EventView::from(row))
}

/// The caller's standing with respect to one event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub is_organizer: bool,
    pub is_attendee: bool,
    pub has_requested: bool,
}

pub async fn user_status(
    caller: UserId,
    title: String,
    deps: &ServerDeps,
) -> ApiResult<UserStatus> {
    let event = Event::find_by_title(&title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok(UserStatus {
        is_organizer: event.is_organizer(caller),
        is_attendee: event.is_attendee(caller),
        has_requested: event.has_requested(caller),
    })
}

/// Address plus attendee disclosure. The pending list is organizer-only and
/// omitted from the attendee variant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAndAttendees {
    pub address: String,
    pub attendees: Vec<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_attendees: Option<Vec<UserSummary>>,
}

pub async fn address_and_attendees(
    caller: UserId,
    title: String,
    deps: &ServerDeps,
) -> ApiResult<AddressAndAttendees> {
    let event = Event::find_by_title(&title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    if !event.is_participant(caller) {
        return Err(ApiError::forbidden("Unauthorized action"));
    }

    let mut all_ids = event.attendee_ids.clone();
    all_ids.extend(event.requested_attendee_ids.iter().copied());
    let summaries = User::summaries_by_ids(&all_ids, &deps.db_pool).await?;

    let resolve = |ids: &[UserId]| -> Vec<UserSummary> {
        ids.iter()
            .filter_map(|id| summaries.get(id).cloned())
            .collect()
    };

    let requested_attendees = if event.is_organizer(caller) {
        Some(resolve(&event.requested_attendee_ids))
    } else {
        None
    };

    Ok(AddressAndAttendees {
        address: event.address.clone(),
        attendees: resolve(&event.attendee_ids),
        requested_attendees,
    })
}
