//! Event route handlers: CRUD, attendance workflow, comments, search.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::common::{ApiResult, CommentId, ReplyId, UserId};
use crate::domains::events::actions;
use crate::domains::events::actions::{CreateEventInput, UpdateEventInput};
use crate::domains::events::models::{RemoveOutcome, UnregisterOutcome};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

pub async fn add_event_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(input): Json<CreateEventInput>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let event = actions::create_event(auth.user_id, input, &deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Event created successfully",
            "event": event,
        })),
    ))
}

pub async fn get_events_handler(
    _auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
) -> ApiResult<Json<Vec<actions::EventView>>> {
    let events = actions::list_events(&deps).await?;
    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

pub async fn get_events_by_page_handler(
    _auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<PageRequest>,
) -> ApiResult<Json<actions::EventPage>> {
    let page = actions::list_events_page(req.page, req.limit, &deps).await?;
    Ok(Json(page))
}

pub async fn delete_event_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<Value>> {
    actions::delete_event(auth.user_id, req.title, &deps).await?;
    Ok(Json(json!({ "message": "Event deleted successfully" })))
}

pub async fn get_event_by_title_handler(
    _auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<actions::EventView>> {
    let event = actions::get_event_by_title(req.title, &deps).await?;
    Ok(Json(event))
}

pub async fn update_event_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(input): Json<UpdateEventInput>,
) -> ApiResult<Json<Value>> {
    actions::update_event(auth.user_id, input, &deps).await?;
    Ok(Json(json!({ "message": "Event updated successfully" })))
}

pub async fn register_for_event_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<Value>> {
    actions::register(auth.user_id, req.title, &deps).await?;
    Ok(Json(json!({ "message": "Registered for event successfully" })))
}

pub async fn unregister_from_event_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<Value>> {
    let outcome = actions::unregister(auth.user_id, req.title, &deps).await?;
    let message = match outcome {
        UnregisterOutcome::Unregistered => "Unregistered from event successfully",
        UnregisterOutcome::RequestCancelled => "Deregistration request cancelled successfully",
    };
    Ok(Json(json!({ "message": message })))
}

pub async fn get_user_status_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<actions::UserStatus>> {
    let status = actions::user_status(auth.user_id, req.title, &deps).await?;
    Ok(Json(status))
}

pub async fn get_address_and_attendees_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<actions::AddressAndAttendees>> {
    let disclosure = actions::address_and_attendees(auth.user_id, req.title, &deps).await?;
    Ok(Json(disclosure))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRequest {
    pub title: String,
    pub attendee_id: UserId,
}

pub async fn approve_attendee_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<AttendeeRequest>,
) -> ApiResult<Json<Value>> {
    actions::approve_attendee(auth.user_id, req.title, req.attendee_id, &deps).await?;
    Ok(Json(json!({ "message": "Attendee approved successfully" })))
}

pub async fn remove_attendee_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<AttendeeRequest>,
) -> ApiResult<Json<Value>> {
    let outcome = actions::remove_attendee(auth.user_id, req.title, req.attendee_id, &deps).await?;
    let message = match outcome {
        RemoveOutcome::Removed => "Attendee removed successfully",
        RemoveOutcome::Rejected => "Attendee rejected successfully",
    };
    Ok(Json(json!({ "message": message })))
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub title: String,
    pub comment: String,
}

pub async fn add_comment_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<Json<Value>> {
    let comments = actions::add_comment(auth.user_id, req.title, req.comment, &deps).await?;
    Ok(Json(json!({
        "message": "Comment added successfully",
        "comments": comments,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReplyRequest {
    pub title: String,
    pub comment_id: CommentId,
    pub reply: String,
}

pub async fn add_reply_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<AddReplyRequest>,
) -> ApiResult<Json<Value>> {
    let comments =
        actions::add_reply(auth.user_id, req.title, req.comment_id, req.reply, &deps).await?;
    Ok(Json(json!({
        "message": "Reply added successfully",
        "comments": comments,
    })))
}

pub async fn get_comments_handler(
    _auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<TitleRequest>,
) -> ApiResult<Json<Vec<crate::domains::events::models::CommentView>>> {
    let comments = actions::get_comments(req.title, &deps).await?;
    Ok(Json(comments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub title: String,
    pub comment_id: CommentId,
}

pub async fn delete_comment_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<Value>> {
    let comments =
        actions::delete_comment(auth.user_id, req.title, req.comment_id, &deps).await?;
    Ok(Json(json!({
        "message": "Comment deleted successfully",
        "comments": comments,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub title: String,
    pub comment_id: CommentId,
    pub reply_id: ReplyId,
}

pub async fn delete_reply_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<ReplyRequest>,
) -> ApiResult<Json<Value>> {
    let comments =
        actions::delete_reply(auth.user_id, req.title, req.comment_id, req.reply_id, &deps)
            .await?;
    Ok(Json(json!({
        "message": "Reply deleted successfully",
        "comments": comments,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentRequest {
    pub title: String,
    pub comment_id: CommentId,
    pub new_text: String,
}

pub async fn edit_comment_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<EditCommentRequest>,
) -> ApiResult<Json<Value>> {
    let comments =
        actions::edit_comment(auth.user_id, req.title, req.comment_id, req.new_text, &deps)
            .await?;
    Ok(Json(json!({
        "message": "Comment edited successfully",
        "comments": comments,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReplyRequest {
    pub title: String,
    pub comment_id: CommentId,
    pub reply_id: ReplyId,
    pub new_text: String,
}

pub async fn edit_reply_handler(
    auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<EditReplyRequest>,
) -> ApiResult<Json<Value>> {
    let comments = actions::edit_reply(
        auth.user_id,
        req.title,
        req.comment_id,
        req.reply_id,
        req.new_text,
        &deps,
    )
    .await?;
    Ok(Json(json!({
        "message": "Reply edited successfully",
        "comments": comments,
    })))
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_str: String,
    pub page: i64,
    pub limit: i64,
}

pub async fn search_events_handler(
    _auth: AuthUser,
    Extension(deps): Extension<Arc<ServerDeps>>,
    Json(req): Json<SearchRequest>,
) -> ApiResult<Json<actions::SearchResults>> {
    let results = actions::search_events(req.search_str, req.page, req.limit, &deps).await?;
    Ok(Json(results))
}
