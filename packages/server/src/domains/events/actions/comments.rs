//! Comment/reply actions
//!
//! Every mutation persists the aggregate and answers with the re-populated
//! comment tree (authors resolved to `{name, pfp}`) for client convenience.

use crate::common::{ApiError, ApiResult, CommentId, ReplyId, UserId};
use crate::domains::events::models::comment::{author_ids, populate};
use crate::domains::events::models::{CommentView, Event};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

async fn load(title: &str, deps: &ServerDeps) -> ApiResult<Event> {
    Event::find_by_title(title, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Event not found"))
}

async fn populated(event: &Event, deps: &ServerDeps) -> ApiResult<Vec<CommentView>> {
    let authors = User::summaries_by_ids(&author_ids(&event.comments), &deps.db_pool).await?;
    Ok(populate(&event.comments, &authors))
}

pub async fn get_comments(title: String, deps: &ServerDeps) -> ApiResult<Vec<CommentView>> {
    let event = load(&title, deps).await?;
    populated(&event, deps).await
}

pub async fn add_comment(
    caller: UserId,
    title: String,
    text: String,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.add_comment(caller, text)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}

pub async fn add_reply(
    caller: UserId,
    title: String,
    comment_id: CommentId,
    text: String,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.add_reply(caller, comment_id, text)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}

pub async fn edit_comment(
    caller: UserId,
    title: String,
    comment_id: CommentId,
    new_text: String,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.edit_comment(caller, comment_id, new_text)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}

pub async fn edit_reply(
    caller: UserId,
    title: String,
    comment_id: CommentId,
    reply_id: ReplyId,
    new_text: String,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.edit_reply(caller, comment_id, reply_id, new_text)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}

pub async fn delete_comment(
    caller: UserId,
    title: String,
    comment_id: CommentId,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.delete_comment(caller, comment_id)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}

pub async fn delete_reply(
    caller: UserId,
    title: String,
    comment_id: CommentId,
    reply_id: ReplyId,
    deps: &ServerDeps,
) -> ApiResult<Vec<CommentView>> {
    let mut event = load(&title, deps).await?;
    event.delete_reply(caller, comment_id, reply_id)?;
    event.save(&deps.db_pool).await?;
    populated(&event, deps).await
}
