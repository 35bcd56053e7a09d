//! The event aggregate: persistence plus the attendance/comment rules.
//!
//! All list and comment mutations are in-memory methods on [`Event`] so the
//! invariants (attendee/request disjointness, participant-only commenting,
//! organizer administration) live in one place and are testable without a
//! database. `save` persists the whole row afterwards; concurrent writers to
//! the same event are last-write-wins.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{ApiError, ApiResult, CommentId, EventId, PageParams, ReplyId, UserId};
use crate::domains::events::models::comment::{Comment, Reply};

/// Fallback picture when event creation does not supply one.
pub const DEFAULT_EVENT_PICTURE: &str = "https://example.com/default-event-pic.png";

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub begins_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_virtual: bool,
    /// Visible only to the organizer and confirmed attendees.
    pub address: String,
    pub tags: Vec<String>,
    /// Immutable owner.
    pub organizer_id: UserId,
    pub attendee_ids: Vec<UserId>,
    pub requested_attendee_ids: Vec<UserId>,
    #[sqlx(json)]
    pub comments: Vec<Comment>,
    pub picture: String,
    pub created_at: DateTime<Utc>,
}

/// What happened on unregister: the caller left the confirmed list, or
/// cancelled a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnregisterOutcome {
    Unregistered,
    RequestCancelled,
}

/// What happened on remove-attendee: a confirmed attendee was removed, or a
/// pending request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Rejected,
}

// ============================================================================
// Aggregate rules (pure, in-memory)
// ============================================================================

impl Event {
    /// Start must be strictly before end; checked before every persist.
    pub fn validate_times(
        begins_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> ApiResult<()> {
        if begins_at >= ends_at {
            return Err(ApiError::validation(
                "Event end time must be after start time",
            ));
        }
        Ok(())
    }

    pub fn is_organizer(&self, user_id: UserId) -> bool {
        self.organizer_id == user_id
    }

    pub fn is_attendee(&self, user_id: UserId) -> bool {
        self.attendee_ids.contains(&user_id)
    }

    pub fn has_requested(&self, user_id: UserId) -> bool {
        self.requested_attendee_ids.contains(&user_id)
    }

    /// Organizer or confirmed attendee: who may comment.
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.is_organizer(user_id) || self.is_attendee(user_id)
    }

    /// none -> pending. Re-registering while already pending is a no-op
    /// (set-union); registering while confirmed is a conflict.
    pub fn register(&mut self, user_id: UserId) -> ApiResult<()> {
        if self.is_attendee(user_id) {
            return Err(ApiError::conflict("Already registered for this event"));
        }
        if !self.has_requested(user_id) {
            self.requested_attendee_ids.push(user_id);
        }
        Ok(())
    }

    /// confirmed -> none, or pending -> none.
    pub fn unregister(&mut self, user_id: UserId) -> ApiResult<UnregisterOutcome> {
        if self.is_attendee(user_id) {
            self.attendee_ids.retain(|id| *id != user_id);
            return Ok(UnregisterOutcome::Unregistered);
        }
        if self.has_requested(user_id) {
            self.requested_attendee_ids.retain(|id| *id != user_id);
            return Ok(UnregisterOutcome::RequestCancelled);
        }
        Err(ApiError::validation("Not registered for this event"))
    }

    /// pending -> confirmed. Organizer only.
    pub fn approve_attendee(&mut self, caller: UserId, target: UserId) -> ApiResult<()> {
        if !self.is_organizer(caller) {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        if !self.has_requested(target) {
            return Err(ApiError::validation("Attendee has not requested to join"));
        }
        self.requested_attendee_ids.retain(|id| *id != target);
        self.attendee_ids.push(target);
        Ok(())
    }

    /// confirmed -> none (removal) or pending -> none (rejection).
    /// Organizer only.
    pub fn remove_attendee(
        &mut self,
        caller: UserId,
        target: UserId,
    ) -> ApiResult<RemoveOutcome> {
        if !self.is_organizer(caller) {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        if self.is_attendee(target) {
            self.attendee_ids.retain(|id| *id != target);
            return Ok(RemoveOutcome::Removed);
        }
        if self.has_requested(target) {
            self.requested_attendee_ids.retain(|id| *id != target);
            return Ok(RemoveOutcome::Rejected);
        }
        Err(ApiError::validation("Attendee not registered"))
    }

    /// Add a top-level comment. Participants only.
    pub fn add_comment(&mut self, author: UserId, text: String) -> ApiResult<CommentId> {
        if !self.is_participant(author) {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        let comment = Comment::new(author, text);
        let id = comment.id;
        self.comments.push(comment);
        Ok(id)
    }

    /// Attach a reply to an existing comment. Participants only.
    pub fn add_reply(
        &mut self,
        author: UserId,
        comment_id: CommentId,
        text: String,
    ) -> ApiResult<ReplyId> {
        let is_participant = self.is_participant(author);
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        if !is_participant {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        let reply = Reply::new(author, text);
        let id = reply.id;
        comment.replies.push(reply);
        Ok(id)
    }

    /// Authors may edit their own comments.
    pub fn edit_comment(
        &mut self,
        caller: UserId,
        comment_id: CommentId,
        new_text: String,
    ) -> ApiResult<()> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        if comment.author_id != caller {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        comment.text = new_text;
        Ok(())
    }

    /// Authors may edit their own replies.
    pub fn edit_reply(
        &mut self,
        caller: UserId,
        comment_id: CommentId,
        reply_id: ReplyId,
        new_text: String,
    ) -> ApiResult<()> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        let reply = comment
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| ApiError::not_found("Reply not found"))?;
        if reply.author_id != caller {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        reply.text = new_text;
        Ok(())
    }

    /// The author or the organizer may delete a comment (and its replies
    /// with it).
    pub fn delete_comment(&mut self, caller: UserId, comment_id: CommentId) -> ApiResult<()> {
        let comment = self
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        if comment.author_id != caller && !self.is_organizer(caller) {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        self.comments.retain(|c| c.id != comment_id);
        Ok(())
    }

    /// The author or the organizer may delete a reply, mirroring the comment
    /// rule.
    pub fn delete_reply(
        &mut self,
        caller: UserId,
        comment_id: CommentId,
        reply_id: ReplyId,
    ) -> ApiResult<()> {
        let is_organizer = self.is_organizer(caller);
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| ApiError::not_found("Comment not found"))?;
        let reply = comment
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| ApiError::not_found("Reply not found"))?;
        if reply.author_id != caller && !is_organizer {
            return Err(ApiError::forbidden("Unauthorized action"));
        }
        comment.replies.retain(|r| r.id != reply_id);
        Ok(())
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Event row joined with its organizer's public summary.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct EventWithOrganizer {
    #[sqlx(flatten)]
    pub event: Event,
    pub organizer_name: String,
    pub organizer_pfp: String,
}

/// Slim projection used in profile event lists.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub title: String,
    pub begins_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_virtual: bool,
    pub tags: Vec<String>,
    pub picture: String,
}

const WITH_ORGANIZER: &str = "SELECT e.*, u.name AS organizer_name, u.pfp AS organizer_pfp
     FROM events e
     JOIN users u ON u.id = e.organizer_id";

impl Event {
    /// Find event by its globally unique title
    pub async fn find_by_title(title: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE title = $1")
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Insert new event
    pub async fn insert(&self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO events (
                id,
                title,
                description,
                begins_at,
                ends_at,
                is_virtual,
                address,
                tags,
                organizer_id,
                attendee_ids,
                requested_attendee_ids,
                comments,
                picture
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.begins_at)
        .bind(self.ends_at)
        .bind(self.is_virtual)
        .bind(&self.address)
        .bind(&self.tags)
        .bind(self.organizer_id)
        .bind(&self.attendee_ids)
        .bind(&self.requested_attendee_ids)
        .bind(sqlx::types::Json(&self.comments))
        .bind(&self.picture)
        .fetch_one(pool)
        .await
    }

    /// Persist the whole aggregate back (read-modify-write).
    pub async fn save(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE events SET
                description = $2,
                begins_at = $3,
                ends_at = $4,
                is_virtual = $5,
                address = $6,
                tags = $7,
                attendee_ids = $8,
                requested_attendee_ids = $9,
                comments = $10,
                picture = $11
             WHERE id = $1",
        )
        .bind(self.id)
        .bind(&self.description)
        .bind(self.begins_at)
        .bind(self.ends_at)
        .bind(self.is_virtual)
        .bind(&self.address)
        .bind(&self.tags)
        .bind(&self.attendee_ids)
        .bind(&self.requested_attendee_ids)
        .bind(sqlx::types::Json(&self.comments))
        .bind(&self.picture)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete by id
    pub async fn delete(id: EventId, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(pool)
            .await
    }
}

impl EventWithOrganizer {
    /// All events with their organizers, soonest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("{} ORDER BY e.begins_at ASC", WITH_ORGANIZER))
            .fetch_all(pool)
            .await
    }

    /// One page of events, soonest first.
    pub async fn list_page(params: PageParams, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "{} ORDER BY e.begins_at ASC LIMIT $1 OFFSET $2",
            WITH_ORGANIZER
        ))
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_title(
        title: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!("{} WHERE e.title = $1", WITH_ORGANIZER))
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search over title, tags, and organizer
    /// name. Returns the requested page and the raw total match count.
    pub async fn search(
        term: &str,
        params: PageParams,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));

        let predicate = "e.title ILIKE $1
               OR u.name ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(e.tags) AS tag WHERE tag ILIKE $1)";

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM events e JOIN users u ON u.id = e.organizer_id
             WHERE {}",
            predicate
        ))
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query_as::<_, Self>(&format!(
            "{} WHERE {} ORDER BY e.begins_at ASC LIMIT $2 OFFSET $3",
            WITH_ORGANIZER, predicate
        ))
        .bind(&pattern)
        .bind(params.limit)
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }
}

impl EventSummary {
    const COLUMNS: &'static str =
        "title, begins_at, ends_at, is_virtual, tags, picture";

    /// Events the user organizes.
    pub async fn created_by(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {} FROM events WHERE organizer_id = $1 ORDER BY begins_at ASC",
            Self::COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Events the user is confirmed for (GIN-indexed array containment).
    pub async fn attended_by(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {} FROM events WHERE attendee_ids @> ARRAY[$1] ORDER BY begins_at ASC",
            Self::COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Events the user has a pending request for.
    pub async fn requested_by(
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(&format!(
            "SELECT {} FROM events WHERE requested_attendee_ids @> ARRAY[$1]
             ORDER BY begins_at ASC",
            Self::COLUMNS
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_event(organizer: UserId) -> Event {
        let now = chrono::Utc::now();
        Event {
            id: EventId::new(),
            title: "Meetup A".to_string(),
            description: "A meetup".to_string(),
            begins_at: now + Duration::hours(1),
            ends_at: now + Duration::hours(2),
            is_virtual: false,
            address: "1 Main St".to_string(),
            tags: vec!["social".to_string()],
            organizer_id: organizer,
            attendee_ids: Vec::new(),
            requested_attendee_ids: Vec::new(),
            comments: Vec::new(),
            picture: DEFAULT_EVENT_PICTURE.to_string(),
            created_at: now,
        }
    }

    #[test]
    fn test_validate_times() {
        let now = chrono::Utc::now();
        assert!(Event::validate_times(now, now + Duration::hours(1)).is_ok());
        assert!(Event::validate_times(now, now).is_err());
        assert!(Event::validate_times(now + Duration::hours(1), now).is_err());
    }

    #[test]
    fn test_register_moves_none_to_pending() {
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);

        event.register(user).unwrap();
        assert_eq!(event.requested_attendee_ids, vec![user]);
        assert!(event.attendee_ids.is_empty());
    }

    #[test]
    fn test_register_is_idempotent_while_pending() {
        let mut event = test_event(UserId::new());
        let user = UserId::new();

        event.register(user).unwrap();
        event.register(user).unwrap();
        assert_eq!(event.requested_attendee_ids.len(), 1);
    }

    #[test]
    fn test_register_conflicts_when_confirmed() {
        let mut event = test_event(UserId::new());
        let user = UserId::new();
        event.attendee_ids.push(user);

        let err = event.register(user).unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_approve_moves_pending_to_confirmed_and_keeps_disjointness() {
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);

        event.register(user).unwrap();
        event.approve_attendee(organizer, user).unwrap();

        assert_eq!(event.attendee_ids, vec![user]);
        assert!(event.requested_attendee_ids.is_empty());
    }

    #[test]
    fn test_approve_requires_organizer() {
        let mut event = test_event(UserId::new());
        let user = UserId::new();
        event.register(user).unwrap();

        let err = event.approve_attendee(UserId::new(), user).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_approve_without_request_fails() {
        let organizer = UserId::new();
        let mut event = test_event(organizer);

        let err = event.approve_attendee(organizer, UserId::new()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_no_direct_none_to_confirmed_transition() {
        // The only path into the confirmed list is approve, which demands a
        // pending request first.
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);

        assert!(event.approve_attendee(organizer, user).is_err());
        event.register(user).unwrap();
        assert!(event.approve_attendee(organizer, user).is_ok());
    }

    #[test]
    fn test_unregister_confirmed() {
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);
        event.register(user).unwrap();
        event.approve_attendee(organizer, user).unwrap();

        let outcome = event.unregister(user).unwrap();
        assert_eq!(outcome, UnregisterOutcome::Unregistered);
        assert!(event.attendee_ids.is_empty());
    }

    #[test]
    fn test_unregister_cancels_pending_request() {
        let mut event = test_event(UserId::new());
        let user = UserId::new();
        event.register(user).unwrap();

        let outcome = event.unregister(user).unwrap();
        assert_eq!(outcome, UnregisterOutcome::RequestCancelled);
        assert!(event.requested_attendee_ids.is_empty());
    }

    #[test]
    fn test_unregister_when_not_registered_fails() {
        let mut event = test_event(UserId::new());
        let err = event.unregister(UserId::new()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_remove_attendee_and_reject_request() {
        let organizer = UserId::new();
        let confirmed = UserId::new();
        let pending = UserId::new();
        let mut event = test_event(organizer);

        event.register(confirmed).unwrap();
        event.approve_attendee(organizer, confirmed).unwrap();
        event.register(pending).unwrap();

        assert_eq!(
            event.remove_attendee(organizer, confirmed).unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(
            event.remove_attendee(organizer, pending).unwrap(),
            RemoveOutcome::Rejected
        );
        assert!(event.attendee_ids.is_empty());
        assert!(event.requested_attendee_ids.is_empty());

        let err = event.remove_attendee(organizer, confirmed).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_remove_attendee_requires_organizer() {
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);
        event.register(user).unwrap();

        let err = event.remove_attendee(user, user).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_full_attendance_scenario() {
        // Register -> approve -> unregister, checking the lists at each step.
        let organizer = UserId::new();
        let attendee = UserId::new();
        let mut event = test_event(organizer);

        event.register(attendee).unwrap();
        assert_eq!(event.requested_attendee_ids, vec![attendee]);

        event.approve_attendee(organizer, attendee).unwrap();
        assert_eq!(event.attendee_ids, vec![attendee]);
        assert!(event.requested_attendee_ids.is_empty());

        event.unregister(attendee).unwrap();
        assert!(event.attendee_ids.is_empty());
    }

    #[test]
    fn test_comment_requires_participant() {
        let organizer = UserId::new();
        let outsider = UserId::new();
        let mut event = test_event(organizer);

        let err = event
            .add_comment(outsider, "hello".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        assert!(event.add_comment(organizer, "welcome".to_string()).is_ok());
    }

    #[test]
    fn test_confirmed_attendee_may_comment_pending_may_not() {
        let organizer = UserId::new();
        let user = UserId::new();
        let mut event = test_event(organizer);

        event.register(user).unwrap();
        assert!(event.add_comment(user, "hi".to_string()).is_err());

        event.approve_attendee(organizer, user).unwrap();
        assert!(event.add_comment(user, "hi".to_string()).is_ok());
    }

    #[test]
    fn test_reply_to_missing_comment_is_not_found() {
        let organizer = UserId::new();
        let mut event = test_event(organizer);

        let err = event
            .add_reply(organizer, CommentId::new(), "re".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_edit_comment_author_only() {
        let organizer = UserId::new();
        let attendee = UserId::new();
        let mut event = test_event(organizer);
        event.register(attendee).unwrap();
        event.approve_attendee(organizer, attendee).unwrap();

        let comment_id = event.add_comment(attendee, "original".to_string()).unwrap();

        // Even the organizer may not edit someone else's comment.
        let err = event
            .edit_comment(organizer, comment_id, "hijacked".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        event
            .edit_comment(attendee, comment_id, "edited".to_string())
            .unwrap();
        assert_eq!(event.comments[0].text, "edited");
    }

    #[test]
    fn test_delete_comment_author_or_organizer() {
        let organizer = UserId::new();
        let attendee = UserId::new();
        let stranger = UserId::new();
        let mut event = test_event(organizer);
        event.register(attendee).unwrap();
        event.approve_attendee(organizer, attendee).unwrap();

        let comment_id = event.add_comment(attendee, "mine".to_string()).unwrap();
        let err = event.delete_comment(stranger, comment_id).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        // Organizer can moderate.
        event.delete_comment(organizer, comment_id).unwrap();
        assert!(event.comments.is_empty());

        let comment_id = event.add_comment(attendee, "again".to_string()).unwrap();
        event.delete_comment(attendee, comment_id).unwrap();
        assert!(event.comments.is_empty());
    }

    #[test]
    fn test_delete_reply_author_or_organizer() {
        let organizer = UserId::new();
        let attendee = UserId::new();
        let mut event = test_event(organizer);
        event.register(attendee).unwrap();
        event.approve_attendee(organizer, attendee).unwrap();

        let comment_id = event.add_comment(organizer, "top".to_string()).unwrap();
        let reply_id = event
            .add_reply(attendee, comment_id, "re".to_string())
            .unwrap();

        // Author deletes own reply.
        event.delete_reply(attendee, comment_id, reply_id).unwrap();
        assert!(event.comments[0].replies.is_empty());

        // Organizer may delete any reply.
        let reply_id = event
            .add_reply(attendee, comment_id, "re again".to_string())
            .unwrap();
        event.delete_reply(organizer, comment_id, reply_id).unwrap();
        assert!(event.comments[0].replies.is_empty());
    }

    #[test]
    fn test_edit_reply_author_only() {
        let organizer = UserId::new();
        let mut event = test_event(organizer);

        let comment_id = event.add_comment(organizer, "top".to_string()).unwrap();
        let reply_id = event
            .add_reply(organizer, comment_id, "re".to_string())
            .unwrap();

        let err = event
            .edit_reply(UserId::new(), comment_id, reply_id, "nope".to_string())
            .unwrap_err();
        // Unknown users fail on authorship, never on lookup.
        assert!(matches!(err, ApiError::Forbidden(_)));

        event
            .edit_reply(organizer, comment_id, reply_id, "fixed".to_string())
            .unwrap();
        assert_eq!(event.comments[0].replies[0].text, "fixed");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
