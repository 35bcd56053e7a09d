//! Workflow tests for the event aggregate: the attendance state machine and
//! comment authorization, exercised through the public API.

use chrono::Duration;
use server_core::common::{ApiError, UserId};
use server_core::domains::events::models::{
    Event, RemoveOutcome, UnregisterOutcome, DEFAULT_EVENT_PICTURE,
};

fn event_organized_by(organizer: UserId) -> Event {
    let now = chrono::Utc::now();
    Event {
        id: server_core::common::EventId::new(),
        title: "Meetup A".to_string(),
        description: "A meetup".to_string(),
        begins_at: now + Duration::hours(1),
        ends_at: now + Duration::hours(3),
        is_virtual: false,
        address: "1 Main St".to_string(),
        tags: vec!["board-games".to_string(), "social".to_string()],
        organizer_id: organizer,
        attendee_ids: Vec::new(),
        requested_attendee_ids: Vec::new(),
        comments: Vec::new(),
        picture: DEFAULT_EVENT_PICTURE.to_string(),
        created_at: now,
    }
}

/// The lists stay disjoint through every reachable transition sequence.
fn assert_disjoint(event: &Event) {
    for id in &event.attendee_ids {
        assert!(
            !event.requested_attendee_ids.contains(id),
            "user {} is both confirmed and pending",
            id
        );
    }
}

#[test]
fn register_approve_unregister_scenario() {
    let u1 = UserId::new();
    let u2 = UserId::new();
    let mut event = event_organized_by(u1);

    // U2 registers -> pending list = [U2]
    event.register(u2).unwrap();
    assert_eq!(event.requested_attendee_ids, vec![u2]);
    assert_disjoint(&event);

    // U1 approves U2 -> confirmed = [U2], pending = []
    event.approve_attendee(u1, u2).unwrap();
    assert_eq!(event.attendee_ids, vec![u2]);
    assert!(event.requested_attendee_ids.is_empty());
    assert_disjoint(&event);

    // U2 unregisters -> confirmed = []
    assert_eq!(event.unregister(u2).unwrap(), UnregisterOutcome::Unregistered);
    assert!(event.attendee_ids.is_empty());
    assert_disjoint(&event);
}

#[test]
fn register_twice_while_confirmed_is_rejected() {
    let organizer = UserId::new();
    let user = UserId::new();
    let mut event = event_organized_by(organizer);

    event.register(user).unwrap();
    event.approve_attendee(organizer, user).unwrap();

    assert!(matches!(
        event.register(user).unwrap_err(),
        ApiError::Conflict(_)
    ));
}

#[test]
fn register_twice_while_pending_is_idempotent() {
    let mut event = event_organized_by(UserId::new());
    let user = UserId::new();

    event.register(user).unwrap();
    event.register(user).unwrap();
    event.register(user).unwrap();

    assert_eq!(event.requested_attendee_ids, vec![user]);
}

#[test]
fn disjointness_holds_across_a_busy_sequence() {
    let organizer = UserId::new();
    let users: Vec<UserId> = (0..5).map(|_| UserId::new()).collect();
    let mut event = event_organized_by(organizer);

    for user in &users {
        event.register(*user).unwrap();
        assert_disjoint(&event);
    }
    event.approve_attendee(organizer, users[0]).unwrap();
    event.approve_attendee(organizer, users[1]).unwrap();
    assert_disjoint(&event);

    // Reject one pending, remove one confirmed.
    assert_eq!(
        event.remove_attendee(organizer, users[2]).unwrap(),
        RemoveOutcome::Rejected
    );
    assert_eq!(
        event.remove_attendee(organizer, users[0]).unwrap(),
        RemoveOutcome::Removed
    );
    assert_disjoint(&event);

    // Cancel a still-pending request.
    assert_eq!(
        event.unregister(users[3]).unwrap(),
        UnregisterOutcome::RequestCancelled
    );
    assert_disjoint(&event);

    assert_eq!(event.attendee_ids, vec![users[1]]);
    assert_eq!(event.requested_attendee_ids, vec![users[4]]);
}

#[test]
fn only_the_organizer_administers_attendance() {
    let organizer = UserId::new();
    let requester = UserId::new();
    let stranger = UserId::new();
    let mut event = event_organized_by(organizer);

    event.register(requester).unwrap();

    assert!(matches!(
        event.approve_attendee(stranger, requester).unwrap_err(),
        ApiError::Forbidden(_)
    ));
    assert!(matches!(
        event.remove_attendee(requester, requester).unwrap_err(),
        ApiError::Forbidden(_)
    ));

    // Nothing moved.
    assert_eq!(event.requested_attendee_ids, vec![requester]);
    assert!(event.attendee_ids.is_empty());
}

#[test]
fn commenting_is_participant_only_and_moderated_by_the_organizer() {
    let organizer = UserId::new();
    let attendee = UserId::new();
    let outsider = UserId::new();
    let mut event = event_organized_by(organizer);

    event.register(attendee).unwrap();
    event.approve_attendee(organizer, attendee).unwrap();

    // Outsiders cannot comment.
    assert!(matches!(
        event.add_comment(outsider, "hi".into()).unwrap_err(),
        ApiError::Forbidden(_)
    ));

    let comment_id = event.add_comment(attendee, "see you there".into()).unwrap();
    let reply_id = event
        .add_reply(organizer, comment_id, "looking forward".into())
        .unwrap();

    // Only the author edits; author or organizer deletes.
    assert!(matches!(
        event
            .edit_reply(attendee, comment_id, reply_id, "hijack".into())
            .unwrap_err(),
        ApiError::Forbidden(_)
    ));
    event
        .delete_reply(organizer, comment_id, reply_id)
        .unwrap();
    event.delete_comment(organizer, comment_id).unwrap();
    assert!(event.comments.is_empty());
}

#[test]
fn update_times_are_validated() {
    let now = chrono::Utc::now();
    assert!(Event::validate_times(now, now + Duration::minutes(1)).is_ok());
    assert!(matches!(
        Event::validate_times(now + Duration::minutes(1), now).unwrap_err(),
        ApiError::Validation(_)
    ));
}
