//! Typed ID definitions for all domain entities.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities.
pub struct User;

/// Marker type for Event entities.
pub struct Event;

/// Marker type for comments nested inside an event.
pub struct Comment;

/// Marker type for replies nested inside a comment.
pub struct Reply;

/// Marker type for audit log entries.
pub struct AuditLog;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Event entities.
pub type EventId = Id<Event>;

/// Typed ID for comments. V4: these only exist inside the event's JSON
/// document, so index locality does not matter.
pub type CommentId = Id<Comment, V4>;

/// Typed ID for replies.
pub type ReplyId = Id<Reply, V4>;

/// Typed ID for audit log entries.
pub type AuditLogId = Id<AuditLog>;
