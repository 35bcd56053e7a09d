pub mod comment;
pub mod event;

pub use comment::{author_ids, populate, Comment, CommentView, Reply, ReplyView};
pub use event::{
    Event, EventSummary, EventWithOrganizer, RemoveOutcome, UnregisterOutcome,
    DEFAULT_EVENT_PICTURE,
};
