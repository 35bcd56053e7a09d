// Event workflow actions. One file per concern.

pub mod attendance;
pub mod comments;
pub mod crud;
pub mod queries;
pub mod search;

pub use attendance::{approve_attendee, register, remove_attendee, unregister};
pub use comments::{
    add_comment, add_reply, delete_comment, delete_reply, edit_comment, edit_reply,
    get_comments,
};
pub use crud::{create_event, delete_event, update_event, CreateEventInput, UpdateEventInput};
pub use queries::{
    address_and_attendees, get_event_by_title, list_events, list_events_page, user_status,
    AddressAndAttendees, EventPage, EventView, UserStatus,
};
pub use search::{search_events, SearchResults};
