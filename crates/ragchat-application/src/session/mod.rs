//! Chat screen session: thread, composer, overlays and reply plumbing.

mod chat_session;
mod dispatcher;
mod event;
mod reply;
mod view;

pub use chat_session::ChatSession;
pub use dispatcher::ReplyDispatcher;
pub use event::SessionEvent;
pub use reply::{ReplyCompletion, ReplySequencer, ReplyTicket};
pub use view::SessionView;
