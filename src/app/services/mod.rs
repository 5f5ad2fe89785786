pub mod action;
pub mod crossterm_stream;
pub mod events;

pub use action::ActionService;
pub use crossterm_stream::CrosstermStream;
pub use events::EventService;
