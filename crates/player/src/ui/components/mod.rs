//! Screen components

mod api_screen;
mod chat_parts;
mod chat_screen;
mod connection_banner;
mod menu_screen;
mod situation_screen;

pub use api_screen::{ApiScreen, ConfirmDialog};
pub use chat_parts::{MessageBubble, OptionList, StoryProgressBar};
pub use chat_screen::ChatScreen;
pub use connection_banner::ConnectionBanner;
pub use menu_screen::MenuScreen;
pub use situation_screen::SituationScreen;
