//! LiteraPlay Shared - wire contract between the Player view and the backend
//!
//! This crate contains every type that crosses the bridge:
//! - Outbound calls (`BackendCall`) sent by the view
//! - Inbound events (`BackendEvent`) pushed by the backend
//! - JSON payload DTOs carried inside events (library, messages, options, progress)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and thiserror
//! 2. **No presentation logic** - Pure data types, decoding and small text helpers
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets

pub mod calls;
pub mod chat;
pub mod error;
pub mod events;
pub mod library;
pub mod progress;

pub use calls::BackendCall;
pub use chat::{decode_chat_options, ChatMessage, ChatOption, CANONICAL_MARKER};
pub use error::PayloadError;
pub use events::{BackendEvent, EVENT_NAMES};
pub use library::{Library, LibraryEntry, Situation};
pub use progress::StoryProgress;
