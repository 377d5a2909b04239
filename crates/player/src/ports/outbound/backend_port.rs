//! BackendPort - the operations the view can invoke on the backend
//!
//! All calls are fire-and-forget. `Ok(())` only means the call was queued on
//! the bridge; the outcome arrives later as a `BackendEvent`.

use anyhow::Result;

#[cfg_attr(test, mockall::automock)]
pub trait BackendPort: Send + Sync {
    /// Ask for startup state (the backend answers with `library-loaded` when a key is configured)
    fn request_initial_state(&self) -> Result<()>;

    /// Validate an API key
    fn verify_api_key(&self, key: &str) -> Result<()>;

    /// Tell the backend whether to persist a validated key
    fn save_api_key_decision(&self, key: &str, accepted: bool) -> Result<()>;

    /// Start a chat for a work, and a situation within it when the work has any
    fn start_chat_session(&self, work_key: &str, situation_key: Option<String>) -> Result<()>;

    /// Send the user's turn verbatim
    fn send_user_message(&self, text: &str) -> Result<()>;
}
