//! Conversation Sessions
//!
//! Bounded per-session message logs and the process-wide store that owns
//! them. Sessions live for the process lifetime only.
//!
//! # Example
//!
//! ```
//! use parley_session::SessionStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SessionStore::new(10);
//!
//!     let (id, session) = store.get_or_create(None, Some("You are helpful."));
//!     {
//!         let mut session = session.lock().await;
//!         session.push_user("Hello");
//!     }
//!
//!     assert!(store.get(&id).is_some());
//! }
//! ```

pub mod session;
pub mod store;

// Re-exports
pub use session::{ConversationSession, Message, SessionHistory};
pub use store::{SessionStore, SharedSession};
