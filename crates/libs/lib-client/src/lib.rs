//! # Chat Client Library
//!
//! Headless client for the First-Aid Assistant gateway.
//!
//! - [`ChatSession`]: the chat on screen. Optimistic sends, one AI turn at a time,
//!   simulated streaming of answers and the emergency affordance.
//! - [`ConversationList`]: the sidebar. List, rename and confirmed delete.
//! - [`ApiClient`]: the HTTP implementation of [`ChatBackend`].
//!
//! Both controllers take the backend and the caller's [`Identity`] at
//! construction and share a [`RefreshToken`] that marks the list stale.
//!
//! ```rust,no_run
//! use lib_client::{ApiClient, ChatSession, ClientConfig, ConversationList, RefreshToken, SessionConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> lib_client::Result<()> {
//! let api = Arc::new(ApiClient::new(&ClientConfig::default())?);
//! let auth = api.login("alice".into(), "correct horse".into()).await?;
//! let identity = lib_client::Identity::from(&auth);
//!
//! let refresh = RefreshToken::new();
//! let (session, events) = ChatSession::new(api.clone(), Some(identity.clone()), SessionConfig::default(), refresh.clone());
//! let sidebar = ConversationList::new(api, Some(identity), refresh).with_observer(Arc::new(session.clone()));
//!
//! session.send("I burned my hand").await?;
//! session.wait_reveal().await;
//! sidebar.refresh_if_stale().await?;
//! # drop(events);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod refresh;
pub mod session;
pub mod sidebar;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use backend::{ChatBackend, Identity};
pub use config::{ClientConfig, LoadFailurePolicy, SessionConfig};
pub use error::{ClientError, Result};
pub use refresh::RefreshToken;
pub use session::{ChatSession, MessageBody, SessionEvent, SessionState, TurnPhase, TurnReport, UiMessage};
pub use sidebar::{ConversationList, ConversationObserver};
