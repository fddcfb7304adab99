//! Chat presence and typing relay.
//!
//! The relay keeps no state of its own: online users live in a
//! `SessionRegistry`, last-seen stamps go through a `LastSeenStore`.
//! Both are injected so the in-process map can be swapped for a shared
//! store without touching callers.

pub mod events;
pub mod registry;
pub mod relay;
pub mod store;

pub use events::RelayEvent;
pub use registry::{ConnectionHandle, ConnectionId, InMemoryRegistry, SessionRegistry, UserId};
pub use relay::{ClientConnection, PresenceRelay};
pub use store::{LastSeenStore, SqliteLastSeen};
