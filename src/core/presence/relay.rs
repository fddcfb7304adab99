use super::events::RelayEvent;
use super::registry::{ConnectionHandle, ConnectionId, SessionRegistry, UserId};
use super::store::LastSeenStore;
use crate::core::clock::Clock;
use crate::errors::AppResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Client side of a registered connection: the socket task drains `rx`.
#[derive(Debug)]
pub struct ClientConnection {
    pub id: ConnectionId,
    pub user: UserId,
    pub rx: UnboundedReceiver<RelayEvent>,
}

pub struct PresenceRelay {
    registry: Arc<dyn SessionRegistry>,
    last_seen: Arc<dyn LastSeenStore>,
    clock: Arc<dyn Clock>,
    next_id: AtomicU64,
}

impl PresenceRelay {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        last_seen: Arc<dyn LastSeenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            last_seen,
            clock,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn online_users(&self) -> Vec<UserId> {
        self.registry.online_users()
    }

    pub fn is_online(&self, user: UserId) -> bool {
        self.registry.lookup(user).is_some()
    }

    fn broadcast_online(&self) -> usize {
        let event = RelayEvent::OnlineUsers {
            users: self.registry.online_users(),
        };
        self.registry.broadcast(&event)
    }

    /// Register `user` and tell every connection (the new one included)
    /// the updated online set. A previous connection of the same user is
    /// replaced.
    pub fn connect(&self, user: UserId) -> ClientConnection {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = unbounded_channel();

        self.registry.register(user, ConnectionHandle::new(id, tx));
        self.broadcast_online();

        ClientConnection { id, user, rx }
    }

    /// Drop the connection, stamp last-seen and rebroadcast the online set.
    ///
    /// A connection that was already replaced by a newer one is ignored
    /// and `Ok(false)` is returned. The online set is rebroadcast even when
    /// the last-seen stamp fails; the store error is returned afterwards.
    pub fn disconnect(&self, user: UserId, connection: ConnectionId) -> AppResult<bool> {
        if !self.registry.unregister(user, connection) {
            return Ok(false);
        }

        let stamped = self.last_seen.stamp_last_seen(user, self.clock.now());
        self.broadcast_online();
        stamped?;
        Ok(true)
    }

    /// Forward to the recipient's connection if online. Nothing is queued.
    fn forward(&self, to: UserId, event: RelayEvent) -> bool {
        match self.registry.lookup(to) {
            Some(handle) => handle.send(event),
            None => false,
        }
    }

    pub fn typing(&self, from: UserId, to: UserId, is_typing: bool) -> bool {
        self.forward(
            to,
            RelayEvent::Typing {
                from,
                to,
                is_typing,
            },
        )
    }

    pub fn notify(&self, from: UserId, to: UserId, payload: serde_json::Value) -> bool {
        self.forward(to, RelayEvent::Notify { from, to, payload })
    }
}
