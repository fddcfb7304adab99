use super::events::RelayEvent;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc::UnboundedSender;

pub type UserId = i64;
pub type ConnectionId = u64;

/// Outbound side of one client connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    tx: UnboundedSender<RelayEvent>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, tx: UnboundedSender<RelayEvent>) -> Self {
        Self { id, tx }
    }

    /// Fire-and-forget. Returns false if the receiving side is gone.
    pub fn send(&self, event: RelayEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Online-user bookkeeping used by the relay.
pub trait SessionRegistry: Send + Sync {
    /// Bind `user` to `handle`, replacing any previous connection.
    fn register(&self, user: UserId, handle: ConnectionHandle);

    /// Remove `user` if still bound to `connection`. Returns whether it was removed.
    fn unregister(&self, user: UserId, connection: ConnectionId) -> bool;

    fn lookup(&self, user: UserId) -> Option<ConnectionHandle>;

    /// Online user ids, ascending.
    fn online_users(&self) -> Vec<UserId>;

    /// Push `event` to every registered connection. Returns how many accepted it.
    fn broadcast(&self, event: &RelayEvent) -> usize;
}

/// Process-local registry; empty after restart.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    sessions: Mutex<HashMap<UserId, ConnectionHandle>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<UserId, ConnectionHandle>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SessionRegistry for InMemoryRegistry {
    fn register(&self, user: UserId, handle: ConnectionHandle) {
        self.sessions().insert(user, handle);
    }

    fn unregister(&self, user: UserId, connection: ConnectionId) -> bool {
        let mut sessions = self.sessions();
        match sessions.get(&user) {
            Some(h) if h.id == connection => {
                sessions.remove(&user);
                true
            }
            _ => false,
        }
    }

    fn lookup(&self, user: UserId) -> Option<ConnectionHandle> {
        self.sessions().get(&user).cloned()
    }

    fn online_users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.sessions().keys().copied().collect();
        users.sort_unstable();
        users
    }

    fn broadcast(&self, event: &RelayEvent) -> usize {
        let handles: Vec<ConnectionHandle> = self.sessions().values().cloned().collect();
        handles.iter().filter(|h| h.send(event.clone())).count()
    }
}
