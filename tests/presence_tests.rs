mod common;
use chrono::{DateTime, Duration, Utc};
use common::{at, setup_test_db};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use teamclock::core::clock::FixedClock;
use teamclock::core::entities::EntityLogic;
use teamclock::core::presence::{
    ClientConnection, ConnectionHandle, InMemoryRegistry, LastSeenStore, PresenceRelay, RelayEvent,
    SessionRegistry, SqliteLastSeen,
};
use teamclock::db::pool::DbPool;
use teamclock::db::queries::load_user;
use teamclock::errors::{AppError, AppResult};

#[derive(Default)]
struct MemoryLastSeen {
    stamps: Mutex<HashMap<i64, DateTime<Utc>>>,
}

impl LastSeenStore for MemoryLastSeen {
    fn stamp_last_seen(&self, user: i64, at: DateTime<Utc>) -> AppResult<()> {
        self.stamps.lock().unwrap().insert(user, at);
        Ok(())
    }
}

fn relay() -> (PresenceRelay, Arc<MemoryLastSeen>, Arc<FixedClock>) {
    let store = Arc::new(MemoryLastSeen::default());
    let clock = Arc::new(FixedClock::new(at(0)));
    let relay = PresenceRelay::new(
        Arc::new(InMemoryRegistry::new()),
        store.clone(),
        clock.clone(),
    );
    (relay, store, clock)
}

fn drain(conn: &mut ClientConnection) -> Vec<RelayEvent> {
    let mut out = Vec::new();
    while let Ok(ev) = conn.rx.try_recv() {
        out.push(ev);
    }
    out
}

#[test]
fn test_connect_broadcasts_online_set() {
    let (relay, _, _) = relay();

    let mut a = relay.connect(1);
    assert_eq!(
        drain(&mut a),
        vec![RelayEvent::OnlineUsers { users: vec![1] }]
    );

    let mut b = relay.connect(2);
    assert_eq!(
        drain(&mut a),
        vec![RelayEvent::OnlineUsers { users: vec![1, 2] }]
    );
    assert_eq!(
        drain(&mut b),
        vec![RelayEvent::OnlineUsers { users: vec![1, 2] }]
    );
    assert!(relay.is_online(1));
}

#[test]
fn test_disconnect_removes_user_and_stamps_last_seen() {
    let (relay, store, clock) = relay();

    let mut a = relay.connect(1);
    let b = relay.connect(2);
    drain(&mut a);

    clock.advance(Duration::seconds(300));
    assert!(relay.disconnect(2, b.id).unwrap());

    assert_eq!(relay.online_users(), vec![1]);
    assert_eq!(
        drain(&mut a),
        vec![RelayEvent::OnlineUsers { users: vec![1] }]
    );

    let stamped = store.stamps.lock().unwrap()[&2];
    assert!(stamped >= at(0));
    assert_eq!(stamped, at(300));
}

struct BrokenLastSeen;

impl LastSeenStore for BrokenLastSeen {
    fn stamp_last_seen(&self, _user: i64, _at: DateTime<Utc>) -> AppResult<()> {
        Err(AppError::Other("last-seen store unavailable".into()))
    }
}

#[test]
fn test_disconnect_rebroadcasts_even_if_last_seen_fails() {
    let relay = PresenceRelay::new(
        Arc::new(InMemoryRegistry::new()),
        Arc::new(BrokenLastSeen),
        Arc::new(FixedClock::new(at(0))),
    );

    let mut a = relay.connect(1);
    let b = relay.connect(2);
    drain(&mut a);

    let err = relay.disconnect(2, b.id).unwrap_err();
    assert!(matches!(err, AppError::Other(_)));

    assert!(!relay.is_online(2));
    assert_eq!(
        drain(&mut a),
        vec![RelayEvent::OnlineUsers { users: vec![1] }]
    );
}

#[test]
fn test_stale_disconnect_keeps_newer_connection() {
    let (relay, store, _) = relay();

    let old = relay.connect(7);
    let newer = relay.connect(7);

    assert!(!relay.disconnect(7, old.id).unwrap());
    assert!(relay.is_online(7));
    assert!(store.stamps.lock().unwrap().is_empty());

    assert!(relay.disconnect(7, newer.id).unwrap());
    assert!(!relay.is_online(7));
}

#[test]
fn test_typing_reaches_only_recipient() {
    let (relay, _, _) = relay();

    let mut a = relay.connect(1);
    let mut b = relay.connect(2);
    let mut c = relay.connect(3);
    drain(&mut a);
    drain(&mut b);
    drain(&mut c);

    assert!(relay.typing(1, 2, true));
    assert_eq!(
        drain(&mut b),
        vec![RelayEvent::Typing {
            from: 1,
            to: 2,
            is_typing: true
        }]
    );
    assert!(drain(&mut a).is_empty());
    assert!(drain(&mut c).is_empty());
}

#[test]
fn test_events_to_offline_users_are_dropped() {
    let (relay, _, _) = relay();
    let _a = relay.connect(1);

    assert!(!relay.typing(1, 99, true));
    assert!(!relay.notify(1, 99, json!({"text": "hi"})));

    // nothing is queued for later
    let mut late = relay.connect(99);
    assert_eq!(
        drain(&mut late),
        vec![RelayEvent::OnlineUsers { users: vec![1, 99] }]
    );
}

#[test]
fn test_notify_payload_serialises_with_type_tag() {
    let ev = RelayEvent::Notify {
        from: 1,
        to: 2,
        payload: json!({"ticket": 12}),
    };
    let text = ev.to_json().unwrap();
    assert!(text.contains(r#""type":"notify""#));
    assert!(text.contains(r#""ticket":12"#));
}

#[test]
fn test_closed_receiver_does_not_break_broadcast() {
    let registry = InMemoryRegistry::new();
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    registry.register(5, ConnectionHandle::new(1, tx));
    drop(rx);

    let delivered = registry.broadcast(&RelayEvent::OnlineUsers { users: vec![5] });
    assert_eq!(delivered, 0);
}

#[test]
fn test_sqlite_last_seen_updates_user_row() {
    let db_path = setup_test_db("presence_last_seen");
    let mut pool = DbPool::open_initialized(&db_path).unwrap();
    let user = EntityLogic::add_user(&mut pool, "acme", "dana").unwrap();
    assert!(user.last_seen.is_none());

    let store = Arc::new(SqliteLastSeen::open(&db_path).unwrap());
    let clock = Arc::new(FixedClock::new(at(0)));
    let relay = PresenceRelay::new(Arc::new(InMemoryRegistry::new()), store, clock.clone());

    let conn = relay.connect(user.id);
    clock.set(at(100));
    assert!(relay.disconnect(user.id, conn.id).unwrap());

    let reloaded = load_user(&pool.conn, user.id).unwrap().unwrap();
    assert_eq!(reloaded.last_seen, Some(at(100)));
}
