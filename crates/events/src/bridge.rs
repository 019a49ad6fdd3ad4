//! Connection-oriented publish/subscribe bridge for one client session.

use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use thiserror::Error;

use societyhub_core::UserProfile;

use crate::event::DomainEvent;
use crate::hub::{ConnectionInner, InMemoryHub};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("bridge is not connected")]
    NotConnected,
}

/// A per-topic subscription held by one consumer.
///
/// Events arrive in publish order. When the owning bridge disconnects, the
/// subscription stops receiving; there is no replay on reconnect.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<DomainEvent>,
}

impl Subscription {
    fn new(receiver: mpsc::Receiver<DomainEvent>) -> Self {
        Self { receiver }
    }

    /// Block until the next event is available.
    pub fn recv(&self) -> Result<DomainEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Receive without blocking.
    pub fn try_recv(&self) -> Result<DomainEvent, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DomainEvent, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// One session's end of the notification channel.
///
/// Exists only for authenticated sessions: `connect` takes the profile, so
/// there is no way to open a channel for an anonymous user. The session
/// manager disconnects the bridge whenever the session becomes
/// unauthenticated, so a connection never outlives the identity it is
/// scoped to.
#[derive(Debug)]
pub struct NotificationBridge {
    hub: Arc<InMemoryHub>,
    connection: Mutex<Option<Arc<ConnectionInner>>>,
}

impl NotificationBridge {
    pub fn new(hub: Arc<InMemoryHub>) -> Self {
        Self {
            hub,
            connection: Mutex::new(None),
        }
    }

    /// Open a connection scoped to `profile`'s identity.
    ///
    /// Reconnecting replaces the previous connection; subscriptions made on
    /// the old connection stop receiving (no replay of missed events).
    pub fn connect(&self, profile: &UserProfile) {
        let conn = Arc::new(ConnectionInner::new(profile.id));
        self.hub.attach(Arc::downgrade(&conn));

        if let Ok(mut current) = self.connection.lock() {
            *current = Some(conn);
        }
        tracing::debug!(user_id = %profile.id, "notification bridge connected");
    }

    /// Tear the connection down. No-op when already disconnected.
    pub fn disconnect(&self) {
        let dropped = match self.connection.lock() {
            Ok(mut current) => current.take(),
            Err(_) => None,
        };
        if let Some(conn) = dropped {
            tracing::debug!(user_id = %conn.user_id(), "notification bridge disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    /// Best-effort publish.
    ///
    /// While disconnected the event is dropped silently: the domain action
    /// that triggered it already succeeded over REST, so nothing is lost but
    /// a courtesy alert.
    pub fn publish(&self, event: DomainEvent) {
        if !self.is_connected() {
            tracing::debug!(topic = %event.topic, "dropping publish while disconnected");
            return;
        }
        self.hub.broadcast(&event);
    }

    /// Register a subscriber for `topic` on the current connection.
    pub fn subscribe(&self, topic: &str) -> Result<Subscription, BridgeError> {
        let guard = self.connection.lock().map_err(|_| BridgeError::NotConnected)?;
        let conn = guard.as_ref().ok_or(BridgeError::NotConnected)?;

        let (tx, rx) = mpsc::channel();
        conn.add_subscriber(topic, tx);
        Ok(Subscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use societyhub_core::{Role, SocietyId, UserId};

    use crate::event::{ALLOCATION_REQUESTS_TOPIC, AllocationRequested};

    use super::*;

    fn profile(id: i64, role: Role) -> UserProfile {
        UserProfile {
            id: UserId::new(id),
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
            role,
            society_id: SocietyId::new(1),
            society_name: "Green Meadows".to_string(),
        }
    }

    fn allocation_event() -> DomainEvent {
        AllocationRequested {
            request_id: societyhub_core::RequestId::new(7),
            flat_id: societyhub_core::FlatId::new(3),
            user_name: "A".to_string(),
            user_email: "a@x.com".to_string(),
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn fan_out_reaches_connected_sessions_only() {
        let hub = Arc::new(InMemoryHub::new());

        let resident = NotificationBridge::new(Arc::clone(&hub));
        let admin = NotificationBridge::new(Arc::clone(&hub));
        let guard = NotificationBridge::new(Arc::clone(&hub));

        resident.connect(&profile(1, Role::RESIDENT));
        admin.connect(&profile(2, Role::ADMIN));
        guard.connect(&profile(3, Role::GUARD));

        let admin_sub = admin.subscribe(ALLOCATION_REQUESTS_TOPIC).unwrap();
        let guard_sub = guard.subscribe(ALLOCATION_REQUESTS_TOPIC).unwrap();
        guard.disconnect();

        let event = allocation_event();
        resident.publish(event.clone());

        let received = admin_sub.try_recv().unwrap();
        assert_eq!(received.payload, event.payload);
        // Exactly once.
        assert!(admin_sub.try_recv().is_err());
        // Disconnected session sees nothing.
        assert!(guard_sub.try_recv().is_err());
    }

    #[test]
    fn events_arrive_in_publish_order() {
        let hub = Arc::new(InMemoryHub::new());
        let sender = NotificationBridge::new(Arc::clone(&hub));
        let receiver = NotificationBridge::new(Arc::clone(&hub));

        sender.connect(&profile(1, Role::RESIDENT));
        receiver.connect(&profile(2, Role::ADMIN));
        let sub = receiver.subscribe("t").unwrap();

        for n in 0..5 {
            sender.publish(DomainEvent::new("t", serde_json::json!({ "n": n })));
        }
        for n in 0..5 {
            assert_eq!(sub.try_recv().unwrap().payload["n"], n);
        }
    }

    #[test]
    fn publish_while_disconnected_is_silently_dropped() {
        let hub = Arc::new(InMemoryHub::new());
        let listener = NotificationBridge::new(Arc::clone(&hub));
        listener.connect(&profile(2, Role::ADMIN));
        let sub = listener.subscribe("t").unwrap();

        let silent = NotificationBridge::new(Arc::clone(&hub));
        silent.publish(DomainEvent::new("t", serde_json::json!({})));

        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn subscribe_requires_a_connection() {
        let hub = Arc::new(InMemoryHub::new());
        let bridge = NotificationBridge::new(hub);
        assert_eq!(bridge.subscribe("t").unwrap_err(), BridgeError::NotConnected);
    }

    #[test]
    fn topics_are_isolated() {
        let hub = Arc::new(InMemoryHub::new());
        let a = NotificationBridge::new(Arc::clone(&hub));
        let b = NotificationBridge::new(Arc::clone(&hub));
        a.connect(&profile(1, Role::RESIDENT));
        b.connect(&profile(2, Role::ADMIN));

        let other = b.subscribe("/topic/other").unwrap();
        a.publish(allocation_event());
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn disconnect_prunes_the_hub() {
        let hub = Arc::new(InMemoryHub::new());
        let bridge = NotificationBridge::new(Arc::clone(&hub));
        bridge.connect(&profile(1, Role::RESIDENT));
        assert_eq!(hub.connection_count(), 1);

        bridge.disconnect();
        assert_eq!(hub.connection_count(), 0);
        assert!(!bridge.is_connected());

        // Idempotent.
        bridge.disconnect();
        assert!(!bridge.is_connected());
    }
}
