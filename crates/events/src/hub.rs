//! In-process fan-out hub (transport stand-in).
//!
//! In production the bridge sits on a WebSocket/STOMP connection; the hub is
//! the same fan-out contract in process form, which is all the client core
//! needs (and all the tests need).

use std::collections::HashMap;
use std::sync::{Mutex, Weak, mpsc};

use societyhub_core::UserId;

use crate::event::DomainEvent;

/// One attached client connection.
///
/// Owned (`Arc`) by the bridge that opened it; the hub only holds a `Weak`
/// so a dropped connection disappears from fan-out on the next broadcast.
#[derive(Debug)]
pub(crate) struct ConnectionInner {
    user_id: UserId,
    subscriptions: Mutex<HashMap<String, Vec<mpsc::Sender<DomainEvent>>>>,
}

impl ConnectionInner {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn user_id(&self) -> UserId {
        self.user_id
    }

    pub(crate) fn add_subscriber(&self, topic: &str, sender: mpsc::Sender<DomainEvent>) {
        if let Ok(mut subs) = self.subscriptions.lock() {
            subs.entry(topic.to_string()).or_default().push(sender);
        }
    }

    fn deliver(&self, event: &DomainEvent) {
        let Ok(mut subs) = self.subscriptions.lock() else {
            return;
        };
        if let Some(senders) = subs.get_mut(&event.topic) {
            // Drop subscribers whose receiving end is gone.
            senders.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

/// Shared hub every session's bridge attaches to.
///
/// Broadcast semantics per topic, best-effort only: no persistence, no
/// replay, no delivery guarantee.
#[derive(Debug, Default)]
pub struct InMemoryHub {
    connections: Mutex<Vec<Weak<ConnectionInner>>>,
}

impl InMemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, connection: Weak<ConnectionInner>) {
        if let Ok(mut conns) = self.connections.lock() {
            conns.push(connection);
        }
    }

    pub(crate) fn broadcast(&self, event: &DomainEvent) {
        let Ok(mut conns) = self.connections.lock() else {
            return;
        };
        // Prune dead connections while fanning out.
        conns.retain(|weak| match weak.upgrade() {
            Some(conn) => {
                conn.deliver(event);
                true
            }
            None => false,
        });
    }

    /// Number of live connections (diagnostics/tests).
    pub fn connection_count(&self) -> usize {
        match self.connections.lock() {
            Ok(mut conns) => {
                conns.retain(|weak| weak.strong_count() > 0);
                conns.len()
            }
            Err(_) => 0,
        }
    }
}
