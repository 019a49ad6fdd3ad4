//! `societyhub-events` — best-effort realtime notification bridge.
//!
//! The bridge augments UX with timely cross-session alerts; it is never the
//! authoritative record. The REST write that triggers a publish has already
//! succeeded by the time the event goes out.

pub mod bridge;
pub mod event;
pub mod hub;

pub use bridge::{BridgeError, NotificationBridge, Subscription};
pub use event::{ALLOCATION_REQUESTS_TOPIC, AllocationRequested, DomainEvent};
pub use hub::InMemoryHub;
