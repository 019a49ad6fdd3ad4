use serde::{Deserialize, Serialize};
use serde_json::Value;

use societyhub_core::{FlatId, RequestId};

/// Topic a resident's allocation request is announced on.
pub const ALLOCATION_REQUESTS_TOPIC: &str = "/app/flat-allocation-requests";

/// An event carried over the notification bridge.
///
/// Delivery is at-most-once with no replay; the payload is opaque JSON so
/// the bridge never has to know every event shape in the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub topic: String,
    pub payload: Value,
}

impl DomainEvent {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Payload announced when a resident submits a flat-allocation request.
///
/// Subscribers (typically an admin session) receive this shape verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequested {
    pub request_id: RequestId,
    pub flat_id: FlatId,
    pub user_name: String,
    pub user_email: String,
}

impl TryFrom<AllocationRequested> for DomainEvent {
    type Error = serde_json::Error;

    fn try_from(value: AllocationRequested) -> Result<Self, Self::Error> {
        Ok(DomainEvent::new(ALLOCATION_REQUESTS_TOPIC, serde_json::to_value(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_payload_uses_camel_case_keys() {
        let event: DomainEvent = AllocationRequested {
            request_id: RequestId::new(7),
            flat_id: FlatId::new(3),
            user_name: "A".to_string(),
            user_email: "a@x.com".to_string(),
        }
        .try_into()
        .unwrap();

        assert_eq!(event.topic, ALLOCATION_REQUESTS_TOPIC);
        assert_eq!(event.payload["requestId"], 7);
        assert_eq!(event.payload["flatId"], 3);
        assert_eq!(event.payload["userName"], "A");
        assert_eq!(event.payload["userEmail"], "a@x.com");
    }
}
