//! Inbound protocol events
//!
//! Every message a client channel can deliver, decoded once at the boundary
//! into a tagged enum. The relay kinds carry their negotiation payload as an
//! opaque JSON value that the core never inspects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::client::{ClientId, Gender, Preference};

/// Kind of negotiation message relayed between paired clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    /// Connection offer from the initiating peer
    Offer,
    /// Answer to a previously relayed offer
    Answer,
    /// Transport candidate exchanged during negotiation
    Candidate,
    /// Application-defined signaling message
    Signal,
}

impl RelayKind {
    /// Wire name of the kind, identical for inbound and outbound events
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayKind::Offer => "offer",
            RelayKind::Answer => "answer",
            RelayKind::Candidate => "candidate",
            RelayKind::Signal => "signal",
        }
    }
}

impl std::fmt::Display for RelayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event received from a client channel
///
/// Serialized as a JSON object tagged by `type`, e.g.
/// `{"type": "offer", "targetId": "abc", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Declare identity and matching attributes, enter the waiting pool
    #[serde(rename_all = "camelCase")]
    Register {
        id: ClientId,
        gender: Gender,
        preference: Preference,
    },

    /// Relay a connection offer to the paired peer
    #[serde(rename_all = "camelCase")]
    Offer { target_id: ClientId, payload: Value },

    /// Relay an answer to the paired peer
    #[serde(rename_all = "camelCase")]
    Answer { target_id: ClientId, payload: Value },

    /// Relay a transport candidate to the paired peer
    #[serde(rename_all = "camelCase")]
    Candidate { target_id: ClientId, payload: Value },

    /// Relay an opaque signaling message to the paired peer
    #[serde(rename_all = "camelCase")]
    Signal { target_id: ClientId, payload: Value },

    /// Break the current pairing and wait for a new partner
    #[serde(rename_all = "camelCase")]
    NextPartner { id: ClientId },

    /// Leave the system entirely
    #[serde(rename_all = "camelCase")]
    Disconnect { id: ClientId },
}

impl ClientEvent {
    /// Wire tag of this event
    pub fn kind(&self) -> &'static str {
        match self {
            ClientEvent::Register { .. } => "register",
            ClientEvent::Offer { .. } => "offer",
            ClientEvent::Answer { .. } => "answer",
            ClientEvent::Candidate { .. } => "candidate",
            ClientEvent::Signal { .. } => "signal",
            ClientEvent::NextPartner { .. } => "nextPartner",
            ClientEvent::Disconnect { .. } => "disconnect",
        }
    }

    /// Split a relay-class event into `(kind, target, payload)`
    ///
    /// Returns `None` for lifecycle events.
    pub fn into_relay_parts(self) -> Option<(RelayKind, ClientId, Value)> {
        match self {
            ClientEvent::Offer { target_id, payload } => {
                Some((RelayKind::Offer, target_id, payload))
            }
            ClientEvent::Answer { target_id, payload } => {
                Some((RelayKind::Answer, target_id, payload))
            }
            ClientEvent::Candidate { target_id, payload } => {
                Some((RelayKind::Candidate, target_id, payload))
            }
            ClientEvent::Signal { target_id, payload } => {
                Some((RelayKind::Signal, target_id, payload))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_register() {
        let raw = r#"{"type":"register","id":"u1","gender":"male","preference":"opposite"}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(
            event,
            ClientEvent::Register {
                id: ClientId::from("u1"),
                gender: Gender::Male,
                preference: Preference::Opposite,
            }
        );
        assert_eq!(event.kind(), "register");
    }

    #[test]
    fn test_decode_offer_keeps_payload_verbatim() {
        let raw = r#"{"type":"offer","targetId":"u2","payload":{"sdp":"v=0","nested":[1,2]}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        let (kind, target, payload) = event.into_relay_parts().unwrap();
        assert_eq!(kind, RelayKind::Offer);
        assert_eq!(target, ClientId::from("u2"));
        assert_eq!(payload, json!({"sdp": "v=0", "nested": [1, 2]}));
    }

    #[test]
    fn test_decode_next_partner_tag_casing() {
        let raw = r#"{"type":"nextPartner","id":"u3"}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(
            event,
            ClientEvent::NextPartner {
                id: ClientId::from("u3")
            }
        );
    }

    #[test]
    fn test_decode_missing_field_fails() {
        // offer without a payload is malformed and must not decode
        let raw = r#"{"type":"offer","targetId":"u2"}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_decode_unknown_kind_fails() {
        let raw = r#"{"type":"teleport","id":"u1"}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn test_lifecycle_events_have_no_relay_parts() {
        let event = ClientEvent::Disconnect {
            id: ClientId::from("u1"),
        };
        assert!(event.into_relay_parts().is_none());
    }

    #[test]
    fn test_relay_kind_names() {
        assert_eq!(RelayKind::Offer.as_str(), "offer");
        assert_eq!(RelayKind::Answer.as_str(), "answer");
        assert_eq!(RelayKind::Candidate.as_str(), "candidate");
        assert_eq!(RelayKind::Signal.as_str(), "signal");
    }
}
