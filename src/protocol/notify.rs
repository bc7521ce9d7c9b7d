//! Outbound protocol events
//!
//! Everything the hub pushes onto a client's channel: pairing notifications,
//! status and error reports, and relayed negotiation messages. Relayed events
//! reuse the inbound wire tags (`offer`, `answer`, ...) with the payload
//! forwarded verbatim and the sender id attached.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::event::RelayKind;
use crate::registry::client::{ClientId, Gender};

/// Event pushed to a client channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A partner was assigned; exactly one side of the pair is the initiator
    #[serde(rename_all = "camelCase")]
    PartnerFound {
        partner_id: ClientId,
        partner_gender: Gender,
        initiator: bool,
    },

    /// The current partner disconnected or requested a new partner
    PartnerDisconnected,

    /// Informational message, e.g. while waiting for a match
    Status { message: String },

    /// A request from this client failed; the offending event was discarded
    Error { message: String },

    /// Relayed connection offer
    #[serde(rename_all = "camelCase")]
    Offer { payload: Value, sender_id: ClientId },

    /// Relayed answer
    #[serde(rename_all = "camelCase")]
    Answer { payload: Value, sender_id: ClientId },

    /// Relayed transport candidate
    #[serde(rename_all = "camelCase")]
    Candidate { payload: Value, sender_id: ClientId },

    /// Relayed signaling message
    #[serde(rename_all = "camelCase")]
    Signal { payload: Value, sender_id: ClientId },
}

impl ServerEvent {
    /// Build the relayed form of an inbound negotiation message
    pub fn relayed(kind: RelayKind, payload: Value, sender_id: ClientId) -> Self {
        match kind {
            RelayKind::Offer => ServerEvent::Offer { payload, sender_id },
            RelayKind::Answer => ServerEvent::Answer { payload, sender_id },
            RelayKind::Candidate => ServerEvent::Candidate { payload, sender_id },
            RelayKind::Signal => ServerEvent::Signal { payload, sender_id },
        }
    }

    /// Wire tag of this event
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::PartnerFound { .. } => "partnerFound",
            ServerEvent::PartnerDisconnected => "partnerDisconnected",
            ServerEvent::Status { .. } => "status",
            ServerEvent::Error { .. } => "error",
            ServerEvent::Offer { .. } => "offer",
            ServerEvent::Answer { .. } => "answer",
            ServerEvent::Candidate { .. } => "candidate",
            ServerEvent::Signal { .. } => "signal",
        }
    }

    /// Whether this event carries a relayed payload
    pub fn is_relayed(&self) -> bool {
        matches!(
            self,
            ServerEvent::Offer { .. }
                | ServerEvent::Answer { .. }
                | ServerEvent::Candidate { .. }
                | ServerEvent::Signal { .. }
        )
    }
}
