//! The WRP message envelope

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::message::qos::QosValue;
use crate::message::types::MessageType;

/// The canonical WRP envelope: the union of every wire field.
///
/// Which fields are legal is determined by `msg_type` and enforced by the
/// typed variant conversions, not by this struct. Field names are the wire
/// names; zero-valued optional fields are omitted on encode, except `qos`
/// which is always written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message type; the only mandatory field
    pub msg_type: MessageType,

    /// Originating locator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Destination locator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    /// Correlates a response to its request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_uuid: Option<String>,

    /// Media type of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Media types acceptable in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,

    /// Response status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    /// Request delivery response code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdr: Option<i64>,

    /// Ordered transport headers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,

    /// Free-form key/value metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,

    /// CRUD object path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Raw payload bytes
    #[serde(default, skip_serializing_if = "Bytes::is_empty")]
    pub payload: Bytes,

    /// Registered service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Registered service URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Partner identifiers; empty entries are dropped on every copy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partner_ids: Vec<String>,

    /// Session identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Quality of service, 0-99
    #[serde(default)]
    pub qos: QosValue,
}

impl Message {
    /// Create an empty envelope of the given type.
    #[must_use]
    pub fn new(msg_type: MessageType) -> Self {
        Self {
            msg_type,
            ..Self::default()
        }
    }

    /// Partner identifiers with empty entries dropped.
    ///
    /// Every conversion copies partner IDs through this filter, so typed
    /// variants never carry empty entries.
    #[must_use]
    pub fn trimmed_partner_ids(&self) -> Vec<String> {
        trim_partner_ids(&self.partner_ids)
    }

    /// Build the reply envelope: source and destination swapped,
    /// transaction UUID and session preserved, request-only content
    /// (payload, headers, metadata, status, rdr) cleared.
    #[must_use]
    pub fn response(&self) -> Self {
        Self {
            msg_type: self.msg_type,
            source: self.dest.clone(),
            dest: self.source.clone(),
            transaction_uuid: self.transaction_uuid.clone(),
            partner_ids: self.trimmed_partner_ids(),
            session_id: self.session_id.clone(),
            qos: self.qos,
            ..Self::default()
        }
    }
}

/// Drop empty partner-ID entries, preserving order.
pub(crate) fn trim_partner_ids(partner_ids: &[String]) -> Vec<String> {
    partner_ids
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect()
}
