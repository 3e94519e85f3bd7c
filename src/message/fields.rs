//! Explicit field table for the envelope
//!
//! One [`Field`] entry per optional wire field, with its wire name and
//! presence/clear accessors. The forbidden-field validators run on this
//! table, and it is the stable contract for HTTP-header and
//! environment-variable adapters built outside this crate.

use crate::message::envelope::Message;

/// Optional envelope fields, in wire order
///
/// `msg_type` is not listed: it is the one mandatory field and is never
/// subject to presence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `source`
    Source,
    /// `dest`
    Dest,
    /// `transaction_uuid`
    TransactionUuid,
    /// `content_type`
    ContentType,
    /// `accept`
    Accept,
    /// `status`
    Status,
    /// `rdr`
    Rdr,
    /// `headers`
    Headers,
    /// `metadata`
    Metadata,
    /// `path`
    Path,
    /// `payload`
    Payload,
    /// `service_name`
    ServiceName,
    /// `url`
    Url,
    /// `partner_ids`
    PartnerIds,
    /// `session_id`
    SessionId,
    /// `qos`
    Qos,
}

impl Field {
    /// Every optional field, in wire order
    pub const ALL: [Self; 16] = [
        Self::Source,
        Self::Dest,
        Self::TransactionUuid,
        Self::ContentType,
        Self::Accept,
        Self::Status,
        Self::Rdr,
        Self::Headers,
        Self::Metadata,
        Self::Path,
        Self::Payload,
        Self::ServiceName,
        Self::Url,
        Self::PartnerIds,
        Self::SessionId,
        Self::Qos,
    ];

    /// Wire name of the field
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Dest => "dest",
            Self::TransactionUuid => "transaction_uuid",
            Self::ContentType => "content_type",
            Self::Accept => "accept",
            Self::Status => "status",
            Self::Rdr => "rdr",
            Self::Headers => "headers",
            Self::Metadata => "metadata",
            Self::Path => "path",
            Self::Payload => "payload",
            Self::ServiceName => "service_name",
            Self::Url => "url",
            Self::PartnerIds => "partner_ids",
            Self::SessionId => "session_id",
            Self::Qos => "qos",
        }
    }

    /// Check whether the field carries a value in `msg`.
    ///
    /// Empty strings and empty collections count as unset, matching the
    /// omit-on-empty wire behavior. A zero `qos` counts as unset since zero
    /// is the wire default.
    #[must_use]
    pub fn is_set(self, msg: &Message) -> bool {
        match self {
            Self::Source => set(&msg.source),
            Self::Dest => set(&msg.dest),
            Self::TransactionUuid => set(&msg.transaction_uuid),
            Self::ContentType => set(&msg.content_type),
            Self::Accept => set(&msg.accept),
            Self::Status => msg.status.is_some(),
            Self::Rdr => msg.rdr.is_some(),
            Self::Headers => !msg.headers.is_empty(),
            Self::Metadata => !msg.metadata.is_empty(),
            Self::Path => set(&msg.path),
            Self::Payload => !msg.payload.is_empty(),
            Self::ServiceName => set(&msg.service_name),
            Self::Url => set(&msg.url),
            Self::PartnerIds => msg.partner_ids.iter().any(|p| !p.is_empty()),
            Self::SessionId => set(&msg.session_id),
            Self::Qos => msg.qos.0 != 0,
        }
    }

    /// Text content of the field, for string-typed fields.
    ///
    /// `None` for unset fields and for fields that are not strings.
    #[must_use]
    pub fn as_str(self, msg: &Message) -> Option<&str> {
        let value = match self {
            Self::Source => msg.source.as_deref(),
            Self::Dest => msg.dest.as_deref(),
            Self::TransactionUuid => msg.transaction_uuid.as_deref(),
            Self::ContentType => msg.content_type.as_deref(),
            Self::Accept => msg.accept.as_deref(),
            Self::Path => msg.path.as_deref(),
            Self::ServiceName => msg.service_name.as_deref(),
            Self::Url => msg.url.as_deref(),
            Self::SessionId => msg.session_id.as_deref(),
            _ => None,
        };
        value.filter(|s| !s.is_empty())
    }

    /// Reset the field to its unset state.
    pub fn clear(self, msg: &mut Message) {
        match self {
            Self::Source => msg.source = None,
            Self::Dest => msg.dest = None,
            Self::TransactionUuid => msg.transaction_uuid = None,
            Self::ContentType => msg.content_type = None,
            Self::Accept => msg.accept = None,
            Self::Status => msg.status = None,
            Self::Rdr => msg.rdr = None,
            Self::Headers => msg.headers.clear(),
            Self::Metadata => msg.metadata.clear(),
            Self::Path => msg.path = None,
            Self::Payload => msg.payload = bytes::Bytes::new(),
            Self::ServiceName => msg.service_name = None,
            Self::Url => msg.url = None,
            Self::PartnerIds => msg.partner_ids.clear(),
            Self::SessionId => msg.session_id = None,
            Self::Qos => msg.qos = crate::message::qos::QosValue(0),
        }
    }
}

fn set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::types::MessageType;

    #[test]
    fn test_empty_message_has_no_fields_set() {
        let msg = Message::new(MessageType::Unknown);
        for field in Field::ALL {
            assert!(!field.is_set(&msg), "{} must read unset", field.wire_name());
        }
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let msg = Message {
            source: Some(String::new()),
            ..Message::new(MessageType::SimpleEvent)
        };
        assert!(!Field::Source.is_set(&msg));
        assert_eq!(Field::Source.as_str(&msg), None);
    }

    #[test]
    fn test_set_and_clear_are_inverse() {
        let mut msg = Message {
            source: Some("mac:112233445566".to_owned()),
            status: Some(200),
            headers: vec!["key: value".to_owned()],
            payload: bytes::Bytes::from_static(b"x"),
            partner_ids: vec!["comcast".to_owned()],
            qos: crate::message::qos::QosValue(42),
            ..Message::new(MessageType::SimpleRequestResponse)
        };

        for field in [
            Field::Source,
            Field::Status,
            Field::Headers,
            Field::Payload,
            Field::PartnerIds,
            Field::Qos,
        ] {
            assert!(field.is_set(&msg), "{}", field.wire_name());
            field.clear(&mut msg);
            assert!(!field.is_set(&msg), "{}", field.wire_name());
        }
    }
}
