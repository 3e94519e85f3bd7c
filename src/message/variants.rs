//! Typed message variants
//!
//! One struct per message type, each carrying only the fields legal for
//! that type. Conversions between a variant and the generic [`Message`]
//! envelope always validate first: `from_message` validates the source
//! envelope before copying fields out, and `to_message` builds and
//! validates a candidate envelope before publishing it into the output
//! argument, so the output is untouched on failure.

use std::collections::HashMap;

use bytes::Bytes;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::message::envelope::{Message, trim_partner_ids};
use crate::message::qos::QosValue;
use crate::message::types::MessageType;
use crate::validate::{Validation, validate};

/// A typed view over the envelope.
///
/// This trait is the closed registry of message shapes: conversions and the
/// [`is_message`]/[`TypedMessage`] helpers operate only over its
/// implementors plus the generic envelope itself.
pub trait Variant: Sized {
    /// Human-readable variant name, used in error reports
    const NAME: &'static str;

    /// Check whether this variant can represent the given message type.
    ///
    /// Constant for every variant except [`Crud`], which covers the four
    /// CRUD types.
    fn accepts(msg_type: MessageType) -> bool;

    /// The message type this value carries
    fn message_type(&self) -> MessageType;

    /// Build the envelope for this variant's fields, without validating.
    fn build_message(&self) -> Message;

    /// Copy the legal fields out of a validated envelope, without
    /// validating. Callers go through [`Variant::from_message_with`].
    fn copy_from(msg: &Message) -> Self;

    /// Convert an envelope into this variant.
    ///
    /// The envelope is validated first (standard validation plus whatever
    /// `validation` adds); a type mismatch or validation failure leaves
    /// nothing constructed.
    fn from_message_with(msg: &Message, validation: &Validation) -> Result<Self> {
        if !Self::accepts(msg.msg_type) {
            return Err(Error::UnexpectedMessageType {
                expected: Self::NAME,
                found: msg.msg_type,
            });
        }
        validate(msg, validation)?;
        Ok(Self::copy_from(msg))
    }

    /// [`Variant::from_message_with`] under standard validation.
    fn from_message(msg: &Message) -> Result<Self> {
        Self::from_message_with(msg, &Validation::default())
    }

    /// Convert this variant into `out`.
    ///
    /// A candidate envelope is built and validated first; `out` is only
    /// assigned on success.
    fn to_message_with(&self, out: &mut Message, validation: &Validation) -> Result<()> {
        if !Self::accepts(self.message_type()) {
            return Err(Error::UnexpectedMessageType {
                expected: Self::NAME,
                found: self.message_type(),
            });
        }
        let candidate = self.build_message();
        validate(&candidate, validation)?;
        *out = candidate;
        Ok(())
    }

    /// [`Variant::to_message_with`] under standard validation.
    fn to_message(&self, out: &mut Message) -> Result<()> {
        self.to_message_with(out, &Validation::default())
    }

    /// Validate this variant's fields without publishing anywhere.
    fn validate_with(&self, validation: &Validation) -> Result<()> {
        let mut scratch = Message::default();
        self.to_message_with(&mut scratch, validation)
    }

    /// [`Variant::validate_with`] under standard validation.
    fn validate(&self) -> Result<()> {
        self.validate_with(&Validation::default())
    }
}

/// Check whether an envelope is acceptable as the given variant.
///
/// True iff the variant covers the envelope's type and the configured
/// validators accept it (a validator set that does not apply counts as
/// acceptance).
#[must_use]
pub fn is_message<V: Variant>(msg: &Message, validation: &Validation) -> bool {
    V::accepts(msg.msg_type) && validate(msg, validation).is_ok()
}

/// Authorization status handshake
///
/// Carries only a status code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    /// Authorization status
    pub status: i64,
}

impl Variant for Authorization {
    const NAME: &'static str = "Authorization";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::Authorization
    }

    fn message_type(&self) -> MessageType {
        MessageType::Authorization
    }

    fn build_message(&self) -> Message {
        Message {
            status: Some(self.status),
            ..Message::new(MessageType::Authorization)
        }
    }

    fn copy_from(msg: &Message) -> Self {
        Self {
            status: msg.status.unwrap_or_default(),
        }
    }
}

/// Request/response exchange between two locators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleRequestResponse {
    /// Originating locator
    pub source: String,
    /// Destination locator
    pub dest: String,
    /// Correlates the response to this request
    pub transaction_uuid: String,
    /// Media type of the payload
    pub content_type: Option<String>,
    /// Media types acceptable in the response
    pub accept: Option<String>,
    /// Response status code
    pub status: Option<i64>,
    /// Request delivery response code
    pub rdr: Option<i64>,
    /// Ordered transport headers
    pub headers: Vec<String>,
    /// Free-form key/value metadata
    pub metadata: HashMap<String, String>,
    /// Raw payload bytes
    pub payload: Bytes,
    /// Partner identifiers
    pub partner_ids: Vec<String>,
    /// Session identifier
    pub session_id: Option<String>,
    /// Quality of service
    pub qos: QosValue,
}

impl SimpleRequestResponse {
    /// Create a request with a freshly generated transaction UUID.
    #[must_use]
    pub fn new(source: impl Into<String>, dest: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            transaction_uuid: Uuid::new_v4().to_string(),
            payload: payload.into(),
            ..Self::default()
        }
    }
}

impl Variant for SimpleRequestResponse {
    const NAME: &'static str = "SimpleRequestResponse";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::SimpleRequestResponse
    }

    fn message_type(&self) -> MessageType {
        MessageType::SimpleRequestResponse
    }

    fn build_message(&self) -> Message {
        Message {
            source: Some(self.source.clone()),
            dest: Some(self.dest.clone()),
            transaction_uuid: Some(self.transaction_uuid.clone()),
            content_type: self.content_type.clone(),
            accept: self.accept.clone(),
            status: self.status,
            rdr: self.rdr,
            headers: self.headers.clone(),
            metadata: self.metadata.clone(),
            payload: self.payload.clone(),
            partner_ids: trim_partner_ids(&self.partner_ids),
            session_id: self.session_id.clone(),
            qos: self.qos,
            ..Message::new(MessageType::SimpleRequestResponse)
        }
    }

    fn copy_from(msg: &Message) -> Self {
        Self {
            source: msg.source.clone().unwrap_or_default(),
            dest: msg.dest.clone().unwrap_or_default(),
            transaction_uuid: msg.transaction_uuid.clone().unwrap_or_default(),
            content_type: msg.content_type.clone(),
            accept: msg.accept.clone(),
            status: msg.status,
            rdr: msg.rdr,
            headers: msg.headers.clone(),
            metadata: msg.metadata.clone(),
            payload: msg.payload.clone(),
            partner_ids: msg.trimmed_partner_ids(),
            session_id: msg.session_id.clone(),
            qos: msg.qos,
        }
    }
}

/// Fire-and-forget event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleEvent {
    /// Originating locator
    pub source: String,
    /// Destination locator, typically an `event:` topic
    pub dest: String,
    /// Optional correlation UUID
    pub transaction_uuid: Option<String>,
    /// Media type of the payload
    pub content_type: Option<String>,
    /// Request delivery response code
    pub rdr: Option<i64>,
    /// Ordered transport headers
    pub headers: Vec<String>,
    /// Free-form key/value metadata
    pub metadata: HashMap<String, String>,
    /// Raw payload bytes
    pub payload: Bytes,
    /// Partner identifiers
    pub partner_ids: Vec<String>,
    /// Session identifier
    pub session_id: Option<String>,
    /// Quality of service
    pub qos: QosValue,
}

impl SimpleEvent {
    /// Create an event.
    #[must_use]
    pub fn new(source: impl Into<String>, dest: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            payload: payload.into(),
            ..Self::default()
        }
    }
}

impl Variant for SimpleEvent {
    const NAME: &'static str = "SimpleEvent";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::SimpleEvent
    }

    fn message_type(&self) -> MessageType {
        MessageType::SimpleEvent
    }

    fn build_message(&self) -> Message {
        Message {
            source: Some(self.source.clone()),
            dest: Some(self.dest.clone()),
            transaction_uuid: self.transaction_uuid.clone(),
            content_type: self.content_type.clone(),
            rdr: self.rdr,
            headers: self.headers.clone(),
            metadata: self.metadata.clone(),
            payload: self.payload.clone(),
            partner_ids: trim_partner_ids(&self.partner_ids),
            session_id: self.session_id.clone(),
            qos: self.qos,
            ..Message::new(MessageType::SimpleEvent)
        }
    }

    fn copy_from(msg: &Message) -> Self {
        Self {
            source: msg.source.clone().unwrap_or_default(),
            dest: msg.dest.clone().unwrap_or_default(),
            transaction_uuid: msg.transaction_uuid.clone(),
            content_type: msg.content_type.clone(),
            rdr: msg.rdr,
            headers: msg.headers.clone(),
            metadata: msg.metadata.clone(),
            payload: msg.payload.clone(),
            partner_ids: msg.trimmed_partner_ids(),
            session_id: msg.session_id.clone(),
            qos: msg.qos,
        }
    }
}

/// Create/retrieve/update/delete request
///
/// Covers four message types, so the type is itself a field here.
#[derive(Debug, Clone, PartialEq)]
pub struct Crud {
    /// One of the four CRUD types
    pub msg_type: MessageType,
    /// Originating locator
    pub source: String,
    /// Destination locator
    pub dest: String,
    /// Correlates the response to this request
    pub transaction_uuid: String,
    /// Media type of the payload
    pub content_type: Option<String>,
    /// Media types acceptable in the response
    pub accept: Option<String>,
    /// Response status code
    pub status: Option<i64>,
    /// Request delivery response code
    pub rdr: Option<i64>,
    /// Ordered transport headers
    pub headers: Vec<String>,
    /// Free-form key/value metadata
    pub metadata: HashMap<String, String>,
    /// Object path operated on
    pub path: Option<String>,
    /// Raw payload bytes
    pub payload: Bytes,
    /// Partner identifiers
    pub partner_ids: Vec<String>,
    /// Session identifier
    pub session_id: Option<String>,
    /// Quality of service
    pub qos: QosValue,
}

impl Default for Crud {
    fn default() -> Self {
        Self {
            msg_type: MessageType::Create,
            source: String::new(),
            dest: String::new(),
            transaction_uuid: String::new(),
            content_type: None,
            accept: None,
            status: None,
            rdr: None,
            headers: Vec::new(),
            metadata: HashMap::new(),
            path: None,
            payload: Bytes::new(),
            partner_ids: Vec::new(),
            session_id: None,
            qos: QosValue(0),
        }
    }
}

impl Variant for Crud {
    const NAME: &'static str = "CRUD";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type.is_crud()
    }

    fn message_type(&self) -> MessageType {
        self.msg_type
    }

    fn build_message(&self) -> Message {
        Message {
            source: Some(self.source.clone()),
            dest: Some(self.dest.clone()),
            transaction_uuid: Some(self.transaction_uuid.clone()),
            content_type: self.content_type.clone(),
            accept: self.accept.clone(),
            status: self.status,
            rdr: self.rdr,
            headers: self.headers.clone(),
            metadata: self.metadata.clone(),
            path: self.path.clone(),
            payload: self.payload.clone(),
            partner_ids: trim_partner_ids(&self.partner_ids),
            session_id: self.session_id.clone(),
            qos: self.qos,
            ..Message::new(self.msg_type)
        }
    }

    fn copy_from(msg: &Message) -> Self {
        Self {
            msg_type: msg.msg_type,
            source: msg.source.clone().unwrap_or_default(),
            dest: msg.dest.clone().unwrap_or_default(),
            transaction_uuid: msg.transaction_uuid.clone().unwrap_or_default(),
            content_type: msg.content_type.clone(),
            accept: msg.accept.clone(),
            status: msg.status,
            rdr: msg.rdr,
            headers: msg.headers.clone(),
            metadata: msg.metadata.clone(),
            path: msg.path.clone(),
            payload: msg.payload.clone(),
            partner_ids: msg.trimmed_partner_ids(),
            session_id: msg.session_id.clone(),
            qos: msg.qos,
        }
    }
}

/// Service advertises itself to the routing layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRegistration {
    /// Registered service name
    pub service_name: String,
    /// URL the service listens on
    pub url: String,
}

impl Variant for ServiceRegistration {
    const NAME: &'static str = "ServiceRegistration";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::ServiceRegistration
    }

    fn message_type(&self) -> MessageType {
        MessageType::ServiceRegistration
    }

    fn build_message(&self) -> Message {
        Message {
            service_name: Some(self.service_name.clone()),
            url: Some(self.url.clone()),
            ..Message::new(MessageType::ServiceRegistration)
        }
    }

    fn copy_from(msg: &Message) -> Self {
        Self {
            service_name: msg.service_name.clone().unwrap_or_default(),
            url: msg.url.clone().unwrap_or_default(),
        }
    }
}

/// Service keep-alive; carries nothing but its type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceAlive;

impl Variant for ServiceAlive {
    const NAME: &'static str = "ServiceAlive";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::ServiceAlive
    }

    fn message_type(&self) -> MessageType {
        MessageType::ServiceAlive
    }

    fn build_message(&self) -> Message {
        Message::new(MessageType::ServiceAlive)
    }

    fn copy_from(_msg: &Message) -> Self {
        Self
    }
}

/// Unclassified message; carries nothing but its type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unknown;

impl Variant for Unknown {
    const NAME: &'static str = "Unknown";

    fn accepts(msg_type: MessageType) -> bool {
        msg_type == MessageType::Unknown
    }

    fn message_type(&self) -> MessageType {
        MessageType::Unknown
    }

    fn build_message(&self) -> Message {
        Message::new(MessageType::Unknown)
    }

    fn copy_from(_msg: &Message) -> Self {
        Self
    }
}

/// The closed union of every typed variant.
///
/// [`TypedMessage::from_message`] is the generic-to-specific direction of
/// the conversion engine: it dispatches on the envelope's actual type and
/// produces the matching variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedMessage {
    /// Authorization status handshake
    Authorization(Authorization),
    /// Request/response exchange
    SimpleRequestResponse(SimpleRequestResponse),
    /// Fire-and-forget event
    SimpleEvent(SimpleEvent),
    /// CRUD request
    Crud(Crud),
    /// Service registration
    ServiceRegistration(ServiceRegistration),
    /// Service keep-alive
    ServiceAlive(ServiceAlive),
    /// Unclassified message
    Unknown(Unknown),
}

impl TypedMessage {
    /// Convert an envelope into the variant matching its type.
    pub fn from_message_with(msg: &Message, validation: &Validation) -> Result<Self> {
        let typed = match msg.msg_type {
            MessageType::Authorization => {
                Self::Authorization(Authorization::from_message_with(msg, validation)?)
            }
            MessageType::SimpleRequestResponse => Self::SimpleRequestResponse(
                SimpleRequestResponse::from_message_with(msg, validation)?,
            ),
            MessageType::SimpleEvent => {
                Self::SimpleEvent(SimpleEvent::from_message_with(msg, validation)?)
            }
            MessageType::Create
            | MessageType::Retrieve
            | MessageType::Update
            | MessageType::Delete => Self::Crud(Crud::from_message_with(msg, validation)?),
            MessageType::ServiceRegistration => {
                Self::ServiceRegistration(ServiceRegistration::from_message_with(msg, validation)?)
            }
            MessageType::ServiceAlive => {
                Self::ServiceAlive(ServiceAlive::from_message_with(msg, validation)?)
            }
            MessageType::Unknown => Self::Unknown(Unknown::from_message_with(msg, validation)?),
        };
        Ok(typed)
    }

    /// [`TypedMessage::from_message_with`] under standard validation.
    pub fn from_message(msg: &Message) -> Result<Self> {
        Self::from_message_with(msg, &Validation::default())
    }

    /// Convert this variant into `out`; `out` is untouched on failure.
    pub fn to_message_with(&self, out: &mut Message, validation: &Validation) -> Result<()> {
        match self {
            Self::Authorization(v) => v.to_message_with(out, validation),
            Self::SimpleRequestResponse(v) => v.to_message_with(out, validation),
            Self::SimpleEvent(v) => v.to_message_with(out, validation),
            Self::Crud(v) => v.to_message_with(out, validation),
            Self::ServiceRegistration(v) => v.to_message_with(out, validation),
            Self::ServiceAlive(v) => v.to_message_with(out, validation),
            Self::Unknown(v) => v.to_message_with(out, validation),
        }
    }

    /// [`TypedMessage::to_message_with`] under standard validation.
    pub fn to_message(&self, out: &mut Message) -> Result<()> {
        self.to_message_with(out, &Validation::default())
    }

    /// The message type this value carries
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Authorization(v) => v.message_type(),
            Self::SimpleRequestResponse(v) => v.message_type(),
            Self::SimpleEvent(v) => v.message_type(),
            Self::Crud(v) => v.message_type(),
            Self::ServiceRegistration(v) => v.message_type(),
            Self::ServiceAlive(v) => v.message_type(),
            Self::Unknown(v) => v.message_type(),
        }
    }
}
