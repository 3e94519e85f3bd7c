//! WRP message model
//!
//! The [`Message`] envelope carries the union of every wire field; the
//! typed variants expose per-type views with validating conversions in both
//! directions; the codec maps the envelope to and from the two wire
//! formats.

mod codec;
mod envelope;
mod fields;
mod qos;
mod types;
mod variants;

pub use codec::{Format, MIME_JSON, MIME_MSGPACK, MIME_WRP, decode, encode};
pub use envelope::Message;
pub use fields::Field;
pub use qos::{QOS_CRITICAL, QOS_HIGH, QOS_LOW, QOS_MEDIUM, QosLevel, QosValue};
pub use types::MessageType;
pub use variants::{
    Authorization, Crud, ServiceAlive, ServiceRegistration, SimpleEvent, SimpleRequestResponse,
    TypedMessage, Unknown, Variant, is_message,
};
