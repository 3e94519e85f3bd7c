//! Standard message validation
//!
//! Each message type has a validator bundle composing "want" rules (its
//! required fields, with locator and range checks) with "do not want"
//! rules (every field not legal for it). The bundles are the authoritative
//! definition of each type's legal shape; the typed variant conversions
//! are defined purely in terms of running them.
//!
//! [`validate`] is the single choke point: standard validation runs first
//! unless opted out via [`Validation::none`], then any caller-supplied
//! validators, all under the [`Processors`] contract. A run where no rule
//! found anything wrong is a success.
//!
//! String fields cannot hold invalid UTF-8 in this implementation; hostile
//! wire input is rejected by the codec before validation ever sees it.

pub mod rules;

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::message::{Field, Message, MessageType};
use crate::pipeline::{CancelToken, Processor, Processors, Verdict};

/// Options controlling validation during conversion.
///
/// The default runs standard validation; [`Validation::none`] opts out;
/// [`Validation::with`] appends caller validators, which run after the
/// standard bundle.
#[derive(Default)]
pub struct Validation {
    skip_standard: bool,
    extra: Processors,
}

impl Validation {
    /// Standard validation, no extras. Same as `Validation::default()`.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Skip standard validation; only extras run.
    #[must_use]
    pub fn none() -> Self {
        Self {
            skip_standard: true,
            extra: Processors::new(),
        }
    }

    /// Append a validator, builder style.
    #[must_use]
    pub fn with(mut self, validator: impl Processor + 'static) -> Self {
        self.extra.push(validator);
        self
    }
}

/// Validate a message: the standard per-type bundle (unless opted out),
/// then the caller's extra validators.
///
/// Rules that pass defer rather than "handle", so a clean run ends in
/// [`Verdict::NotHandled`]; both verdicts are success here. The first rule
/// failure is returned unchanged.
pub fn validate(msg: &Message, validation: &Validation) -> Result<()> {
    let token = CancelToken::new();
    if !validation.skip_standard {
        StandardValidator.process(&token, msg)?;
    }
    validation.extra.process(&token, msg)?;
    Ok(())
}

/// The built-in per-type validator, as a [`Processor`].
///
/// Dispatches on the message's actual type to the matching bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidator;

impl Processor for StandardValidator {
    fn process(&self, token: &CancelToken, msg: &Message) -> std::result::Result<Verdict, Error> {
        validator_for(msg.msg_type).process(token, msg)
    }
}

/// The validator bundle defining the legal shape of `msg_type`.
///
/// The bundles live in per-process lookup tables built once on first use
/// and never mutated.
#[must_use]
pub fn validator_for(msg_type: MessageType) -> &'static Processors {
    let bundles = bundles();
    match msg_type {
        MessageType::Authorization => &bundles.authorization,
        MessageType::SimpleRequestResponse => &bundles.simple_request_response,
        MessageType::SimpleEvent => &bundles.simple_event,
        MessageType::Create
        | MessageType::Retrieve
        | MessageType::Update
        | MessageType::Delete => &bundles.crud,
        MessageType::ServiceRegistration => &bundles.service_registration,
        MessageType::ServiceAlive => &bundles.service_alive,
        // Unknown doubles as the shape of anything unclassified: nothing
        // beyond the type itself is legal.
        MessageType::Unknown => &bundles.unknown,
    }
}

struct Bundles {
    authorization: Processors,
    simple_request_response: Processors,
    simple_event: Processors,
    crud: Processors,
    service_registration: Processors,
    service_alive: Processors,
    unknown: Processors,
}

fn bundles() -> &'static Bundles {
    static BUNDLES: OnceLock<Bundles> = OnceLock::new();
    BUNDLES.get_or_init(|| Bundles {
        authorization: shape(
            "Authorization",
            &[MessageType::Authorization],
            &[Field::Status],
            &[],
            &[],
        ),
        simple_request_response: shape(
            "SimpleRequestResponse",
            &[MessageType::SimpleRequestResponse],
            &[Field::Source, Field::Dest, Field::TransactionUuid],
            &[
                Field::ContentType,
                Field::Accept,
                Field::Status,
                Field::Rdr,
                Field::Headers,
                Field::Metadata,
                Field::Payload,
                Field::PartnerIds,
                Field::SessionId,
                Field::Qos,
            ],
            &[Field::Source, Field::Dest],
        ),
        simple_event: shape(
            "SimpleEvent",
            &[MessageType::SimpleEvent],
            &[Field::Source, Field::Dest],
            &[
                Field::TransactionUuid,
                Field::ContentType,
                Field::Rdr,
                Field::Headers,
                Field::Metadata,
                Field::Payload,
                Field::PartnerIds,
                Field::SessionId,
                Field::Qos,
            ],
            &[Field::Source, Field::Dest],
        ),
        crud: shape(
            "CRUD",
            &MessageType::CRUD,
            &[Field::Source, Field::Dest, Field::TransactionUuid],
            &[
                Field::ContentType,
                Field::Accept,
                Field::Status,
                Field::Rdr,
                Field::Headers,
                Field::Metadata,
                Field::Path,
                Field::Payload,
                Field::PartnerIds,
                Field::SessionId,
                Field::Qos,
            ],
            &[Field::Source, Field::Dest],
        ),
        service_registration: shape(
            "ServiceRegistration",
            &[MessageType::ServiceRegistration],
            &[Field::ServiceName, Field::Url],
            &[],
            &[],
        ),
        service_alive: shape(
            "ServiceAlive",
            &[MessageType::ServiceAlive],
            &[],
            &[],
            &[],
        ),
        unknown: shape("Unknown", &[MessageType::Unknown], &[], &[], &[]),
    })
}

/// Compose the bundle for one message shape: type membership, required
/// fields, locator content, forbidden fields (everything not required or
/// allowed), and the QoS range when QoS is legal.
fn shape(
    expected: &'static str,
    types: &'static [MessageType],
    required: &'static [Field],
    allowed: &'static [Field],
    locators: &'static [Field],
) -> Processors {
    let mut processors = Processors::new().with(rules::type_in(expected, types));
    for &field in required {
        processors.push(rules::require(field));
    }
    for &field in locators {
        processors.push(rules::valid_locator(field));
    }
    for field in Field::ALL {
        if !required.contains(&field) && !allowed.contains(&field) {
            processors.push(rules::forbid(field));
        }
    }
    if required.contains(&Field::Qos) || allowed.contains(&Field::Qos) {
        processors.push(rules::valid_qos());
    }
    processors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::QosValue;
    use bytes::Bytes;

    fn valid_event() -> Message {
        Message {
            source: Some("mac:112233445566".to_owned()),
            dest: Some("event:status".to_owned()),
            payload: Bytes::from_static(b"up"),
            ..Message::new(MessageType::SimpleEvent)
        }
    }

    #[test]
    fn test_standard_validation_accepts_legal_event() {
        validate(&valid_event(), &Validation::default()).unwrap();
    }

    #[test]
    fn test_missing_required_field_fails() {
        let msg = Message {
            dest: None,
            ..valid_event()
        };
        assert!(matches!(
            validate(&msg, &Validation::default()),
            Err(Error::MissingField { field: "dest" })
        ));
    }

    #[test]
    fn test_forbidden_field_fails() {
        let msg = Message {
            status: Some(200),
            ..valid_event()
        };
        assert!(matches!(
            validate(&msg, &Validation::default()),
            Err(Error::ForbiddenField { field: "status" })
        ));
    }

    #[test]
    fn test_malformed_locator_fails() {
        let msg = Message {
            source: Some("mac:11-22".to_owned()),
            ..valid_event()
        };
        assert!(matches!(
            validate(&msg, &Validation::default()),
            Err(Error::InvalidLocatorField { field: "source", .. })
        ));
    }

    #[test]
    fn test_out_of_range_qos_fails() {
        let msg = Message {
            qos: QosValue(150),
            ..valid_event()
        };
        assert!(matches!(
            validate(&msg, &Validation::default()),
            Err(Error::QosOutOfRange { value: 150 })
        ));
    }

    #[test]
    fn test_skip_standard_validation() {
        let illegal = Message {
            status: Some(200),
            ..valid_event()
        };
        validate(&illegal, &Validation::none()).unwrap();
    }

    #[test]
    fn test_extra_validators_run_after_standard() {
        let err = validate(
            &valid_event(),
            &Validation::default().with(rules::partner_ids_contain("comcast")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PartnerIdNotListed { .. }));
    }

    #[test]
    fn test_extras_run_even_without_standard() {
        let err = validate(
            &valid_event(),
            &Validation::none().with(rules::partner_ids_required()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PartnerIdsMissing));
    }

    #[test]
    fn test_service_alive_allows_nothing() {
        validate(
            &Message::new(MessageType::ServiceAlive),
            &Validation::default(),
        )
        .unwrap();

        let msg = Message {
            payload: Bytes::from_static(b"x"),
            ..Message::new(MessageType::ServiceAlive)
        };
        assert!(matches!(
            validate(&msg, &Validation::default()),
            Err(Error::ForbiddenField { field: "payload" })
        ));
    }

    #[test]
    fn test_authorization_shape() {
        let msg = Message {
            status: Some(200),
            ..Message::new(MessageType::Authorization)
        };
        validate(&msg, &Validation::default()).unwrap();

        let missing = Message::new(MessageType::Authorization);
        assert!(matches!(
            validate(&missing, &Validation::default()),
            Err(Error::MissingField { field: "status" })
        ));
    }
}
