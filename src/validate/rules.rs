//! Individual validation rules
//!
//! Every rule is a [`Processor`]: it reports [`Verdict::NotHandled`] when
//! the message passes (the rule "found nothing wrong and defers") and a
//! specific error when it does not. Rules never report
//! [`Verdict::Handled`]; deciding that a message is overall acceptable is
//! the aggregate's job.

use crate::error::Error;
use crate::locator::Locator;
use crate::message::{Field, Message, MessageType};
use crate::pipeline::{CancelToken, Processor, Verdict};

/// Require `field` to carry a value.
pub fn require(field: Field) -> impl Processor {
    move |_: &CancelToken, msg: &Message| {
        if field.is_set(msg) {
            Ok(Verdict::NotHandled)
        } else {
            Err(Error::MissingField {
                field: field.wire_name(),
            })
        }
    }
}

/// Require `field` to be absent or empty.
pub fn forbid(field: Field) -> impl Processor {
    move |_: &CancelToken, msg: &Message| {
        if field.is_set(msg) {
            Err(Error::ForbiddenField {
                field: field.wire_name(),
            })
        } else {
            Ok(Verdict::NotHandled)
        }
    }
}

/// Require `field`, when set, to parse as a locator.
///
/// An unset field defers to [`require`]; this rule checks content only.
pub fn valid_locator(field: Field) -> impl Processor {
    move |_: &CancelToken, msg: &Message| {
        let Some(value) = field.as_str(msg) else {
            return Ok(Verdict::NotHandled);
        };
        match Locator::parse(value) {
            Ok(_) => Ok(Verdict::NotHandled),
            Err(source) => Err(Error::InvalidLocatorField {
                field: field.wire_name(),
                source,
            }),
        }
    }
}

/// Require the quality-of-service value to be on the 0-99 scale.
pub fn valid_qos() -> impl Processor {
    |_: &CancelToken, msg: &Message| {
        if msg.qos.valid() {
            Ok(Verdict::NotHandled)
        } else {
            Err(Error::QosOutOfRange { value: msg.qos.0 })
        }
    }
}

/// Require the message type to be one of `types`.
pub fn type_in(expected: &'static str, types: &'static [MessageType]) -> impl Processor {
    move |_: &CancelToken, msg: &Message| {
        if types.contains(&msg.msg_type) {
            Ok(Verdict::NotHandled)
        } else {
            Err(Error::UnexpectedMessageType {
                expected,
                found: msg.msg_type,
            })
        }
    }
}

/// Require at least one non-empty partner identifier.
pub fn partner_ids_required() -> impl Processor {
    |_: &CancelToken, msg: &Message| {
        if msg.partner_ids.iter().any(|p| !p.is_empty()) {
            Ok(Verdict::NotHandled)
        } else {
            Err(Error::PartnerIdsMissing)
        }
    }
}

/// Require the trimmed partner identifiers to include `id`.
pub fn partner_ids_contain(id: impl Into<String>) -> impl Processor {
    let want = id.into();
    move |_: &CancelToken, msg: &Message| {
        if msg.partner_ids.iter().any(|p| *p == want) {
            Ok(Verdict::NotHandled)
        } else {
            Err(Error::PartnerIdNotListed { want: want.clone() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &impl Processor, msg: &Message) -> Result<Verdict, Error> {
        rule.process(&CancelToken::new(), msg)
    }

    #[test]
    fn test_require_and_forbid() {
        let msg = Message {
            source: Some("mac:112233445566".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };

        assert_eq!(
            run(&require(Field::Source), &msg).unwrap(),
            Verdict::NotHandled
        );
        assert!(matches!(
            run(&require(Field::Dest), &msg),
            Err(Error::MissingField { field: "dest" })
        ));
        assert!(matches!(
            run(&forbid(Field::Source), &msg),
            Err(Error::ForbiddenField { field: "source" })
        ));
        assert_eq!(
            run(&forbid(Field::Path), &msg).unwrap(),
            Verdict::NotHandled
        );
    }

    #[test]
    fn test_valid_locator_checks_content_only() {
        let rule = valid_locator(Field::Dest);

        let unset = Message::new(MessageType::SimpleEvent);
        assert_eq!(run(&rule, &unset).unwrap(), Verdict::NotHandled);

        let good = Message {
            dest: Some("event:status".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };
        assert_eq!(run(&rule, &good).unwrap(), Verdict::NotHandled);

        let bad = Message {
            dest: Some("nope".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };
        assert!(matches!(
            run(&rule, &bad),
            Err(Error::InvalidLocatorField { field: "dest", .. })
        ));
    }

    #[test]
    fn test_qos_range_rule() {
        let rule = valid_qos();
        let mut msg = Message::new(MessageType::SimpleEvent);

        msg.qos = crate::message::QosValue(99);
        assert!(run(&rule, &msg).is_ok());

        msg.qos = crate::message::QosValue(100);
        assert!(matches!(
            run(&rule, &msg),
            Err(Error::QosOutOfRange { value: 100 })
        ));
    }

    #[test]
    fn test_type_membership() {
        let rule = type_in("CRUD", &MessageType::CRUD);

        let update = Message::new(MessageType::Update);
        assert!(run(&rule, &update).is_ok());

        let event = Message::new(MessageType::SimpleEvent);
        assert!(matches!(
            run(&rule, &event),
            Err(Error::UnexpectedMessageType {
                expected: "CRUD",
                found: MessageType::SimpleEvent,
            })
        ));
    }

    #[test]
    fn test_partner_id_rules() {
        let msg = Message {
            partner_ids: vec![String::new(), "comcast".to_owned()],
            ..Message::new(MessageType::SimpleEvent)
        };

        assert!(run(&partner_ids_required(), &msg).is_ok());
        assert!(run(&partner_ids_contain("comcast"), &msg).is_ok());
        assert!(matches!(
            run(&partner_ids_contain("sky"), &msg),
            Err(Error::PartnerIdNotListed { .. })
        ));

        let empty = Message::new(MessageType::SimpleEvent);
        assert!(matches!(
            run(&partner_ids_required(), &empty),
            Err(Error::PartnerIdsMissing)
        ));
    }
}
