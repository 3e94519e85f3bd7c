//! Stock message modifiers

use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use crate::locator::{DeviceId, Locator, Scheme};
use crate::message::Message;
use crate::pipeline::{CancelToken, Modifier, Verdict};

/// Rewrites `self:` locators to a concrete device identity.
///
/// A device talking about itself says `self:`; once the message reaches
/// infrastructure that knows who the device is, `source` and `dest`
/// locators using the `self` scheme are rewritten to the device's real
/// identifier, keeping any service and ignored suffix.
#[derive(Debug, Clone)]
pub struct SelfLocatorRewriter {
    /// The identity `self:` resolves to
    pub id: DeviceId,
}

impl SelfLocatorRewriter {
    /// Rewrite one locator field; `None` when the field does not apply.
    fn rewrite(&self, value: &str) -> Result<Option<String>, Error> {
        let locator = match Locator::parse(value) {
            Ok(locator) => locator,
            // Not this modifier's business: leave malformed locators for
            // the validators to report.
            Err(_) => return Ok(None),
        };
        if locator.scheme != Scheme::Self_ {
            return Ok(None);
        }

        let mut replacement = self.id.as_locator();
        replacement.service = locator.service;
        replacement.ignored = locator.ignored;
        replacement.validate()?;
        Ok(Some(replacement.to_string()))
    }
}

impl Modifier for SelfLocatorRewriter {
    fn modify(&self, _token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        let mut handled = false;
        for field in [&mut msg.source, &mut msg.dest] {
            let Some(value) = field.as_deref() else {
                continue;
            };
            if let Some(rewritten) = self.rewrite(value)? {
                debug!(from = %value, to = %rewritten, "rewrote self locator");
                *field = Some(rewritten);
                handled = true;
            }
        }
        Ok(if handled {
            Verdict::Handled
        } else {
            Verdict::NotHandled
        })
    }
}

/// Merges fixed metadata into every message.
///
/// Keys already present on the message win; injection never clobbers what
/// the sender set.
#[derive(Debug, Clone, Default)]
pub struct MetadataInjector {
    /// Entries to inject
    pub metadata: HashMap<String, String>,
}

impl Modifier for MetadataInjector {
    fn modify(&self, _token: &CancelToken, msg: &mut Message) -> Result<Verdict, Error> {
        let mut handled = false;
        for (key, value) in &self.metadata {
            if !msg.metadata.contains_key(key) {
                msg.metadata.insert(key.clone(), value.clone());
                handled = true;
            }
        }
        Ok(if handled {
            Verdict::Handled
        } else {
            Verdict::NotHandled
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageType;

    fn rewriter() -> SelfLocatorRewriter {
        SelfLocatorRewriter {
            id: DeviceId::parse("mac:112233445566").unwrap(),
        }
    }

    #[test]
    fn test_rewrites_self_source_and_dest() {
        let mut msg = Message {
            source: Some("self:/config".to_owned()),
            dest: Some("self:".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };

        let verdict = rewriter().modify(&CancelToken::new(), &mut msg).unwrap();
        assert_eq!(verdict, Verdict::Handled);
        assert_eq!(msg.source.as_deref(), Some("mac:112233445566/config"));
        assert_eq!(msg.dest.as_deref(), Some("mac:112233445566"));
    }

    #[test]
    fn test_leaves_concrete_locators_alone() {
        let mut msg = Message {
            source: Some("mac:665544332211".to_owned()),
            dest: Some("event:status".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };
        let before = msg.clone();

        let verdict = rewriter().modify(&CancelToken::new(), &mut msg).unwrap();
        assert_eq!(verdict, Verdict::NotHandled);
        assert_eq!(msg, before);
    }

    #[test]
    fn test_malformed_locator_is_not_this_modifiers_problem() {
        let mut msg = Message {
            source: Some("garbage".to_owned()),
            ..Message::new(MessageType::SimpleEvent)
        };

        let verdict = rewriter().modify(&CancelToken::new(), &mut msg).unwrap();
        assert_eq!(verdict, Verdict::NotHandled);
        assert_eq!(msg.source.as_deref(), Some("garbage"));
    }

    #[test]
    fn test_metadata_injection_never_clobbers() {
        let injector = MetadataInjector {
            metadata: HashMap::from([
                ("fleet".to_owned(), "east".to_owned()),
                ("trace".to_owned(), "injected".to_owned()),
            ]),
        };

        let mut msg = Message {
            metadata: HashMap::from([("trace".to_owned(), "original".to_owned())]),
            ..Message::new(MessageType::SimpleEvent)
        };

        let verdict = injector.modify(&CancelToken::new(), &mut msg).unwrap();
        assert_eq!(verdict, Verdict::Handled);
        assert_eq!(msg.metadata["fleet"], "east");
        assert_eq!(msg.metadata["trace"], "original");
    }

    #[test]
    fn test_metadata_injection_noop_reports_not_handled() {
        let injector = MetadataInjector {
            metadata: HashMap::from([("trace".to_owned(), "injected".to_owned())]),
        };
        let mut msg = Message {
            metadata: HashMap::from([("trace".to_owned(), "original".to_owned())]),
            ..Message::new(MessageType::SimpleEvent)
        };

        let verdict = injector.modify(&CancelToken::new(), &mut msg).unwrap();
        assert_eq!(verdict, Verdict::NotHandled);
    }
}
