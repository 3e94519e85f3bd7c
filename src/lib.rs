//! WRP (Web Routing Protocol) - normalized wire message model
//!
//! This library provides the WRP message used by a device-management
//! protocol: a canonical, versioned binary/text encoding, a typed-union
//! message model, and a composable validation/transformation pipeline
//! applied around encode/decode.
//!
//! # Quick Start
//!
//! ```rust
//! use wrp::{Format, Locator, Message, SimpleEvent, Variant};
//!
//! // Parse a locator; MAC authorities are normalized
//! let locator = Locator::parse("MAC:11:22:33:44:55:66")?;
//! assert_eq!(locator.to_string(), "mac:112233445566");
//!
//! // Build a typed message and publish it into an envelope
//! let event = SimpleEvent::new("mac:112233445566", "event:device-status", &b"up"[..]);
//! let mut msg = Message::default();
//! event.to_message(&mut msg)?;
//!
//! // Encode to bytes, decode, and recover the typed view
//! let bytes = msg.encode(Format::Msgpack)?;
//! let decoded = Message::decode(&bytes, Format::Msgpack)?;
//! let recovered = SimpleEvent::from_message(&decoded)?;
//! assert_eq!(recovered, event);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Locators
//!
//! A locator addresses a device, service, or event topic:
//! `scheme:authority[/service][/ignored]`, over the fixed schemes `mac`,
//! `uuid`, `dns`, `serial`, `self`, `event`. The `scheme:authority` prefix
//! of a device scheme is a [`DeviceId`], always held in canonical form.
//!
//! # Validation
//!
//! Every conversion between the [`Message`] envelope and a typed variant
//! runs the standard per-type validator first; conversions never publish a
//! message that failed validation. Callers add their own rules, or opt
//! out, through [`validate::Validation`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod error;
pub mod locator;
pub mod message;
pub mod pipeline;
pub mod validate;

pub use error::{Error, ParseError, Result};
pub use locator::{DeviceId, Locator, Scheme};
pub use message::{
    Authorization, Crud, Field, Format, Message, MessageType, QosLevel, QosValue, ServiceAlive,
    ServiceRegistration, SimpleEvent, SimpleRequestResponse, TypedMessage, Unknown, Variant,
    decode, encode, is_message,
};
pub use pipeline::{
    CancelToken, Modifier, Modifiers, Observer, Observers, Processor, Processors, Verdict,
};
pub use validate::{StandardValidator, Validation};
