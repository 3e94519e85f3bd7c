//! Device identifiers
//!
//! A [`DeviceId`] is the canonical `scheme:authority` form of a device
//! address: lowercase scheme, whitespace-trimmed authority, MAC authorities
//! normalized to bare lowercase hex. The only way to obtain one is through
//! the parser, so a held value is always canonical.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::locator::parse::Locator;
use crate::locator::scheme::{Scheme, recognize_scheme};

/// MAC authorities are exactly six octets (EUI-48).
const MAC_HEX_DIGITS: usize = 12;

/// Canonical device identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId {
    scheme: Scheme,
    canonical: String,
}

impl DeviceId {
    /// Parse the leading device identifier of a string.
    ///
    /// Anything after the authority (a `/service` suffix and beyond) is
    /// ignored; use [`Locator::parse`](crate::Locator::parse) to consume the
    /// full locator grammar.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse_device_id(input).map(|(id, _)| id)
    }

    /// Canonical `scheme:authority` form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Scheme of this identifier
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Authority, without the scheme prefix
    ///
    /// Empty for `self:`.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.canonical[self.scheme.as_str().len() + 1..]
    }

    /// Derive the locator addressing this identifier.
    ///
    /// The locator's `id` is cleared for `dns`/`event` schemes since those
    /// do not name a device.
    #[must_use]
    pub fn as_locator(&self) -> Locator {
        Locator {
            scheme: self.scheme,
            authority: self.authority().to_owned(),
            service: String::new(),
            ignored: String::new(),
            id: self.scheme.is_device().then(|| self.clone()),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for DeviceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(input: &str, reason: &'static str) -> ParseError {
    ParseError::InvalidDeviceName {
        input: input.to_owned(),
        reason,
    }
}

/// Parse a device identifier, returning the unparsed remainder.
///
/// The remainder starts at the character after the authority (typically a
/// `/` or nothing), so the locator parser can continue without re-scanning.
pub(crate) fn parse_device_id(input: &str) -> Result<(DeviceId, &str), ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "empty device name"));
    }

    let Some((scheme, rest, _folded)) = recognize_scheme(trimmed) else {
        return Err(invalid(input, "unrecognized scheme"));
    };

    // self: carries no authority
    if scheme == Scheme::Self_ {
        let id = DeviceId {
            scheme,
            canonical: String::from("self:"),
        };
        return Ok((id, rest));
    }

    let (authority, remainder) = match rest.find('/') {
        Some(at) => (&rest[..at], &rest[at..]),
        None => (rest, ""),
    };
    let authority = authority.trim();
    if authority.is_empty() {
        return Err(invalid(input, "empty authority"));
    }

    let authority = if scheme == Scheme::Mac {
        normalize_mac(authority).map_err(|reason| invalid(input, reason))?
    } else {
        Cow::Borrowed(authority)
    };

    let id = DeviceId {
        scheme,
        canonical: format!("{}:{authority}", scheme.as_str()),
    };
    Ok((id, remainder))
}

/// Normalize a MAC authority: strip `:`/`-`/`.`/`,` delimiters, lowercase
/// the hex digits, and require exactly [`MAC_HEX_DIGITS`] of them.
///
/// Already-canonical input is returned borrowed.
fn normalize_mac(authority: &str) -> Result<Cow<'_, str>, &'static str> {
    let canonical = authority.len() == MAC_HEX_DIGITS
        && authority
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if canonical {
        return Ok(Cow::Borrowed(authority));
    }

    let mut normalized = String::with_capacity(MAC_HEX_DIGITS);
    for b in authority.bytes() {
        match b {
            b':' | b'-' | b'.' | b',' => {}
            b'0'..=b'9' | b'a'..=b'f' => normalized.push(char::from(b)),
            b'A'..=b'F' => normalized.push(char::from(b.to_ascii_lowercase())),
            _ => return Err("mac authority must be hexadecimal"),
        }
    }
    if normalized.len() != MAC_HEX_DIGITS {
        return Err("mac authority must contain exactly 12 hex digits");
    }
    Ok(Cow::Owned(normalized))
}
