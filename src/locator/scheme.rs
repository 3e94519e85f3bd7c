//! Locator scheme grammar

use std::fmt;

/// Locator schemes
///
/// The lowercase tokens returned by [`Scheme::as_str`] are part of the wire
/// contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// DNS name of a service endpoint
    Dns,
    /// Event topic
    Event,
    /// Device identified by MAC address
    Mac,
    /// The local device ("self:")
    Self_,
    /// Device identified by serial number
    Serial,
    /// Device identified by UUID
    Uuid,
}

impl Scheme {
    /// Canonical lowercase token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dns => "dns",
            Self::Event => "event",
            Self::Mac => "mac",
            Self::Self_ => "self",
            Self::Serial => "serial",
            Self::Uuid => "uuid",
        }
    }

    /// Check if this scheme names a device
    ///
    /// `dns` and `event` address services and topics, not devices.
    #[must_use]
    pub const fn is_device(self) -> bool {
        matches!(self, Self::Mac | Self::Uuid | Self::Serial | Self::Self_)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognize the scheme prefix of a locator string.
///
/// The first character (case-insensitively) selects a candidate scheme,
/// which must then be an exact case-insensitive prefix immediately followed
/// by `:`. `self` is tried before `serial` so that `self:` is never
/// misparsed as the start of `serial:`.
///
/// Returns the scheme, the input after the `:`, and whether any letter of
/// the matched prefix required case-folding. `None` means no scheme
/// matched; that is not an error at this layer.
pub(crate) fn recognize_scheme(s: &str) -> Option<(Scheme, &str, bool)> {
    let first = *s.as_bytes().first()?;
    let candidates: &[Scheme] = match first.to_ascii_lowercase() {
        b'd' => &[Scheme::Dns],
        b'e' => &[Scheme::Event],
        b'm' => &[Scheme::Mac],
        b's' => &[Scheme::Self_, Scheme::Serial],
        b'u' => &[Scheme::Uuid],
        _ => return None,
    };

    for &scheme in candidates {
        let token = scheme.as_str().as_bytes();
        let n = token.len();
        if s.len() <= n || s.as_bytes()[n] != b':' {
            continue;
        }
        // Byte-wise compare: the prefix may sit on a non-ASCII input, so
        // never slice the str before the match is confirmed.
        let head = &s.as_bytes()[..n];
        if head.eq_ignore_ascii_case(token) {
            return Some((scheme, &s[n + 1..], head != token));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_all_schemes() {
        let cases = [
            ("dns:host", Scheme::Dns),
            ("event:topic", Scheme::Event),
            ("mac:112233445566", Scheme::Mac),
            ("self:", Scheme::Self_),
            ("serial:abc", Scheme::Serial),
            ("uuid:1234", Scheme::Uuid),
        ];

        for (input, want) in cases {
            let (scheme, _, folded) = recognize_scheme(input).unwrap();
            assert_eq!(scheme, want, "input {input:?}");
            assert!(!folded, "input {input:?} needs no folding");
        }
    }

    #[test]
    fn test_self_before_serial() {
        let (scheme, rest, folded) = recognize_scheme("self:x").unwrap();
        assert_eq!(scheme, Scheme::Self_);
        assert_eq!(rest, "x");
        assert!(!folded);

        let (scheme, _, _) = recognize_scheme("serial:x").unwrap();
        assert_eq!(scheme, Scheme::Serial);
    }

    #[test]
    fn test_case_folding_reported() {
        let (scheme, rest, folded) = recognize_scheme("SELF:x").unwrap();
        assert_eq!(scheme, Scheme::Self_);
        assert_eq!(rest, "x");
        assert!(folded);

        let (scheme, _, folded) = recognize_scheme("Mac:112233445566").unwrap();
        assert_eq!(scheme, Scheme::Mac);
        assert!(folded);
    }

    #[test]
    fn test_no_match() {
        assert!(recognize_scheme("").is_none());
        assert!(recognize_scheme("s").is_none());
        assert!(recognize_scheme("self").is_none());
        assert!(recognize_scheme("selfx:").is_none());
        assert!(recognize_scheme("http:host").is_none());
        assert!(recognize_scheme("macx:112233445566").is_none());
        assert!(recognize_scheme("mac").is_none());
    }
}
