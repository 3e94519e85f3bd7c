//! Locator parsing and validation

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::locator::device::{DeviceId, parse_device_id};
use crate::locator::scheme::Scheme;

/// Structured locator: `scheme:authority[/service][/ignored]`
///
/// Constructed by [`Locator::parse`] or derived from a
/// [`DeviceId`](crate::DeviceId); validated on construction. `ignored`
/// carries its own leading `/` when non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Locator scheme
    pub scheme: Scheme,
    /// Authority; its meaning depends on the scheme, and it is empty only
    /// for `self:`
    pub authority: String,
    /// Service segment; never contains `/`, always empty for `dns`/`event`
    pub service: String,
    /// Raw unparsed suffix, starting with `/` when present
    pub ignored: String,
    /// Device identity; populated only for device schemes
    pub id: Option<DeviceId>,
}

impl Locator {
    /// Parse and validate a locator string.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (id, remainder) = parse_device_id(input).map_err(|err| relabel(input, err))?;
        let mut locator = id.as_locator();

        match locator.scheme {
            // No service segment for these schemes: the remainder is kept
            // verbatim as the ignored suffix.
            Scheme::Dns | Scheme::Event => {
                locator.ignored = remainder.to_owned();
            }
            _ => {
                if !remainder.is_empty() {
                    let Some(segments) = remainder.strip_prefix('/') else {
                        return Err(ParseError::InvalidLocator {
                            input: input.to_owned(),
                            reason: "expected '/' after authority",
                        });
                    };
                    match segments.find('/') {
                        Some(at) => {
                            locator.service = segments[..at].to_owned();
                            locator.ignored = segments[at..].to_owned();
                        }
                        None => locator.service = segments.to_owned(),
                    }
                }
            }
        }

        locator.validate()?;
        Ok(locator)
    }

    /// Check the per-scheme structural invariants.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.service.contains('/') {
            return Err(self.invalid("service must not contain '/'"));
        }

        match self.scheme {
            Scheme::Self_ => {
                if !self.authority.is_empty() {
                    return Err(self.invalid("self takes no authority"));
                }
                if self.id.as_ref().map(DeviceId::as_str) != Some("self:") {
                    return Err(self.invalid("identifier must be \"self:\""));
                }
            }
            Scheme::Mac | Scheme::Uuid | Scheme::Serial => {
                if self.authority.is_empty() {
                    return Err(self.invalid("empty authority"));
                }
                let canonical =
                    DeviceId::parse(&format!("{}:{}", self.scheme, self.authority))
                        .map_err(|_| self.invalid("authority does not normalize"))?;
                if self.id.as_ref() != Some(&canonical) {
                    return Err(self.invalid("identifier does not match scheme and authority"));
                }
            }
            Scheme::Dns | Scheme::Event => {
                if self.authority.is_empty() {
                    return Err(self.invalid("empty authority"));
                }
                if !self.service.is_empty() {
                    return Err(self.invalid("service not allowed for this scheme"));
                }
                if self.id.is_some() {
                    return Err(self.invalid("identifier not allowed for this scheme"));
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &'static str) -> ParseError {
        ParseError::InvalidLocator {
            input: self.to_string(),
            reason,
        }
    }
}

/// Grammar failures below the locator layer surface as locator errors,
/// keeping the full input in the report.
fn relabel(input: &str, err: ParseError) -> ParseError {
    match err {
        ParseError::InvalidDeviceName { reason, .. } | ParseError::InvalidLocator { reason, .. } => {
            ParseError::InvalidLocator {
                input: input.to_owned(),
                reason,
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.authority)?;
        match self.scheme {
            Scheme::Dns | Scheme::Event => {}
            _ => {
                if !self.service.is_empty() {
                    write!(f, "/{}", self.service)?;
                } else if !self.ignored.is_empty() {
                    // An empty service segment was present in the source
                    // string ("mac:x//y"); reproduce it so re-parsing yields
                    // this same value.
                    f.write_str("/")?;
                }
            }
        }
        f.write_str(&self.ignored)
    }
}

impl FromStr for Locator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
