//! Message codec (encode/decode)
//!
//! Two wire formats carry the same field set: a binary msgpack map keyed by
//! the wire field names, and a JSON object. Decoding checks
//! well-formedness only; validation is a separate step run by the typed
//! conversions or by [`validate`](crate::validate::validate) directly.

use tracing::debug;

use crate::error::{Error, Result};
use crate::message::envelope::Message;

/// Binary format MIME type
pub const MIME_MSGPACK: &str = "application/msgpack";
/// Legacy alias for the binary format
pub const MIME_WRP: &str = "application/wrp";
/// JSON format MIME type
pub const MIME_JSON: &str = "application/json";

/// Wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Binary msgpack map of fields
    Msgpack,
    /// JSON object
    Json,
}

impl Format {
    /// MIME type announcing this format
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Msgpack => MIME_MSGPACK,
            Self::Json => MIME_JSON,
        }
    }

    /// Select a format from an HTTP-style content type.
    ///
    /// A content type containing `json` or `msgpack` (case-sensitive
    /// substring match) selects the corresponding format; the legacy
    /// `application/wrp` selects the binary format.
    pub fn from_content_type(content_type: &str) -> Result<Self> {
        if content_type.contains("json") {
            Ok(Self::Json)
        } else if content_type.contains("msgpack") || content_type == MIME_WRP {
            Ok(Self::Msgpack)
        } else {
            Err(Error::UnsupportedContentType {
                content_type: content_type.to_owned(),
            })
        }
    }
}

/// Encode a message in the given format.
pub fn encode(msg: &Message, format: Format) -> Result<Vec<u8>> {
    match format {
        // Named-map mode: the field names, not positions, are the contract.
        Format::Msgpack => Ok(rmp_serde::to_vec_named(msg)?),
        Format::Json => Ok(serde_json::to_vec(msg)?),
    }
}

/// Decode a message from the given format.
///
/// Fails on malformed input, an unlisted `msg_type` value, and invalid
/// UTF-8 in any string field.
pub fn decode(bytes: &[u8], format: Format) -> Result<Message> {
    let decoded = match format {
        Format::Msgpack => rmp_serde::from_slice(bytes).map_err(Error::from),
        Format::Json => serde_json::from_slice(bytes).map_err(Error::from),
    };
    if let Err(err) = &decoded {
        debug!(?format, %err, "message decode failed");
    }
    decoded
}

impl Message {
    /// Encode this message in the given format.
    pub fn encode(&self, format: Format) -> Result<Vec<u8>> {
        encode(self, format)
    }

    /// Decode a message from bytes in the given format.
    pub fn decode(bytes: &[u8], format: Format) -> Result<Self> {
        decode(bytes, format)
    }
}
