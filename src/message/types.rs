//! WRP message types

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

/// WRP message types
///
/// The discriminants are the wire numbering; values 0 and 1 belonged to a
/// legacy revision and are never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum MessageType {
    /// Authorization status handshake
    Authorization = 2,
    /// Request expecting a response
    SimpleRequestResponse = 3,
    /// Fire-and-forget event
    SimpleEvent = 4,
    /// CRUD: create
    Create = 5,
    /// CRUD: retrieve
    Retrieve = 6,
    /// CRUD: update
    Update = 7,
    /// CRUD: delete
    Delete = 8,
    /// Service advertises itself to the routing layer
    ServiceRegistration = 9,
    /// Service keep-alive
    ServiceAlive = 10,
    /// Anything not covered above
    Unknown = 11,
}

impl MessageType {
    /// All message types, in wire order
    pub const ALL: [Self; 10] = [
        Self::Authorization,
        Self::SimpleRequestResponse,
        Self::SimpleEvent,
        Self::Create,
        Self::Retrieve,
        Self::Update,
        Self::Delete,
        Self::ServiceRegistration,
        Self::ServiceAlive,
        Self::Unknown,
    ];

    /// The four CRUD types
    pub const CRUD: [Self; 4] = [Self::Create, Self::Retrieve, Self::Update, Self::Delete];

    /// Convert from the wire value
    #[must_use]
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            2 => Some(Self::Authorization),
            3 => Some(Self::SimpleRequestResponse),
            4 => Some(Self::SimpleEvent),
            5 => Some(Self::Create),
            6 => Some(Self::Retrieve),
            7 => Some(Self::Update),
            8 => Some(Self::Delete),
            9 => Some(Self::ServiceRegistration),
            10 => Some(Self::ServiceAlive),
            11 => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Convert to the wire value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self as i64
    }

    /// Check if this is one of the four CRUD types
    #[must_use]
    pub const fn is_crud(self) -> bool {
        matches!(self, Self::Create | Self::Retrieve | Self::Update | Self::Delete)
    }

    /// Check if messages of this type must carry a transaction UUID
    #[must_use]
    pub const fn requires_transaction_uuid(self) -> bool {
        matches!(
            self,
            Self::SimpleRequestResponse
                | Self::Create
                | Self::Retrieve
                | Self::Update
                | Self::Delete
        )
    }
}

impl Default for MessageType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authorization => "Authorization",
            Self::SimpleRequestResponse => "SimpleRequestResponse",
            Self::SimpleEvent => "SimpleEvent",
            Self::Create => "Create",
            Self::Retrieve => "Retrieve",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::ServiceRegistration => "ServiceRegistration",
            Self::ServiceAlive => "ServiceAlive",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::from_i64(value)
            .ok_or_else(|| D::Error::custom(format_args!("invalid message type: {value}")))
    }
}
