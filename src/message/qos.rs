//! Quality-of-service values

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest value of the low band
pub const QOS_LOW: QosValue = QosValue(0);
/// Lowest value of the medium band
pub const QOS_MEDIUM: QosValue = QosValue(25);
/// Lowest value of the high band
pub const QOS_HIGH: QosValue = QosValue(50);
/// Lowest value of the critical band
pub const QOS_CRITICAL: QosValue = QosValue(75);

/// Quality-of-service value on the 0-99 scale
///
/// Always present on the wire; the zero default is a valid low-priority
/// value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QosValue(pub i64);

impl QosValue {
    /// Check the 0-99 range
    #[must_use]
    pub const fn valid(self) -> bool {
        0 <= self.0 && self.0 <= 99
    }

    /// Band this value falls into
    ///
    /// Out-of-range values are clamped into the nearest band; use
    /// [`QosValue::valid`] to reject them first.
    #[must_use]
    pub const fn level(self) -> QosLevel {
        if self.0 < QOS_MEDIUM.0 {
            QosLevel::Low
        } else if self.0 < QOS_HIGH.0 {
            QosLevel::Medium
        } else if self.0 < QOS_CRITICAL.0 {
            QosLevel::High
        } else {
            QosLevel::Critical
        }
    }
}

impl fmt::Display for QosValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for QosValue {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Quality-of-service bands, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QosLevel {
    /// 0-24
    Low,
    /// 25-49
    Medium,
    /// 50-74
    High,
    /// 75-99
    Critical,
}
