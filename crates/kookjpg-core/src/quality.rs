//! JPEG quality setting.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a quality value falls outside `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    #[error("JPEG quality must be between {min} and {max}, got {value}", min = Quality::MIN, max = Quality::MAX)]
    OutOfRange { value: i64 },
}

/// JPEG quality, 0 (smallest file) to 100 (highest fidelity).
///
/// Construction fails for values outside the range; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;
    /// Quality used when nothing else is requested, and by the saver.
    pub const DEFAULT: Quality = Quality(90);

    /// Create a quality value, rejecting anything above 100.
    pub fn new(value: u8) -> Result<Self, QualityError> {
        if value > Self::MAX {
            return Err(QualityError::OutOfRange {
                value: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// The raw quality value.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Value handed to the encoder. The encoder's lowest setting is 1,
    /// so quality 0 is encoded as 1.
    #[inline]
    pub(crate) fn encoder_value(self) -> u8 {
        self.0.max(1)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Quality {
    type Error = QualityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(QualityError::OutOfRange { value })
    }
}

impl From<Quality> for i64 {
    fn from(quality: Quality) -> Self {
        i64::from(quality.0)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
