//! Tracking number value object.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters allowed in the random suffix.
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 5;

/// Customer-facing tracking number, unique across all orders.
///
/// Format: `TRK` + creation timestamp in milliseconds + 5-character random
/// alphanumeric suffix. Immutable once assigned at order placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Generate a tracking number for an order created at `created_at`.
    #[must_use]
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let idx = rng.random_range(0..SUFFIX_CHARSET.len());
                SUFFIX_CHARSET[idx] as char
            })
            .collect();
        Self(format!("TRK{}{suffix}", created_at.timestamp_millis()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TrackingNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}
