//! Payment status value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of an order.
///
/// There is no payment gateway; the only automatic movement is the flip to
/// `Paid` when an order enters the delivered state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment not yet settled. Initial state.
    #[default]
    Pending,
    /// Payment settled (stamped on delivery).
    Paid,
    /// Payment attempt failed.
    Failed,
    /// Payment returned to the customer.
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        };
        f.write_str(name)
    }
}
