//! Delivery Schedule Policy
//!
//! Deployment-specific delivery rules: which weekdays are blocked for
//! delivery, and which time slots and regions can be chosen. The data is
//! injected from configuration, not hardcoded.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::ordering::errors::OrderError;

/// Delivery scheduling policy for validating order placement and edits.
#[derive(Debug, Clone)]
pub struct DeliverySchedule {
    time_slots: Vec<String>,
    regions: Vec<String>,
    blocked_weekdays: Vec<Weekday>,
}

impl DeliverySchedule {
    /// Create a policy from configuration data.
    #[must_use]
    pub const fn new(
        time_slots: Vec<String>,
        regions: Vec<String>,
        blocked_weekdays: Vec<Weekday>,
    ) -> Self {
        Self {
            time_slots,
            regions,
            blocked_weekdays,
        }
    }

    /// The selectable delivery time slots.
    #[must_use]
    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    /// The selectable delivery regions.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Validate a purchase date against `today`.
    ///
    /// Comparison is date-only; the date is checked once, at placement or
    /// edit time, and never re-validated as time passes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDeliverySchedule` if the date is in the past or falls
    /// on a blocked weekday.
    pub fn validate_purchase_date(
        &self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), OrderError> {
        if date < today {
            return Err(OrderError::InvalidDeliverySchedule {
                message: "Purchase date cannot be in the past".to_string(),
            });
        }
        if self.blocked_weekdays.contains(&date.weekday()) {
            return Err(OrderError::InvalidDeliverySchedule {
                message: format!("Delivery is not available on {}", date.weekday()),
            });
        }
        Ok(())
    }

    /// Validate a delivery time slot.
    ///
    /// # Errors
    ///
    /// Returns a field error if the slot is not in the configured set.
    pub fn validate_time_slot(&self, slot: &str) -> Result<(), OrderError> {
        if self.time_slots.iter().any(|s| s == slot) {
            Ok(())
        } else {
            Err(OrderError::InvalidParameters {
                field: "delivery_time".to_string(),
                message: format!("Delivery time must be one of: {}", self.time_slots.join(", ")),
            })
        }
    }

    /// Validate a delivery region.
    ///
    /// # Errors
    ///
    /// Returns a field error if the region is not in the configured set.
    pub fn validate_region(&self, region: &str) -> Result<(), OrderError> {
        if self.regions.iter().any(|r| r == region) {
            Ok(())
        } else {
            Err(OrderError::InvalidParameters {
                field: "delivery_location".to_string(),
                message: "Please select a valid delivery region".to_string(),
            })
        }
    }
}
