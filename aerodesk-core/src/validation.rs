//! Input checks that run before any store access.

use crate::models::{NewFlight, NewPassenger};
use crate::{CoreError, CoreResult};

fn required(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Rejects empty seat labels.
pub fn seat_label(label: &str) -> CoreResult<()> {
    required("seat label", label)
}

impl NewFlight {
    /// Checks required text fields and that `capacity` is in `1..=max_capacity`.
    /// Returns the capacity as an unsigned count on success.
    pub fn validate(&self, max_capacity: u32) -> CoreResult<u32> {
        required("origin", &self.origin)?;
        required("destination", &self.destination)?;

        if self.capacity <= 0 {
            return Err(CoreError::validation(format!(
                "capacity must be a positive integer, got {}",
                self.capacity
            )));
        }
        if self.capacity > i64::from(max_capacity) {
            return Err(CoreError::validation(format!(
                "capacity {} exceeds the maximum of {}",
                self.capacity, max_capacity
            )));
        }

        u32::try_from(self.capacity)
            .map_err(|_| CoreError::validation(format!("capacity out of range: {}", self.capacity)))
    }
}

impl NewPassenger {
    pub fn validate(&self) -> CoreResult<()> {
        required("name", &self.name)?;
        required("passport", self.passport.expose())
    }
}
