use mobidex_core::{DeviceRecord, Error, Result, SpecVector};
use serde::{Deserialize, Serialize};

/// Target specs plus exact categorical constraints.
///
/// A constraint of `None` leaves that field unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    pub target: SpecVector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
}

impl MatchQuery {
    pub fn new(target: SpecVector) -> Self {
        Self {
            target,
            brand: None,
            os: None,
            chipset: None,
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    #[must_use]
    pub fn with_chipset(mut self, chipset: impl Into<String>) -> Self {
        self.chipset = Some(chipset.into());
        self
    }

    /// Reject non-numeric (NaN, infinite) and negative targets
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.target.entries() {
            if !value.is_finite() {
                return Err(Error::InvalidQuery(format!(
                    "target '{}' is not a number: {}",
                    field, value
                )));
            }
            if value < 0.0 {
                return Err(Error::InvalidQuery(format!(
                    "target '{}' must be non-negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Whether the record satisfies every categorical constraint
    pub fn satisfies_constraints(&self, record: &DeviceRecord) -> bool {
        Self::constraint_holds(self.brand.as_deref(), Some(record.brand.as_str()))
            && Self::constraint_holds(self.os.as_deref(), record.os.as_deref())
            && Self::constraint_holds(self.chipset.as_deref(), record.chipset.as_deref())
    }

    fn constraint_holds(expected: Option<&str>, actual: Option<&str>) -> bool {
        match expected {
            None => true,
            Some(expected) => actual == Some(expected),
        }
    }
}
