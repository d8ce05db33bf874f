//! Numeric value wrapper with an explicit JSON encoding for non-finite values.
//!
//! Metric outputs can be undefined (`0/0`, a short rolling window) or
//! unbounded (`x/0`). JSON has no literal for either, so:
//! - `NaN` encodes as `null`
//! - `+inf` / `-inf` encode as the strings `"Infinity"` / `"-Infinity"`

use serde::{Serialize, Serializer};

/// A metric value as it appears in responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric(pub f64);

impl Metric {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_defined(self) -> bool {
        !self.0.is_nan()
    }
}

impl From<f64> for Metric {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            s.serialize_none()
        } else if v == f64::INFINITY {
            s.serialize_str("Infinity")
        } else if v == f64::NEG_INFINITY {
            s.serialize_str("-Infinity")
        } else {
            s.serialize_f64(v)
        }
    }
}

/// Sum that skips undefined (`NaN`) cells. An all-undefined input sums to 0.
pub fn nan_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().filter(|v| !v.is_nan()).sum()
}
