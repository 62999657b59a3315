//! Transform output

use serde::{Deserialize, Serialize};

/// Two-part EDU signature plus the derived product
///
/// `combined` is always `modulation * scaling`; the only constructor
/// computes it, and deserialization recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SignatureParts")]
pub struct Signature {
    modulation: f64,
    scaling: f64,
    combined: f64,
}

#[derive(Deserialize)]
struct SignatureParts {
    modulation: f64,
    scaling: f64,
}

impl From<SignatureParts> for Signature {
    fn from(parts: SignatureParts) -> Self {
        Self::new(parts.modulation, parts.scaling)
    }
}

impl Signature {
    pub fn new(modulation: f64, scaling: f64) -> Self {
        Self {
            modulation,
            scaling,
            combined: modulation * scaling,
        }
    }

    pub fn modulation(&self) -> f64 {
        self.modulation
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    pub fn combined(&self) -> f64 {
        self.combined
    }

    /// The raw `(modulation, scaling)` pair
    pub fn pair(&self) -> (f64, f64) {
        (self.modulation, self.scaling)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.2}) → {:.2}",
            self.modulation, self.scaling, self.combined
        )
    }
}
