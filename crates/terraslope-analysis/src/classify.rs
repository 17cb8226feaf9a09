//! Slope severity classification.

use serde::{Deserialize, Serialize};

/// Slope severity band.
///
/// Boundaries are fixed and inclusive on the lower bound of each band:
/// exactly 3.0° is [`Gentle`](SlopeClass::Gentle), not
/// [`Flat`](SlopeClass::Flat), and exactly 30.0° is
/// [`VerySteep`](SlopeClass::VerySteep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeClass {
    /// Less than 3°.
    Flat,
    /// 3° to less than 8°.
    Gentle,
    /// 8° to less than 15°.
    Moderate,
    /// 15° to less than 30°.
    Steep,
    /// 30° and above.
    VerySteep,
}

impl SlopeClass {
    /// All bands in ascending severity order.
    pub const ALL: [SlopeClass; 5] = [
        SlopeClass::Flat,
        SlopeClass::Gentle,
        SlopeClass::Moderate,
        SlopeClass::Steep,
        SlopeClass::VerySteep,
    ];

    /// Classify a slope angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        if degrees < 3.0 {
            SlopeClass::Flat
        } else if degrees < 8.0 {
            SlopeClass::Gentle
        } else if degrees < 15.0 {
            SlopeClass::Moderate
        } else if degrees < 30.0 {
            SlopeClass::Steep
        } else {
            SlopeClass::VerySteep
        }
    }

    /// Human-readable band label.
    pub fn label(&self) -> &'static str {
        match self {
            SlopeClass::Flat => "Flat",
            SlopeClass::Gentle => "Gentle",
            SlopeClass::Moderate => "Moderate",
            SlopeClass::Steep => "Steep",
            SlopeClass::VerySteep => "Very steep",
        }
    }

    /// Display color for map rendering.
    pub fn color(&self) -> &'static str {
        match self {
            SlopeClass::Flat => "#4caf50",
            SlopeClass::Gentle => "#cddc39",
            SlopeClass::Moderate => "#ffc107",
            SlopeClass::Steep => "#ff7043",
            SlopeClass::VerySteep => "#d32f2f",
        }
    }
}

impl std::fmt::Display for SlopeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_lower_inclusive() {
        assert_eq!(SlopeClass::from_degrees(0.0), SlopeClass::Flat);
        assert_eq!(SlopeClass::from_degrees(2.9), SlopeClass::Flat);
        assert_eq!(SlopeClass::from_degrees(3.0), SlopeClass::Gentle);
        assert_eq!(SlopeClass::from_degrees(7.9), SlopeClass::Gentle);
        assert_eq!(SlopeClass::from_degrees(8.0), SlopeClass::Moderate);
        assert_eq!(SlopeClass::from_degrees(14.9), SlopeClass::Moderate);
        assert_eq!(SlopeClass::from_degrees(15.0), SlopeClass::Steep);
        assert_eq!(SlopeClass::from_degrees(29.9), SlopeClass::Steep);
        assert_eq!(SlopeClass::from_degrees(30.0), SlopeClass::VerySteep);
        assert_eq!(SlopeClass::from_degrees(89.9), SlopeClass::VerySteep);
    }

    #[test]
    fn test_labels_and_colors_are_distinct() {
        for (i, a) in SlopeClass::ALL.iter().enumerate() {
            for b in SlopeClass::ALL.iter().skip(i + 1) {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
