//! Tunables for geometry construction and loop checking.

use serde::{Deserialize, Serialize};

/// Tolerance thresholds used when checking computed loops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Relative distance below which two positions are coincident.
    pub coincidence: f64,
    /// Segments per arc when a loop is polygonized for the simplicity check.
    pub arc_segments: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            arc_segments: 16,
        }
    }
}

impl Tolerance {
    /// Scale-aware comparison: `coincidence` is relative to the larger
    /// magnitude, and absolute below 1.
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.coincidence * a.abs().max(b.abs()).max(1.0)
    }

    /// Rounding error carried by coordinates of magnitude up to `reach`.
    pub fn rounding(&self, reach: f64) -> f64 {
        4.0 * f64::EPSILON * reach.abs()
    }

    /// Whether a feature of size `length` at coordinates of magnitude `reach`
    /// keeps enough significant bits for the loop checks to hold.
    pub fn resolves(&self, length: f64, reach: f64) -> bool {
        length.is_finite() && reach.is_finite() && length > 1024.0 * self.rounding(reach)
    }

    /// A length that cannot be told apart from zero at coordinates of
    /// magnitude `reach`.
    pub fn is_zero_length(&self, length: f64, reach: f64) -> bool {
        length.is_nan() || length.abs() <= self.rounding(reach)
    }
}

/// Whether the two bosses may overlap each other.
///
/// Boss B sits `bar_length` from boss A center to center, so the bosses are
/// disjoint only when `bar_length > 2 * radius`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Clearance {
    /// Require `bar_length > 2 * radius`. Tangent bosses are rejected.
    #[default]
    Disjoint,
    /// Only require a positive bar length; the bosses may intersect.
    AllowOverlap,
}

/// Numeric physical-group tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTags {
    pub boss_a: i32,
    pub boss_b: i32,
    /// `None` leaves the bar volume untagged.
    pub bar: Option<i32>,
    /// Lateral faces of all three solids.
    pub lateral: i32,
    /// Base caps, only used when cap surface names are configured.
    pub base_cap: i32,
    /// Top caps, only used when cap surface names are configured.
    pub top_cap: i32,
}

impl Default for GroupTags {
    fn default() -> Self {
        Self {
            boss_a: 300,
            boss_b: 400,
            bar: Some(500),
            lateral: 200,
            base_cap: 201,
            top_cap: 202,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_is_relative_for_large_values() {
        let tol = Tolerance::default();
        assert!(tol.approx_eq(1.0e6, 1.0e6 + 1.0e-4));
        assert!(!tol.approx_eq(1.0, 1.0 + 1.0e-6));
    }

    #[test]
    fn test_zero_length_is_relative_to_reach() {
        let tol = Tolerance::default();
        assert!(tol.is_zero_length(0.0, 0.0));
        assert!(!tol.is_zero_length(1.0e-12, 1.0));
        assert!(!tol.is_zero_length(1.0, 1.0e10));
        assert!(tol.is_zero_length(1.0e-7, 1.0e10));
        assert!(tol.is_zero_length(f64::NAN, 1.0));
    }

    #[test]
    fn test_resolves_needs_finite_inputs() {
        let tol = Tolerance::default();
        assert!(tol.resolves(1.0, 1.0e9));
        assert!(!tol.resolves(1.0e-3, 1.0e12));
        assert!(!tol.resolves(1.0, f64::INFINITY));
        assert!(!tol.resolves(f64::INFINITY, 1.0));
    }

    #[test]
    fn test_default_tags_are_distinct() {
        let tags = GroupTags::default();
        assert_ne!(tags.boss_a, tags.boss_b);
        assert_eq!(tags.bar, Some(500));
    }
}
