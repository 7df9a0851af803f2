// Top Level Constants
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// Fraction of each axis span added as padding when deriving bounds,
/// so zones at the edge are not clipped by the grid.
pub const BOUNDS_MARGIN_FRACTION: f64 = 0.1;
/// Padding (degrees) applied to a degenerate (zero-span) axis.
pub const DEGENERATE_AXIS_MARGIN_DEG: f64 = 1.0;

/// Default box when no prior zones exist: the tropical belt, wide enough
/// that any subsequent evidence lands inside the grid.
pub const DEFAULT_BOUNDS: (f64, f64, f64, f64) = (-180.0, 180.0, -30.0, 30.0);

pub mod interpolation {
    /// Background density assigned to mesh cells far from every sample.
    /// Keeps the prior strictly positive so evidence can never be
    /// multiplied against a hard zero at the domain edges.
    pub const FILL_PROBABILITY: f64 = 0.1;
    /// Characteristic radius of the background pseudo-sample, as a
    /// fraction of the bounds diagonal.
    pub const BACKGROUND_RADIUS_FRACTION: f64 = 0.1;
    /// Softening term in the inverse-square Shepard weights.
    pub const DISTANCE_EPSILON: f64 = 1e-6;
}

pub mod kernel {
    /// Confidence floor for the sigma formulas, so a zero-confidence
    /// report cannot produce an infinite spread.
    pub const MIN_CONFIDENCE: f64 = 1e-3;

    pub const DEBRIS_SIGMA_BASE: f64 = 0.1;
    pub const SIGNAL_SIGMA_BASE: f64 = 0.2;
    pub const SIGHTING_SIGMA_BASE: f64 = 0.3;
    /// Negative evidence uses a fixed spread: the searched radius does not
    /// shrink with reporter confidence.
    pub const NEGATIVE_SIGMA: f64 = 0.1;
}

pub mod extraction {
    /// Confidence levels, as fractions of the grid's own maximum.
    pub const CONTOUR_LEVELS: [f64; 4] = [0.95, 0.75, 0.50, 0.25];
    /// Half-widths (degrees) of the concentric rectangles emitted by the
    /// simplified fallback, matched to CONTOUR_LEVELS by rank.
    pub const FALLBACK_HALF_WIDTHS: [f64; 4] = [0.1, 0.2, 0.3, 0.4];
    pub const SIMPLIFIED_METHOD: &str = "simplified_rectangular";
}

/// Below this, the summed prior-times-likelihood mass counts as "no
/// overlap" and the update degrades to the unmodified prior.
pub const EVIDENCE_PROBABILITY_FLOOR: f64 = 1e-12;

/// Round-off tolerance accepted on a normalized grid.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;
