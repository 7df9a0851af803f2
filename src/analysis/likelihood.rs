use {
    crate::config::constants::kernel::{
        DEBRIS_SIGMA_BASE, MIN_CONFIDENCE, NEGATIVE_SIGMA, SIGHTING_SIGMA_BASE, SIGNAL_SIGMA_BASE,
    },
    crate::domain::{Bounds, Evidence, EvidenceKind},
    crate::models::ProbabilityGrid,
    crate::utils::planar_distance,
    anyhow::Result,
    statrs::distribution::{Continuous, Normal},
};

/// Spatial kernel of one report: how strongly it favors (or, for a
/// negative search result, disfavors) locations near the report.
#[derive(Debug, Clone)]
pub(crate) struct Kernel {
    shape: Shape,
    normal: Normal,
    peak_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Peak,
    Dip,
}

impl Kernel {
    /// One construction arm per evidence kind; the match is exhaustive,
    /// so a new kind cannot silently default to a uniform likelihood.
    pub(crate) fn for_evidence(evidence: &Evidence) -> Result<Self> {
        let confidence = evidence.confidence.clamp(0.0, 1.0).max(MIN_CONFIDENCE);
        match evidence.kind {
            EvidenceKind::Debris => Self::peak(DEBRIS_SIGMA_BASE / confidence),
            EvidenceKind::Signal => Self::peak(SIGNAL_SIGMA_BASE / confidence),
            EvidenceKind::Sighting => Self::peak(SIGHTING_SIGMA_BASE / confidence),
            EvidenceKind::Negative => Self::dip(NEGATIVE_SIGMA),
        }
    }

    fn peak(sigma: f64) -> Result<Self> {
        let normal = Normal::new(0.0, sigma)?;
        Ok(Self {
            shape: Shape::Peak,
            peak_density: normal.pdf(0.0),
            normal,
        })
    }

    fn dip(sigma: f64) -> Result<Self> {
        let normal = Normal::new(0.0, sigma)?;
        Ok(Self {
            shape: Shape::Dip,
            peak_density: normal.pdf(0.0),
            normal,
        })
    }

    /// Kernel value at planar distance `d`, scaled so a peak tops out at
    /// 1 (and a dip bottoms out at 0) right on the evidence point.
    pub(crate) fn evaluate(&self, d: f64) -> f64 {
        let gaussian = self.normal.pdf(d) / self.peak_density;
        match self.shape {
            Shape::Peak => gaussian,
            Shape::Dip => 1.0 - gaussian,
        }
    }
}

/// Likelihood of the evidence over the mesh: the kind-specific kernel
/// blended with a uniform field by reliability, so a low-trust report
/// only weakly perturbs the prior. Normalized to sum 1; when the kernel
/// carries no mass anywhere on the grid (report far outside the box) the
/// all-zero grid is returned as-is and the combiner treats it as the
/// no-overlap condition.
pub(crate) fn build_likelihood_grid(
    evidence: &Evidence,
    bounds: &Bounds,
    resolution: usize,
) -> Result<ProbabilityGrid> {
    let kernel = Kernel::for_evidence(evidence)?;
    let reliability = evidence.reliability.clamp(0.0, 1.0);
    let location = evidence.location();

    let mut grid = ProbabilityGrid::filled(bounds, resolution, 0.0);
    grid.fill_with(|lon, lat| {
        let d = planar_distance([lon, lat], location);
        reliability * kernel.evaluate(d) + (1.0 - reliability)
    });

    if let Err(err) = grid.normalize() {
        log::debug!("Likelihood carries no mass on the grid: {err}");
    }
    Ok(grid)
}
