use {
    crate::analysis::{
        ContourExtractor, MarchingSquares, PosteriorOutcome, RectangularFallback,
        build_likelihood_grid, build_prior_grid, combine, extract_zones,
    },
    crate::config::constants::DEFAULT_GRID_RESOLUTION,
    crate::domain::{Bounds, Evidence, ProbabilityZone},
    crate::utils::mean_and_stddev,
    anyhow::Result,
};

/// Bayesian update engine: refines prior probability zones with one field
/// report. `P(H|E) = P(E|H) * P(H) / P(E)` over a rasterized grid, where H
/// is the crash location hypothesis and E the evidence.
///
/// Pure and synchronous: each call builds its grids fresh, holds no locks,
/// and shares nothing; concurrent calls for independent inputs need no
/// coordination.
pub struct UpdateEngine {
    grid_resolution: usize,
    extractor: Box<dyn ContourExtractor>,
    fallback: RectangularFallback,
}

impl Default for UpdateEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_RESOLUTION)
    }
}

impl UpdateEngine {
    pub fn new(grid_resolution: usize) -> Self {
        Self::with_extractor(grid_resolution, Box::new(MarchingSquares))
    }

    /// Engine with a caller-chosen contourer. Deployments without the
    /// geometric path pass `RectangularFallback` here.
    pub fn with_extractor(grid_resolution: usize, extractor: Box<dyn ContourExtractor>) -> Self {
        Self {
            grid_resolution,
            extractor,
            fallback: RectangularFallback,
        }
    }

    /// Update prior zones with one evidence report.
    ///
    /// Never fails and never panics on malformed or degenerate input: any
    /// internal error is logged and the original prior zones come back
    /// unchanged, so the caller always holds a usable zone list.
    pub fn update(
        &self,
        prior_zones: &[ProbabilityZone],
        evidence: &Evidence,
    ) -> Vec<ProbabilityZone> {
        match self.try_update(prior_zones, evidence) {
            Ok(zones) => zones,
            Err(err) => {
                log::error!("Bayesian update failed: {err:#}. Returning prior zones unchanged");
                prior_zones.to_vec()
            }
        }
    }

    fn try_update(
        &self,
        prior_zones: &[ProbabilityZone],
        evidence: &Evidence,
    ) -> Result<Vec<ProbabilityZone>> {
        let bounds = Bounds::from_zones(prior_zones);

        let prior = build_prior_grid(prior_zones, &bounds, self.grid_resolution)?;
        let likelihood = build_likelihood_grid(evidence, &bounds, self.grid_resolution)?;

        let posterior = match combine(&prior, &likelihood)? {
            PosteriorOutcome::Updated(grid) => grid,
            // The report told us nothing representable on this grid;
            // hand the caller's zones straight back.
            PosteriorOutcome::NoOverlap => return Ok(prior_zones.to_vec()),
        };

        if log::log_enabled!(log::Level::Debug) {
            let (mean, stddev) = mean_and_stddev(posterior.cells());
            log::debug!(
                "Posterior cells: mean {mean:.3e}, stddev {stddev:.3e}, max {:.3e}",
                posterior.max_value()
            );
        }

        let mut zones = extract_zones(&posterior, evidence, self.extractor.as_ref());
        if zones.is_empty() {
            log::warn!("Contour extraction produced no zones, creating simplified zones");
            zones = extract_zones(&posterior, evidence, &self.fallback);
        }

        log::info!(
            "Bayesian update completed with {} evidence ({} zones)",
            evidence.kind,
            zones.len()
        );
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EvidenceKind, ZoneProperties};

    fn prior_zone() -> ProbabilityZone {
        ProbabilityZone::polygon(
            vec![
                [70.0, -10.0],
                [100.0, -10.0],
                [100.0, 20.0],
                [70.0, 20.0],
                [70.0, -10.0],
            ],
            ZoneProperties {
                probability: 1.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn update_with_empty_prior_still_produces_zones() {
        let engine = UpdateEngine::new(60);
        let zones = engine.update(&[], &Evidence::new(10.0, 85.0, EvidenceKind::Debris));
        assert!(!zones.is_empty());
        assert!(zones.iter().all(|z| z.properties.updated_with_evidence));
    }

    #[test]
    fn disjoint_evidence_returns_prior_unchanged() {
        let engine = UpdateEngine::new(60);
        let prior = vec![prior_zone()];
        let evidence = Evidence {
            reliability: 1.0,
            ..Evidence::new(-10.0, -95.0, EvidenceKind::Debris)
        };
        let zones = engine.update(&prior, &evidence);
        assert_eq!(zones, prior);
    }

    #[test]
    fn zero_resolution_degrades_to_prior() {
        let engine = UpdateEngine::new(0);
        let prior = vec![prior_zone()];
        let zones = engine.update(&prior, &Evidence::new(10.0, 85.0, EvidenceKind::Signal));
        assert_eq!(zones, prior);
    }

    #[test]
    fn forced_fallback_yields_four_rectangles() {
        let engine = UpdateEngine::with_extractor(60, Box::new(RectangularFallback));
        let zones = engine.update(
            &[prior_zone()],
            &Evidence {
                confidence: 0.9,
                reliability: 0.8,
                ..Evidence::new(10.0, 85.0, EvidenceKind::Debris)
            },
        );
        assert_eq!(zones.len(), 4);
        assert!(
            zones
                .iter()
                .all(|z| z.properties.method.as_deref() == Some("simplified_rectangular"))
        );
    }

    #[test]
    fn zones_carry_evidence_metadata() {
        let engine = UpdateEngine::new(80);
        let evidence = Evidence {
            confidence: 0.9,
            reliability: 0.8,
            ..Evidence::new(10.0, 85.0, EvidenceKind::Debris)
        };
        let zones = engine.update(&[prior_zone()], &evidence);
        assert!(!zones.is_empty());
        for zone in &zones {
            assert!(zone.properties.updated_with_evidence);
            assert_eq!(zone.properties.evidence_type, Some(EvidenceKind::Debris));
            assert_eq!(zone.properties.confidence, Some(0.9));
        }
    }
}
