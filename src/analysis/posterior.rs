use {
    crate::config::constants::EVIDENCE_PROBABILITY_FLOOR,
    crate::models::ProbabilityGrid,
    anyhow::{Result, bail},
};

/// Result of applying Bayes' rule on the grids.
#[derive(Debug, Clone)]
pub(crate) enum PosteriorOutcome {
    Updated(ProbabilityGrid),
    /// The likelihood and the prior share no mass inside the grid:
    /// the evidence taught us nothing representable here, so the caller
    /// keeps the prior as-is.
    NoOverlap,
}

/// Cell-wise `prior * likelihood`, renormalized by the total evidence
/// probability. A (near-)zero evidence probability is reported as
/// `NoOverlap` rather than producing an all-zero, unnormalizable grid.
pub(crate) fn combine(
    prior: &ProbabilityGrid,
    likelihood: &ProbabilityGrid,
) -> Result<PosteriorOutcome> {
    if prior.width() != likelihood.width() || prior.height() != likelihood.height() {
        bail!(
            "Grid shape mismatch: prior {}x{} vs likelihood {}x{}",
            prior.height(),
            prior.width(),
            likelihood.height(),
            likelihood.width()
        );
    }

    let mut cells: Vec<f64> = prior
        .cells()
        .iter()
        .zip(likelihood.cells())
        .map(|(p, l)| p * l)
        .collect();

    let evidence_probability: f64 = cells.iter().sum();
    if !evidence_probability.is_finite() || evidence_probability < EVIDENCE_PROBABILITY_FLOOR {
        log::warn!(
            "Evidence probability is {evidence_probability:.3e}, keeping prior unchanged"
        );
        return Ok(PosteriorOutcome::NoOverlap);
    }

    for cell in &mut cells {
        *cell /= evidence_probability;
    }

    let posterior =
        ProbabilityGrid::from_cells(prior.lons().to_vec(), prior.lats().to_vec(), cells)?;
    Ok(PosteriorOutcome::Updated(posterior))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::likelihood::build_likelihood_grid;
    use crate::analysis::prior_grid::build_prior_grid;
    use crate::domain::{Bounds, Evidence, EvidenceKind, ProbabilityZone, ZoneProperties};

    fn prior_setup() -> (Vec<ProbabilityZone>, Bounds) {
        let zones = vec![ProbabilityZone::rectangle(
            [85.0, 10.0],
            5.0,
            ZoneProperties {
                probability: 1.0,
                ..Default::default()
            },
        )];
        let bounds = Bounds::from_zones(&zones);
        (zones, bounds)
    }

    #[test]
    fn posterior_is_normalized() {
        let (zones, bounds) = prior_setup();
        let prior = build_prior_grid(&zones, &bounds, 60).unwrap();
        let evidence = Evidence {
            confidence: 0.9,
            reliability: 0.8,
            ..Evidence::new(10.0, 85.0, EvidenceKind::Debris)
        };
        let likelihood = build_likelihood_grid(&evidence, &bounds, 60).unwrap();
        match combine(&prior, &likelihood).unwrap() {
            PosteriorOutcome::Updated(posterior) => {
                assert!((posterior.sum() - 1.0).abs() < 1e-6);
                assert!(posterior.cells().iter().all(|c| *c >= 0.0));
            }
            PosteriorOutcome::NoOverlap => panic!("expected an updated posterior"),
        }
    }

    #[test]
    fn debris_evidence_sharpens_the_posterior() {
        let (zones, bounds) = prior_setup();
        let prior = build_prior_grid(&zones, &bounds, 80).unwrap();
        let evidence = Evidence {
            confidence: 0.9,
            reliability: 0.8,
            ..Evidence::new(10.0, 85.0, EvidenceKind::Debris)
        };
        let likelihood = build_likelihood_grid(&evidence, &bounds, 80).unwrap();
        let PosteriorOutcome::Updated(posterior) = combine(&prior, &likelihood).unwrap() else {
            panic!("expected an updated posterior");
        };
        let about = evidence.location();
        assert!(posterior.spatial_variance_about(about) < prior.spatial_variance_about(about));
    }

    #[test]
    fn negative_evidence_suppresses_the_searched_cell() {
        let (zones, bounds) = prior_setup();
        let resolution = 81;
        let prior = build_prior_grid(&zones, &bounds, resolution).unwrap();
        let evidence = Evidence {
            confidence: 0.8,
            reliability: 0.9,
            ..Evidence::new(10.0, 85.0, EvidenceKind::Negative)
        };
        let likelihood = build_likelihood_grid(&evidence, &bounds, resolution).unwrap();
        let PosteriorOutcome::Updated(posterior) = combine(&prior, &likelihood).unwrap() else {
            panic!("expected an updated posterior");
        };

        // Center cell of the mesh sits on the searched location.
        let row = resolution / 2;
        let col = resolution / 2;
        assert!(posterior.value(row, col) < prior.value(row, col));
    }

    #[test]
    fn disjoint_evidence_reports_no_overlap() {
        let (zones, bounds) = prior_setup();
        let prior = build_prior_grid(&zones, &bounds, 50).unwrap();
        // Antipodal-ish report with full reliability: the uniform blend
        // vanishes and the kernel underflows to zero everywhere.
        let evidence = Evidence {
            reliability: 1.0,
            ..Evidence::new(-10.0, -95.0, EvidenceKind::Debris)
        };
        let likelihood = build_likelihood_grid(&evidence, &bounds, 50).unwrap();
        assert!(matches!(
            combine(&prior, &likelihood).unwrap(),
            PosteriorOutcome::NoOverlap
        ));
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let (zones, bounds) = prior_setup();
        let prior = build_prior_grid(&zones, &bounds, 40).unwrap();
        let likelihood = ProbabilityGrid::filled(&bounds, 41, 1.0);
        assert!(combine(&prior, &likelihood).is_err());
    }
}
