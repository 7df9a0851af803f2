use {
    crate::config::constants::interpolation::{
        BACKGROUND_RADIUS_FRACTION, DISTANCE_EPSILON, FILL_PROBABILITY,
    },
    crate::domain::{Bounds, ProbabilityZone},
    crate::models::ProbabilityGrid,
    anyhow::Result,
};

/// Rasterize prior zones onto the mesh. Each zone contributes one sparse
/// sample (its centroid paired with `properties.probability`); the samples
/// are spread over the full mesh by `interpolate`. No zones at all means a
/// uniform prior. The result is normalized, finite and non-negative.
pub(crate) fn build_prior_grid(
    zones: &[ProbabilityZone],
    bounds: &Bounds,
    resolution: usize,
) -> Result<ProbabilityGrid> {
    let samples: Vec<([f64; 2], f64)> = zones
        .iter()
        .filter_map(|zone| {
            zone.centroid()
                .map(|center| (center, zone.properties.probability))
        })
        .collect();

    let mut grid;
    if samples.is_empty() {
        log::debug!("No scattered samples from prior zones, using uniform prior");
        grid = ProbabilityGrid::filled(bounds, resolution, 1.0);
    } else {
        let radius = (bounds.diagonal() * BACKGROUND_RADIUS_FRACTION).max(DISTANCE_EPSILON);
        let background_weight = 1.0 / (radius * radius);
        grid = ProbabilityGrid::filled(bounds, resolution, 0.0);
        grid.fill_with(|lon, lat| interpolate([lon, lat], &samples, background_weight));
        grid.clamp_non_negative();
    }

    grid.normalize()?;
    Ok(grid)
}

/// Shepard inverse-square-distance interpolation of the samples, blended
/// with a background pseudo-sample holding the fill value. On top of a
/// sample the sample value dominates; far from every sample the value
/// tends to the fill, so mesh cells beyond the sampled region never go
/// to zero or NaN.
fn interpolate(point: [f64; 2], samples: &[([f64; 2], f64)], background_weight: f64) -> f64 {
    let mut weight_sum = background_weight;
    let mut value_sum = background_weight * FILL_PROBABILITY;

    for &([x, y], value) in samples {
        let dx = point[0] - x;
        let dy = point[1] - y;
        let d2 = dx * dx + dy * dy;
        let w = 1.0 / (d2 + DISTANCE_EPSILON * DISTANCE_EPSILON);
        weight_sum += w;
        value_sum += w * value;
    }

    value_sum / weight_sum
}
