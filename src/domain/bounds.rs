use {
    crate::config::constants::{BOUNDS_MARGIN_FRACTION, DEFAULT_BOUNDS, DEGENERATE_AXIS_MARGIN_DEG},
    crate::domain::ProbabilityZone,
    crate::utils::linspace,
    itertools::Itertools,
};

/// Padded geographic box the grids are sampled over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Scan every vertex of every zone polygon and pad each axis by 10%
    /// of its span (fixed padding for a zero-span axis). With no usable
    /// vertices at all, falls back to the default wide box. Never fails.
    pub fn from_zones(zones: &[ProbabilityZone]) -> Self {
        let vertices: Vec<[f64; 2]> = zones
            .iter()
            .filter_map(|zone| zone.exterior_ring())
            .flatten()
            .copied()
            .collect();

        let lon_minmax = vertices.iter().map(|v| v[0]).minmax().into_option();
        let lat_minmax = vertices.iter().map(|v| v[1]).minmax().into_option();

        let (Some((lon_min, lon_max)), Some((lat_min, lat_max))) = (lon_minmax, lat_minmax) else {
            log::debug!("No prior zone vertices, using default bounds");
            return Self::default_box();
        };

        let (min_lon, max_lon) = pad_axis(lon_min, lon_max);
        let (min_lat, max_lat) = pad_axis(lat_min, lat_max);
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Wide default used when there is no prior at all.
    pub fn default_box() -> Self {
        let (min_lon, max_lon, min_lat, max_lat) = DEFAULT_BOUNDS;
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    pub fn lon_axis(&self, resolution: usize) -> Vec<f64> {
        linspace(self.min_lon, self.max_lon, resolution)
    }

    pub fn lat_axis(&self, resolution: usize) -> Vec<f64> {
        linspace(self.min_lat, self.max_lat, resolution)
    }

    /// Diagonal length in degree space; scales the interpolation background.
    pub fn diagonal(&self) -> f64 {
        let dx = self.max_lon - self.min_lon;
        let dy = self.max_lat - self.min_lat;
        (dx * dx + dy * dy).sqrt()
    }
}

fn pad_axis(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let margin = if span > f64::EPSILON {
        span * BOUNDS_MARGIN_FRACTION
    } else {
        DEGENERATE_AXIS_MARGIN_DEG
    };
    (min - margin, max + margin)
}
