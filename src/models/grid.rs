use {
    crate::domain::Bounds,
    crate::utils::planar_distance,
    anyhow::{Result, bail},
    argminmax::ArgMinMax,
    rayon::prelude::*,
};

/// Rasterized probability density over a bounded lon/lat box.
/// Cells are row-major with rows indexing latitude, columns longitude.
/// After `normalize` all cells are >= 0 and sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityGrid {
    lons: Vec<f64>,
    lats: Vec<f64>,
    cells: Vec<f64>,
}

impl ProbabilityGrid {
    /// Square mesh over `bounds`, every cell holding `value`.
    pub fn filled(bounds: &Bounds, resolution: usize, value: f64) -> Self {
        let lons = bounds.lon_axis(resolution);
        let lats = bounds.lat_axis(resolution);
        let cells = vec![value; lons.len() * lats.len()];
        Self { lons, lats, cells }
    }

    pub fn from_cells(lons: Vec<f64>, lats: Vec<f64>, cells: Vec<f64>) -> Result<Self> {
        if cells.len() != lons.len() * lats.len() {
            bail!(
                "Grid shape mismatch: {} cells for {}x{} mesh",
                cells.len(),
                lats.len(),
                lons.len()
            );
        }
        Ok(Self { lons, lats, cells })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.lons.len()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.lats.len()
    }

    #[inline]
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    #[inline]
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.lons.len() + col]
    }

    /// Evaluate `f(lon, lat)` into every cell, rows in parallel.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(f64, f64) -> f64 + Sync,
    {
        let width = self.lons.len();
        if width == 0 || self.cells.is_empty() {
            return;
        }
        let lons = &self.lons;
        let lats = &self.lats;
        self.cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                let lat = lats[row];
                for (col, cell) in out.iter_mut().enumerate() {
                    *cell = f(lons[col], lat);
                }
            });
    }

    pub fn sum(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn max_value(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let max_index: usize = self.cells.as_slice().argmax();
        self.cells[max_index]
    }

    /// [lon, lat] of the highest-density cell.
    pub fn peak(&self) -> Option<[f64; 2]> {
        if self.cells.is_empty() {
            return None;
        }
        let max_index: usize = self.cells.as_slice().argmax();
        let row = max_index / self.lons.len();
        let col = max_index % self.lons.len();
        Some([self.lons[col], self.lats[row]])
    }

    /// Clamp negatives to zero. Interpolation can slightly undershoot.
    pub fn clamp_non_negative(&mut self) {
        for cell in &mut self.cells {
            if *cell < 0.0 {
                *cell = 0.0;
            }
        }
    }

    /// Scale so the grid sums to 1. Fails on zero/negative total mass,
    /// which callers treat as a degradation condition, never a panic.
    pub fn normalize(&mut self) -> Result<()> {
        let total = self.sum();
        if !total.is_finite() || total <= 0.0 {
            bail!("Cannot normalize grid with total mass {total}");
        }
        for cell in &mut self.cells {
            *cell /= total;
        }
        Ok(())
    }

    /// Mass-weighted mean squared distance of the density about a point.
    /// Smaller means the mass is more concentrated there.
    pub fn spatial_variance_about(&self, point: [f64; 2]) -> f64 {
        let total = self.sum();
        if total <= 0.0 {
            return 0.0;
        }
        let width = self.lons.len();
        let mut acc = 0.0;
        for (idx, &p) in self.cells.iter().enumerate() {
            let cell_point = [self.lons[idx % width], self.lats[idx / width]];
            let d = planar_distance(cell_point, point);
            acc += p * d * d;
        }
        acc / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bounds() -> Bounds {
        Bounds {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 10.0,
        }
    }

    #[test]
    fn filled_grid_shape_and_sum() {
        let grid = ProbabilityGrid::filled(&test_bounds(), 20, 0.5);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 20);
        assert!((grid.sum() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_reaches_unit_mass() {
        let mut grid = ProbabilityGrid::filled(&test_bounds(), 10, 3.0);
        grid.normalize().unwrap();
        assert!((grid.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_zero_mass_fails() {
        let mut grid = ProbabilityGrid::filled(&test_bounds(), 10, 0.0);
        assert!(grid.normalize().is_err());
    }

    #[test]
    fn fill_with_sees_cell_coordinates() {
        let mut grid = ProbabilityGrid::filled(&test_bounds(), 11, 0.0);
        grid.fill_with(|lon, lat| lon + lat);
        // Corner cells: (0,0) and (10,10).
        assert!((grid.value(0, 0) - 0.0).abs() < 1e-12);
        assert!((grid.value(10, 10) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn peak_finds_the_spiked_cell() {
        let mut grid = ProbabilityGrid::filled(&test_bounds(), 11, 0.1);
        grid.fill_with(|lon, lat| {
            if (lon - 3.0).abs() < 1e-9 && (lat - 7.0).abs() < 1e-9 {
                9.0
            } else {
                0.1
            }
        });
        assert_eq!(grid.peak(), Some([3.0, 7.0]));
        assert!((grid.max_value() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn shape_mismatch_rejected() {
        assert!(ProbabilityGrid::from_cells(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0; 3]).is_err());
    }

    #[test]
    fn variance_drops_when_mass_concentrates() {
        let mut uniform = ProbabilityGrid::filled(&test_bounds(), 21, 1.0);
        uniform.normalize().unwrap();

        let mut peaked = ProbabilityGrid::filled(&test_bounds(), 21, 0.0);
        peaked.fill_with(|lon, lat| {
            let d2 = (lon - 5.0).powi(2) + (lat - 5.0).powi(2);
            (-d2 / 0.5).exp()
        });
        peaked.normalize().unwrap();

        let about = [5.0, 5.0];
        assert!(peaked.spatial_variance_about(about) < uniform.spatial_variance_about(about));
    }
}
