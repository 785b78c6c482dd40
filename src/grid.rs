//! Sampling grid of the simulation field

use nalgebra::DMatrix;

use crate::ParameterSet;

/// Square grid of `(x,y)` coordinates [nm] centered on the optical axis
///
/// `x` varies along the columns and `y` along the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axis: Vec<f64>,
    x: DMatrix<f64>,
    y: DMatrix<f64>,
}
impl Grid {
    /// Samples `[-extent_nm/2, extent_nm/2]` with `grid_size` evenly spaced values along both axes
    pub fn new(extent_nm: f64, grid_size: usize) -> Self {
        let half = extent_nm / 2.;
        let axis: Vec<f64> = match grid_size {
            0 => vec![],
            1 => vec![-half],
            n => {
                let step = extent_nm / (n - 1) as f64;
                (0..n)
                    .map(|k| if k == n - 1 { half } else { -half + k as f64 * step })
                    .collect()
            }
        };
        let x = DMatrix::from_fn(grid_size, grid_size, |_, j| axis[j]);
        let y = DMatrix::from_fn(grid_size, grid_size, |i, _| axis[i]);
        Self { axis, x, y }
    }
    /// Number of samples per axis
    pub fn size(&self) -> usize {
        self.axis.len()
    }
    /// The 1D axis shared by `x` and `y`
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }
    /// Distance between consecutive samples [nm]
    pub fn spacing(&self) -> Option<f64> {
        match self.axis.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }
    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }
    pub fn y(&self) -> &DMatrix<f64> {
        &self.y
    }
}
impl From<&ParameterSet> for Grid {
    fn from(params: &ParameterSet) -> Self {
        Self::new(params.extent_nm(), params.grid_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_bounds() {
        let grid = Grid::new(1000., 500);
        assert_eq!(grid.size(), 500);
        assert_eq!(grid.axis()[0], -500.);
        assert_eq!(grid.axis()[499], 500.);
        assert!((grid.spacing().unwrap() - 1000. / 499.).abs() < 1e-12);
    }

    #[test]
    fn coordinates_layout() {
        let grid = Grid::new(1000., 1001);
        assert_eq!(grid.x().shape(), (1001, 1001));
        assert_eq!(grid.y().shape(), (1001, 1001));
        assert_eq!(grid.axis()[500], 0.);
        assert_eq!(grid.x()[(3, 600)], 100.);
        assert_eq!(grid.y()[(600, 3)], 100.);
        assert_eq!(grid.x()[(0, 0)], grid.y()[(0, 0)]);
    }

    #[test]
    fn symmetric_axis() {
        let grid = Grid::new(750., 256);
        let axis = grid.axis();
        axis.iter()
            .zip(axis.iter().rev())
            .for_each(|(a, b)| assert!((a + b).abs() < 1e-9));
    }

    #[test]
    fn single_sample() {
        let grid = Grid::new(500., 1);
        assert_eq!(grid.axis(), &[-250.]);
        assert_eq!(grid.spacing(), None);
    }
}
