/*!
# Point spread functions

Intensity models of the STED microscope:

- [`excitation`] - Gaussian excitation spot
- [`depletion`] - Laguerre-Gaussian donut of the depletion beam
- [`effective`] - excitation left after saturated stimulated emission depletion

All the fields are evaluated in parallel over the grid cells.
*/

use std::ops::Deref;

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::{Grid, ParameterSet};

/// Default azimuthal order of the depletion donut
pub const DEFAULT_DONUT_ORDER: u32 = 1;

/// Diffraction limited beam waist [nm]: `wavelength / (2 NA)`
pub fn beam_waist(wavelength: f64, na: f64) -> f64 {
    wavelength / (2. * na)
}

/// A 2D intensity field
#[derive(Debug, Clone, PartialEq)]
pub struct PsfField(DMatrix<f64>);
impl Deref for PsfField {
    type Target = DMatrix<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl From<DMatrix<f64>> for PsfField {
    fn from(value: DMatrix<f64>) -> Self {
        Self(value)
    }
}
impl PsfField {
    /// Maximum value of the field
    pub fn peak(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
    /// Scales the field to a peak value of 1
    ///
    /// A field without a positive peak is returned as is.
    pub fn normalized(self) -> Self {
        let peak = self.peak();
        if peak > 0. && peak.is_finite() {
            Self(self.0 / peak)
        } else {
            self
        }
    }
}

/// Applies a function of the squared radius to every cell of the `(x,y)` coordinates
fn radial<F>(x: &DMatrix<f64>, y: &DMatrix<f64>, f: F) -> PsfField
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    assert_eq!(
        x.shape(),
        y.shape(),
        "x and y coordinates must have the same shape"
    );
    let (nrows, ncols) = x.shape();
    let data: Vec<f64> = x
        .as_slice()
        .par_iter()
        .zip(y.as_slice().par_iter())
        .map(|(x, y)| f(x * x + y * y))
        .collect();
    PsfField(DMatrix::from_vec(nrows, ncols, data))
}

/// Gaussian excitation PSF: `exp(-r²/w0²)`
///
/// The peak is 1 on the optical axis and the intensity falls to 1/e at `r = w0`.
pub fn excitation(x: &DMatrix<f64>, y: &DMatrix<f64>, w0: f64) -> PsfField {
    let w2 = w0 * w0;
    radial(x, y, |r2| (-r2 / w2).exp())
}

/// Laguerre-Gaussian donut PSF: `(r²/w²)^m exp(-r²/w²)`
///
/// The donut is dark on the optical axis for `m ≥ 1`, larger `m` widen the dark center.
pub fn depletion(x: &DMatrix<f64>, y: &DMatrix<f64>, w: f64, m: u32) -> PsfField {
    let w2 = w * w;
    radial(x, y, |r2| {
        let u = r2 / w2;
        u.powi(m as i32) * (-u).exp()
    })
}

/// Effective PSF after saturated depletion: `exc exp(-I0_sted depl / I_s)`
pub fn effective(exc: &PsfField, depl: &PsfField, i_s: f64, i0_sted: f64) -> PsfField {
    assert_eq!(
        exc.shape(),
        depl.shape(),
        "excitation and depletion fields must have the same shape"
    );
    let (nrows, ncols) = exc.shape();
    let data: Vec<f64> = exc
        .as_slice()
        .par_iter()
        .zip(depl.as_slice().par_iter())
        .map(|(e, d)| e * (-i0_sted * d / i_s).exp())
        .collect();
    PsfField(DMatrix::from_vec(nrows, ncols, data))
}

/// The three normalized PSFs of a simulation
#[derive(Debug, Clone, PartialEq)]
pub struct PsfFields {
    pub excitation: PsfField,
    pub depletion: PsfField,
    pub effective: PsfField,
}
impl PsfFields {
    /// Computes the PSFs on the grid
    ///
    /// The effective PSF is derived from the unnormalized excitation and donut fields,
    /// the three fields are normalized afterwards.
    pub fn compute(params: &ParameterSet, grid: &Grid) -> Self {
        let w_exc = beam_waist(params.lambda_exc(), params.na());
        let w_sted = beam_waist(params.lambda_sted(), params.na());
        let exc = excitation(grid.x(), grid.y(), w_exc);
        let depl = depletion(grid.x(), grid.y(), w_sted, DEFAULT_DONUT_ORDER);
        let eff = effective(&exc, &depl, params.i_s(), params.i0_sted());
        Self {
            excitation: exc.normalized(),
            depletion: depl.normalized(),
            effective: eff.normalized(),
        }
    }
    /// Iterator over the named fields
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PsfField)> {
        [
            ("excitation", &self.excitation),
            ("depletion", &self.depletion),
            ("effective", &self.effective),
        ]
        .into_iter()
    }
}
