//! Resolution metrics derived from the PSFs

use nalgebra::DMatrix;
use serde::Serialize;

use crate::{psf, ParameterSet, PsfFields};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("resolution is undefined for an empty or all-zero field")]
    UndefinedResolution,
}
type Result<T> = std::result::Result<T, ResolutionError>;

/// Abbe diffraction limit [nm]: `wavelength / (2 NA)`
pub fn diffraction_limit(wavelength: f64, na: f64) -> f64 {
    psf::beam_waist(wavelength, na)
}

/// Analytical STED resolution [nm]: `wavelength / (2 NA sqrt(1 + I0_sted/I_s))`
pub fn sted_resolution(wavelength: f64, na: f64, i_s: f64, i0_sted: f64) -> f64 {
    diffraction_limit(wavelength, na) / (1. + i0_sted / i_s).sqrt()
}

/// Full width at half maximum of a field along its rows, in grid units
///
/// The width is the span between the first and the last row holding a value
/// larger or equal to half the field maximum.
/// Fields that are empty or without a positive maximum have no resolution.
pub fn fwhm(field: &DMatrix<f64>) -> Result<usize> {
    let peak = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() || peak <= 0. {
        return Err(ResolutionError::UndefinedResolution);
    }
    let half_max = peak / 2.;
    let (first, last) = field
        .row_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&value| value >= half_max))
        .fold((usize::MAX, 0), |(first, last), (i, _)| {
            (first.min(i), last.max(i))
        });
    Ok(last - first)
}

/// Resolution of the confocal and STED PSFs
///
/// FWHMs are given in grid units, the `*_nm` methods convert them using
/// a pixel size of `extent_nm / grid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolutionMetrics {
    /// Excitation beam waist [nm]
    pub excitation_waist_nm: f64,
    /// Depletion beam waist [nm]
    pub depletion_waist_nm: f64,
    /// Abbe diffraction limit [nm]
    pub abbe_limit_nm: f64,
    /// Excitation PSF FWHM [px]
    pub fwhm_exc: usize,
    /// Effective PSF FWHM [px]
    pub fwhm_eff: usize,
    /// Grid pixel size [nm]: `extent_nm / grid_size`
    pub pixel_size_nm: f64,
    /// Analytical STED resolution [nm]
    pub sted_resolution_nm: f64,
}
impl ResolutionMetrics {
    pub fn new(params: &ParameterSet, fields: &PsfFields) -> Result<Self> {
        let (lambda_exc, lambda_sted, na) = (params.lambda_exc(), params.lambda_sted(), params.na());
        Ok(Self {
            excitation_waist_nm: psf::beam_waist(lambda_exc, na),
            depletion_waist_nm: psf::beam_waist(lambda_sted, na),
            abbe_limit_nm: diffraction_limit(lambda_exc, na),
            fwhm_exc: fwhm(&fields.excitation)?,
            fwhm_eff: fwhm(&fields.effective)?,
            pixel_size_nm: params.extent_nm() / params.grid_size() as f64,
            sted_resolution_nm: sted_resolution(lambda_exc, na, params.i_s(), params.i0_sted()),
        })
    }
    /// Excitation PSF FWHM [nm]
    pub fn fwhm_exc_nm(&self) -> f64 {
        self.fwhm_exc as f64 * self.pixel_size_nm
    }
    /// Effective PSF FWHM [nm]
    pub fn fwhm_eff_nm(&self) -> f64 {
        self.fwhm_eff as f64 * self.pixel_size_nm
    }
}
