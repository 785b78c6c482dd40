//! Microscope parameters and their validity ranges

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The simulation parameters, in validation order
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Excitation wavelength [nm]
    LambdaExc,
    /// Depletion wavelength [nm]
    LambdaSted,
    /// Numerical aperture
    NumericalAperture,
    /// Saturation intensity (normalized)
    SaturationIntensity,
    /// Peak depletion intensity (normalized)
    StedIntensity,
    /// Number of samples per axis
    GridSize,
    /// Side length of the square field [nm]
    Extent,
}
impl Parameter {
    /// Name of the parameter in the configuration file
    pub fn name(&self) -> &'static str {
        use Parameter::*;
        match self {
            LambdaExc => "lambda_exc",
            LambdaSted => "lambda_sted",
            NumericalAperture => "NA",
            SaturationIntensity => "I_s",
            StedIntensity => "I0_sted",
            GridSize => "grid_size",
            Extent => "extent_nm",
        }
    }
    /// Closed interval of valid values
    pub fn range(&self) -> (f64, f64) {
        use Parameter::*;
        match self {
            LambdaExc => (400., 700.),
            LambdaSted => (710., 850.),
            NumericalAperture => (0.5, 1.49),
            SaturationIntensity => (0.1, 5.0),
            StedIntensity => (0., 100.),
            GridSize => (256., 1000.),
            Extent => (500., 2000.),
        }
    }
    /// Valid range as shown in the error messages
    pub fn expected(&self) -> &'static str {
        use Parameter::*;
        match self {
            LambdaExc => "400–700 nm",
            LambdaSted => "710–850 nm",
            NumericalAperture => "0.5–1.49",
            SaturationIntensity => "0.1–5.0",
            StedIntensity => "0–100",
            GridSize => "256–1000",
            Extent => "500–2000",
        }
    }
    /// Checks if `value` is within the parameter range, bounds included
    pub fn contains(&self, value: f64) -> bool {
        let (lower, upper) = self.range();
        lower <= value && value <= upper
    }
}
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A parameter outside of its validity range
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Invalid {parameter} value: {value} (Expected: {})", .parameter.expected())]
pub struct RangeViolation {
    pub parameter: Parameter,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}
impl RangeViolation {
    fn new(parameter: Parameter, value: f64) -> Self {
        let (lower, upper) = parameter.range();
        Self {
            parameter,
            value,
            lower,
            upper,
        }
    }
}
type Result<T> = std::result::Result<T, RangeViolation>;

/// Parameters as read from the configuration, not yet validated
///
/// Integers are signed so that negative values are caught by the validation
/// instead of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParameters {
    pub lambda_exc: f64,
    pub lambda_sted: f64,
    #[serde(rename = "NA")]
    pub na: f64,
    #[serde(rename = "I_s")]
    pub i_s: f64,
    #[serde(rename = "I0_sted")]
    pub i0_sted: f64,
    pub grid_size: i64,
    pub extent_nm: i64,
}
impl Default for RawParameters {
    fn default() -> Self {
        Self {
            lambda_exc: 650.,
            lambda_sted: 750.,
            na: 1.3,
            i_s: 2.,
            i0_sted: 25.,
            grid_size: 500,
            extent_nm: 1000,
        }
    }
}
impl RawParameters {
    /// Returns the value of a given parameter
    pub fn value(&self, parameter: Parameter) -> f64 {
        use Parameter::*;
        match parameter {
            LambdaExc => self.lambda_exc,
            LambdaSted => self.lambda_sted,
            NumericalAperture => self.na,
            SaturationIntensity => self.i_s,
            StedIntensity => self.i0_sted,
            GridSize => self.grid_size as f64,
            Extent => self.extent_nm as f64,
        }
    }
}

/// Validated microscope and grid parameters
///
/// Every field is within its [`Parameter::range`].
/// The depletion wavelength is not required to be larger than the excitation wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    lambda_exc: f64,
    lambda_sted: f64,
    na: f64,
    i_s: f64,
    i0_sted: f64,
    grid_size: usize,
    extent_nm: f64,
}
impl ParameterSet {
    /// Validates the raw parameters
    ///
    /// Fails on the first parameter, in [`Parameter`] order, that is out of range
    pub fn validate(raw: &RawParameters) -> Result<Self> {
        if let Some(parameter) = Parameter::iter().find(|p| !p.contains(raw.value(*p))) {
            return Err(RangeViolation::new(parameter, raw.value(parameter)));
        }
        Ok(Self {
            lambda_exc: raw.lambda_exc,
            lambda_sted: raw.lambda_sted,
            na: raw.na,
            i_s: raw.i_s,
            i0_sted: raw.i0_sted,
            grid_size: raw.grid_size as usize,
            extent_nm: raw.extent_nm as f64,
        })
    }
    /// Returns a copy with a different peak depletion intensity
    pub fn with_sted_intensity(&self, i0_sted: f64) -> Result<Self> {
        let raw = RawParameters {
            i0_sted,
            ..RawParameters::from(self)
        };
        Self::validate(&raw)
    }
    /// Excitation wavelength [nm]
    pub fn lambda_exc(&self) -> f64 {
        self.lambda_exc
    }
    /// Depletion wavelength [nm]
    pub fn lambda_sted(&self) -> f64 {
        self.lambda_sted
    }
    /// Numerical aperture
    pub fn na(&self) -> f64 {
        self.na
    }
    /// Saturation intensity
    pub fn i_s(&self) -> f64 {
        self.i_s
    }
    /// Peak depletion intensity
    pub fn i0_sted(&self) -> f64 {
        self.i0_sted
    }
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }
    /// Side length of the field [nm]
    pub fn extent_nm(&self) -> f64 {
        self.extent_nm
    }
}
impl TryFrom<&RawParameters> for ParameterSet {
    type Error = RangeViolation;

    fn try_from(raw: &RawParameters) -> Result<Self> {
        Self::validate(raw)
    }
}
impl From<&ParameterSet> for RawParameters {
    fn from(params: &ParameterSet) -> Self {
        Self {
            lambda_exc: params.lambda_exc,
            lambda_sted: params.lambda_sted,
            na: params.na,
            i_s: params.i_s,
            i0_sted: params.i0_sted,
            grid_size: params.grid_size as i64,
            extent_nm: params.extent_nm as i64,
        }
    }
}
impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = RawParameters::from(self);
        for parameter in Parameter::iter() {
            writeln!(f, "  - {:12}: {}", parameter, raw.value(parameter))?;
        }
        Ok(())
    }
}
