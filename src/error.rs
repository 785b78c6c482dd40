use crate::{
    config::LoadError, export::ExportError, params::RangeViolation, resolution::ResolutionError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `config` module")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parameters(#[from] RangeViolation),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("Error in the `export` module")]
    Export(#[from] ExportError),
    #[cfg(feature = "plot")]
    #[error("Error in the `plot` module")]
    Plot(#[from] crate::plot::PlotError),
}
