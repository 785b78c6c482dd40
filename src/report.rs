//! Reporting of the simulation progress and results
//!
//! The pipeline never logs by itself: it hands its intermediate and final
//! results to a [`Reporter`] given by the caller.

use std::io::{self, Write};

use crate::{ParameterSet, ResolutionMetrics};

/// Receiver of the simulation results
pub trait Reporter {
    fn parameters(&self, _params: &ParameterSet) {}
    /// Excitation and depletion beam waists [nm]
    fn beam_waists(&self, _excitation_nm: f64, _depletion_nm: f64) {}
    fn metrics(&self, _metrics: &ResolutionMetrics) {}
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;
impl Reporter for NullReporter {}

/// Forwards the results to the [log] facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;
impl Reporter for LogReporter {
    fn parameters(&self, params: &ParameterSet) {
        log::info!("Loaded parameters:\n{}", params);
    }
    fn beam_waists(&self, excitation_nm: f64, depletion_nm: f64) {
        log::info!("Excitation Beam Waist (w0) = {:.2} nm", excitation_nm);
        log::info!("STED Beam Waist (w0) = {:.2} nm", depletion_nm);
    }
    fn metrics(&self, metrics: &ResolutionMetrics) {
        log::info!("Abbe Diffraction Limit: {:.2} nm", metrics.abbe_limit_nm);
        log::info!(
            "Excitation Beam FWHM: {} px ({:.2} nm)",
            metrics.fwhm_exc,
            metrics.fwhm_exc_nm()
        );
        log::info!(
            "Effective FWHM (after STED): {} px ({:.2} nm)",
            metrics.fwhm_eff,
            metrics.fwhm_eff_nm()
        );
        log::info!(
            "Analytical STED resolution: {:.2} nm",
            metrics.sted_resolution_nm
        );
    }
}

/// Log sink duplicating every record into two writers
///
/// Piped into `env_logger` to log both to the terminal and to a file.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);
impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_all(buf)?;
        self.1.write_all(buf)?;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.1.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_duplicates_records() {
        let mut tee = Tee(Vec::new(), Vec::new());
        writeln!(tee, "Abbe Diffraction Limit: {:.2} nm", 250.).unwrap();
        tee.flush().unwrap();
        let Tee(terminal, file) = tee;
        assert_eq!(terminal, b"Abbe Diffraction Limit: 250.00 nm\n");
        assert_eq!(terminal, file);
    }
}
