/*!
# STED PSF

Model of the point spread function (PSF) of a STED (Stimulated Emission Depletion)
microscope and of the resolution it achieves.

The simulation is a pipeline of pure functions:

- [`ParameterSet`] - validated optical and grid parameters
- [`Grid`] - `(x,y)` coordinates [nm] of the simulation field
- [`PsfFields`] - excitation, depletion (donut) and effective PSFs, normalized to a peak of 1
- [`ResolutionMetrics`] - Abbe limit and FWHM of the confocal and STED PSFs

## Usage

```rust,no_run
use sted_psf::{config, report::LogReporter};

let raw = config::load("config.toml")?;
let simulation = sted_psf::run_with(&raw, &LogReporter)?;
println!(
    "FWHM: {:.1}nm -> {:.1}nm",
    simulation.metrics.fwhm_exc_nm(),
    simulation.metrics.fwhm_eff_nm()
);
# Ok::<(), sted_psf::Error>(())
```
*/

pub mod config;
mod error;
pub mod export;
mod grid;
mod params;
#[cfg(feature = "plot")]
pub mod plot;
pub mod psf;
pub mod report;
pub mod resolution;

pub use error::Error;
pub use grid::Grid;
pub use params::{Parameter, ParameterSet, RangeViolation, RawParameters};
pub use psf::{PsfField, PsfFields};
pub use resolution::{ResolutionError, ResolutionMetrics};

use report::{NullReporter, Reporter};

type Result<T> = std::result::Result<T, Error>;

/// Results of a simulation run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub params: ParameterSet,
    pub grid: Grid,
    pub fields: PsfFields,
    pub metrics: ResolutionMetrics,
}

/// Runs the simulation without reporting
pub fn run(raw: &RawParameters) -> Result<Simulation> {
    run_with(raw, &NullReporter)
}

/// Runs the simulation, handing the results over to `reporter`
///
/// Nothing is computed if the parameters are invalid.
pub fn run_with(raw: &RawParameters, reporter: &dyn Reporter) -> Result<Simulation> {
    let params = ParameterSet::validate(raw)?;
    reporter.parameters(&params);
    let grid = Grid::from(&params);
    let fields = PsfFields::compute(&params, &grid);
    let metrics = ResolutionMetrics::new(&params, &fields)?;
    reporter.beam_waists(metrics.excitation_waist_nm, metrics.depletion_waist_nm);
    reporter.metrics(&metrics);
    Ok(Simulation {
        params,
        grid,
        fields,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);
    impl Reporter for Recorder {
        fn parameters(&self, _params: &ParameterSet) {
            self.0.borrow_mut().push("parameters".into());
        }
        fn beam_waists(&self, excitation_nm: f64, depletion_nm: f64) {
            self.0
                .borrow_mut()
                .push(format!("waists {excitation_nm:.2} {depletion_nm:.2}"));
        }
        fn metrics(&self, _metrics: &ResolutionMetrics) {
            self.0.borrow_mut().push("metrics".into());
        }
    }

    #[test]
    fn reference_simulation() {
        let simulation = run(&RawParameters::default()).unwrap();
        let Simulation {
            fields, metrics, ..
        } = &simulation;
        for (name, field) in fields.iter() {
            assert_eq!(field.shape(), (500, 500), "{name}");
            assert!((field.peak() - 1.).abs() < 1e-12, "{name}");
        }
        assert_eq!(metrics.abbe_limit_nm, 250.);
        assert_eq!(metrics.pixel_size_nm, 2.);
        assert!(metrics.fwhm_exc > 0 && metrics.fwhm_exc < 500);
        assert!(metrics.fwhm_eff > 0 && metrics.fwhm_eff < 500);
        assert!(metrics.fwhm_eff <= metrics.fwhm_exc);
        assert!(metrics.fwhm_eff_nm() < metrics.abbe_limit_nm);
    }

    #[test]
    fn depletion_narrows_the_psf() {
        let widths: Vec<usize> = [0., 10., 50., 100.]
            .into_iter()
            .map(|i0_sted| {
                run(&RawParameters {
                    i0_sted,
                    grid_size: 300,
                    ..Default::default()
                })
                .unwrap()
                .metrics
                .fwhm_eff
            })
            .collect();
        widths.windows(2).for_each(|w| assert!(w[1] <= w[0]));
        assert!(widths[3] < widths[0]);
    }

    #[test]
    fn no_depletion() {
        let simulation = run(&RawParameters {
            i0_sted: 0.,
            grid_size: 256,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(simulation.fields.effective, simulation.fields.excitation);
        assert_eq!(simulation.metrics.fwhm_eff, simulation.metrics.fwhm_exc);
    }

    #[test]
    fn invalid_parameters_are_not_reported() {
        let recorder = Recorder::default();
        let err = run_with(
            &RawParameters {
                grid_size: 1200,
                ..Default::default()
            },
            &recorder,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Parameters(RangeViolation {
                parameter: Parameter::GridSize,
                ..
            })
        ));
        assert_eq!(err.to_string(), "Invalid grid_size value: 1200 (Expected: 256–1000)");
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn reporting() {
        let recorder = Recorder::default();
        run_with(
            &RawParameters {
                grid_size: 256,
                ..Default::default()
            },
            &recorder,
        )
        .unwrap();
        assert_eq!(
            *recorder.0.borrow(),
            vec!["parameters", "waists 250.00 288.46", "metrics"]
        );
    }
}
