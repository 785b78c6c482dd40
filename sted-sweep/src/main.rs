use std::path::PathBuf;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use sted_psf::{config, Grid, ParameterSet, PsfFields, ResolutionMetrics};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sted-sweep",
    about = "STED resolution versus peak depletion intensity"
)]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str), default_value(config::DEFAULT_CONFIG))]
    config: PathBuf,
    /// Smallest peak depletion intensity
    #[structopt(long, default_value = "0")]
    from: f64,
    /// Largest peak depletion intensity
    #[structopt(long, default_value = "100")]
    to: f64,
    /// Number of depletion intensities
    #[structopt(short, long, default_value = "21")]
    steps: usize,
    /// CSV output file
    #[structopt(short, long, parse(from_os_str), default_value = "sted_sweep.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct Record {
    #[serde(rename = "I0_sted")]
    i0_sted: f64,
    #[serde(rename = "FWHM excitation (nm)")]
    fwhm_exc_nm: f64,
    #[serde(rename = "FWHM effective (nm)")]
    fwhm_eff_nm: f64,
    #[serde(rename = "STED resolution (nm)")]
    sted_resolution_nm: f64,
}
impl From<(f64, ResolutionMetrics)> for Record {
    fn from((i0_sted, metrics): (f64, ResolutionMetrics)) -> Self {
        Self {
            i0_sted,
            fwhm_exc_nm: metrics.fwhm_exc_nm(),
            fwhm_eff_nm: metrics.fwhm_eff_nm(),
            sted_resolution_nm: metrics.sted_resolution_nm,
        }
    }
}

/// Evenly spaced intensities from `from` to `to`, both included
fn intensities(from: f64, to: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => vec![],
        1 => vec![from],
        n => (0..n)
            .map(|k| from + (to - from) * k as f64 / (n - 1) as f64)
            .collect(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opt = Opt::from_args();

    let raw = config::load(&opt.config)?;
    let params = ParameterSet::validate(&raw)?;
    let grid = Grid::from(&params);

    let i0_steds = intensities(opt.from, opt.to, opt.steps);
    log::info!(
        "Sweeping {} peak depletion intensities from {} to {}",
        i0_steds.len(),
        opt.from,
        opt.to
    );

    let pb = ProgressBar::new(i0_steds.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("#>-"),
    );
    let records: Vec<Record> = i0_steds
        .par_iter()
        .progress_with(pb)
        .map(|&i0_sted| -> anyhow::Result<Record> {
            let params = params.with_sted_intensity(i0_sted)?;
            let fields = PsfFields::compute(&params, &grid);
            let metrics = ResolutionMetrics::new(&params, &fields)?;
            Ok((i0_sted, metrics).into())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut wtr = csv::Writer::from_path(&opt.output)?;
    for record in &records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    log::info!("Sweep saved to {:?}", opt.output);

    Ok(())
}
