use std::{
    fs::{create_dir_all, File},
    io,
    path::PathBuf,
};

use anyhow::Context;
use sted_psf::{
    config,
    export::NPZ_FILE,
    report::{LogReporter, Tee},
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "sted-psf", about = "STED microscope PSF & resolution model")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str), default_value(config::DEFAULT_CONFIG))]
    config: PathBuf,
    /// Directory where the results are written
    #[structopt(short, long, parse(from_os_str), default_value = "Output")]
    output: PathBuf,
    /// Save the normalized PSFs to a npz file
    #[structopt(long)]
    npz: bool,
    /// Also write the log to this file
    #[structopt(long, parse(from_os_str))]
    log: Option<PathBuf>,
    /// Plot the PSFs and the FWHM comparison
    #[cfg(feature = "plot")]
    #[structopt(short, long)]
    plot: bool,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = &opt.log {
        let file =
            File::create(path).with_context(|| format!("failed to create log file {:?}", path))?;
        logger.target(env_logger::Target::Pipe(Box::new(Tee(io::stderr(), file))));
    }
    logger.init();

    let raw = config::load(&opt.config)?;
    let simulation = sted_psf::run_with(&raw, &LogReporter)?;

    create_dir_all(&opt.output)
        .with_context(|| format!("failed to create output directory {:?}", opt.output))?;

    if opt.npz {
        let path = opt.output.join(NPZ_FILE);
        simulation.fields.to_npz(&path)?;
        log::info!("PSFs saved to {:?}", path);
    }

    #[cfg(feature = "plot")]
    if opt.plot {
        use sted_psf::plot::{FWHM_COMPARISON, PSF_COMPARISON};
        let path = opt.output.join(PSF_COMPARISON);
        simulation.plot_psfs(&path)?;
        log::info!("PSFs plot saved to {:?}", path);
        let path = opt.output.join(FWHM_COMPARISON);
        simulation.plot_fwhm(&path)?;
        log::info!("FWHM plot saved to {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opt = Opt::from_iter(["sted-psf"]);
        assert_eq!(opt.config, PathBuf::from(config::DEFAULT_CONFIG));
        assert_eq!(opt.output, PathBuf::from("Output"));
        assert!(!opt.npz);
        assert_eq!(opt.log, None);
    }

    #[test]
    fn log_file_option() {
        let opt = Opt::from_iter(["sted-psf", "--log", "log.txt"]);
        assert_eq!(opt.log, Some(PathBuf::from("log.txt")));
    }
}
