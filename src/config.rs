//! Loading of the simulation parameters
//!
//! The parameters are read from the `[settings]` table of a TOML file:
//! ```toml
//! [settings]
//! lambda_exc = 650.0
//! lambda_sted = 750.0
//! NA = 1.3
//! I_s = 2.0
//! I0_sted = 25.0
//! grid_size = 500
//! extent_nm = 1000
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::RawParameters;

/// Default configuration file
pub const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read the configuration file {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
    #[error("failed to parse the configuration")]
    Toml(#[from] toml::de::Error),
}
type Result<T> = std::result::Result<T, LoadError>;

#[derive(Deserialize)]
struct ConfigFile {
    settings: RawParameters,
}

/// Parses the parameters from the contents of a configuration file
pub fn parse(contents: &str) -> Result<RawParameters> {
    let config: ConfigFile = toml::from_str(contents)?;
    Ok(config.settings)
}

/// Loads the parameters from a configuration file
pub fn load<P: AsRef<Path>>(path: P) -> Result<RawParameters> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).map_err(|e| LoadError::Io(e, path.to_path_buf()))?;
    parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[settings]
lambda_exc = 650.0
lambda_sted = 750.0
NA = 1.3
I_s = 2
I0_sted = 25
grid_size = 500
extent_nm = 1000
"#;

    #[test]
    fn parse_settings() {
        let raw = parse(CONFIG).unwrap();
        assert_eq!(raw, RawParameters::default());
    }

    #[test]
    fn missing_parameter() {
        let contents = CONFIG.replace("NA = 1.3\n", "");
        assert!(matches!(parse(&contents), Err(LoadError::Toml(_))));
    }

    #[test]
    fn non_numeric_parameter() {
        let contents = CONFIG.replace("grid_size = 500", r#"grid_size = "large""#);
        assert!(matches!(parse(&contents), Err(LoadError::Toml(_))));
    }

    #[test]
    fn fractional_grid_size() {
        let contents = CONFIG.replace("grid_size = 500", "grid_size = 500.5");
        assert!(parse(&contents).is_err());
    }

    #[test]
    fn missing_section() {
        assert!(parse("lambda_exc = 650.0").is_err());
    }

    #[test]
    fn out_of_range_values_are_loaded() {
        let contents = CONFIG.replace("extent_nm = 1000", "extent_nm = -3");
        let raw = parse(&contents).unwrap();
        assert_eq!(raw.extent_nm, -3);
    }

    #[test]
    fn load_file() {
        let path = std::env::temp_dir().join("sted-psf_load_file.toml");
        fs::write(&path, CONFIG).unwrap();
        let raw = load(&path).unwrap();
        assert_eq!(raw.grid_size, 500);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let err = load("/nonexistent/sted-psf/config.toml").unwrap_err();
        assert!(matches!(err, LoadError::Io(_, _)));
    }
}
