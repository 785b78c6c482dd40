//! Export of the PSFs to a numpy `.npz` archive

use std::path::{Path, PathBuf};

use npyz::{npz::NpzWriter, WriterBuilder};

use crate::PsfFields;

/// Default archive name
pub const NPZ_FILE: &str = "psf_fields.npz";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write the PSFs to {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
}
type Result<T> = std::result::Result<T, ExportError>;

impl PsfFields {
    /// Writes the three fields, as row-major `[n, n]` arrays named
    /// `excitation`, `depletion` and `effective`, to a `.npz` archive
    pub fn to_npz<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let io_error = |e: std::io::Error| ExportError::Io(e, path.to_path_buf());
        let mut npz = NpzWriter::create(path).map_err(io_error)?;
        for (name, field) in self.iter() {
            let (nrows, ncols) = field.shape();
            let mut writer = npz
                .array(name, Default::default())
                .map_err(io_error)?
                .default_dtype()
                .shape(&[nrows as u64, ncols as u64])
                .begin_nd()
                .map_err(io_error)?;
            // nalgebra storage is column-major
            writer
                .extend(field.transpose().iter().copied())
                .map_err(io_error)?;
            writer.finish().map_err(io_error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, ParameterSet, RawParameters};
    use npyz::npz::NpzArchive;

    #[test]
    fn npz_roundtrip() {
        let params = ParameterSet::validate(&RawParameters {
            grid_size: 256,
            ..Default::default()
        })
        .unwrap();
        let grid = Grid::from(&params);
        let fields = PsfFields::compute(&params, &grid);
        let path = std::env::temp_dir().join("sted-psf_npz_roundtrip.npz");
        fields.to_npz(&path).unwrap();

        let mut npz = NpzArchive::open(&path).unwrap();
        let array = npz.by_name("effective").unwrap().unwrap();
        assert_eq!(array.shape(), &[256, 256]);
        let data: Vec<f64> = array.into_vec().unwrap();
        assert_eq!(data[3 * 256 + 7], fields.effective[(3, 7)]);
        std::fs::remove_file(&path).unwrap();
    }
}
