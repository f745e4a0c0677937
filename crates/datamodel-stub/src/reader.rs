//! Access to the FITS reader.
//!
//! The reader is an optional dependency behind the `fits` feature. Without
//! it the crate still builds, [`is_available`] returns `false` and
//! [`describe_file`] fails with [`Error::ReaderUnavailable`].

use std::path::Path;

use crate::error::{Error, Result};

/// What the stub needs to know about one HDU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HduDescription {
    /// Trimmed `XTENSION` value; `None` for the primary HDU.
    pub xtension: Option<String>,
    /// Trimmed `EXTNAME` value, if present.
    pub extname: Option<String>,
    /// Rendered header keywords and data description.
    pub details: Vec<String>,
}

/// Returns `true` if this build can read FITS files.
pub const fn is_available() -> bool {
    cfg!(feature = "fits")
}

#[cfg(feature = "fits")]
impl HduDescription {
    pub fn from_unit(unit: &fits_header::HeaderUnit) -> Self {
        HduDescription {
            xtension: unit.xtension().map(String::from),
            extname: unit.extname().map(String::from),
            details: crate::keywords::header_lines(unit),
        }
    }
}

/// Read the headers of every HDU in the FITS file at `path`.
#[cfg(feature = "fits")]
pub fn describe_file(path: &Path) -> Result<Vec<HduDescription>> {
    let units = fits_header::open(path).map_err(|source| Error::Fits {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("{}: {} HDUs", path.display(), units.len());
    Ok(units.iter().map(HduDescription::from_unit).collect())
}

/// Read the headers of every HDU in the FITS file at `path`.
#[cfg(not(feature = "fits"))]
pub fn describe_file(path: &Path) -> Result<Vec<HduDescription>> {
    log::error!("cannot read {}: no FITS reader in this build", path.display());
    Err(Error::ReaderUnavailable)
}
