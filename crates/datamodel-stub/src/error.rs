use std::path::PathBuf;

/// Errors raised while generating a stub.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The crate was built without a FITS reader.
    #[error("FITS support is not available; build datamodel-stub with the `fits` feature")]
    ReaderUnavailable,
    /// No model name can be derived from the file name.
    #[error("cannot derive a model name from '{0}': no '-' or '.' in the name")]
    InvalidFilename(String),
    /// The FITS reader rejected the file.
    #[cfg(feature = "fits")]
    #[error("cannot read FITS file '{}': {source}", path.display())]
    Fits {
        path: PathBuf,
        source: fits_header::Error,
    },
    /// The template could not be parsed or rendered.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    /// Reading an input or writing an output failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
