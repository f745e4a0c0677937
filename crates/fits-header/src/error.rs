/// All errors that can occur while reading FITS headers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed FITS header block.
    #[error("invalid FITS header: {0}")]
    InvalidHeader(&'static str),
    /// Premature end of data while reading.
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Malformed keyword name in a header card.
    #[error("invalid keyword name: {0:?}")]
    InvalidKeyword(String),
    /// A required keyword was not found in the header.
    #[error("missing required keyword: {0}")]
    MissingKeyword(String),
    /// The stream does not start with a primary header (`SIMPLE = T`).
    #[error("first HDU is not a primary header")]
    NotPrimary,
    /// An I/O error from the underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_header() {
        let e = Error::InvalidHeader("negative NAXIS");
        assert_eq!(e.to_string(), "invalid FITS header: negative NAXIS");
    }

    #[test]
    fn display_invalid_keyword() {
        let e = Error::InvalidKeyword(String::from("bad*key"));
        assert_eq!(e.to_string(), "invalid keyword name: \"bad*key\"");
    }

    #[test]
    fn display_missing_keyword() {
        let e = Error::MissingKeyword(String::from("NAXIS2"));
        assert_eq!(e.to_string(), "missing required keyword: NAXIS2");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::other("oops");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert_eq!(e.to_string(), "I/O error: oops");
    }

    #[test]
    fn std_error_source() {
        use std::error::Error as StdError;

        assert!(Error::NotPrimary.source().is_none());
        let e = Error::Io(std::io::Error::other("inner"));
        assert!(e.source().is_some());
    }
}
