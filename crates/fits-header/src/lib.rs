//! Header-only FITS reader.
//!
//! Walks every Header Data Unit of a FITS stream, parsing the header cards
//! and skipping over the data segments without decoding them.

pub mod block;
pub mod error;
pub mod hdu;
pub mod header;
pub mod value;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub use block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
pub use error::{Error, Result};
pub use hdu::{HeaderReader, HeaderUnit, MAX_TFIELDS};
pub use header::{Card, Header};
pub use value::Value;

/// Read the headers of every HDU in `reader`, in file order.
pub fn read_header_units<R: Read + Seek>(reader: R) -> Result<Vec<HeaderUnit>> {
    HeaderReader::new(reader)?.collect()
}

/// Open the FITS file at `path` and read the headers of all of its HDUs.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Vec<HeaderUnit>> {
    let file = File::open(path.as_ref())?;
    log::debug!("reading FITS headers from {}", path.as_ref().display());
    read_header_units(BufReader::new(file))
}
