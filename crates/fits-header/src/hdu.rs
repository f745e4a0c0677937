use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::block::{padded_byte_len, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::header::{parse_block, Header};

/// Largest number of fields a table extension may declare.
pub const MAX_TFIELDS: usize = 999;

/// The header of one Header Data Unit, plus where it sits in the stream.
#[derive(Debug, Clone)]
pub struct HeaderUnit {
    /// Position of this HDU in the file; the primary HDU is 0.
    pub index: usize,
    /// Parsed header cards, without the END card.
    pub header: Header,
    /// Byte offset where the header begins.
    pub header_start: u64,
    /// Byte offset where the data segment begins.
    pub data_start: u64,
    /// Length of the data segment in bytes, without block padding.
    pub data_len: u64,
}

impl HeaderUnit {
    /// Returns `true` for the primary HDU.
    pub fn is_primary(&self) -> bool {
        self.index == 0
    }

    /// The trimmed `XTENSION` value; `None` for the primary HDU.
    pub fn xtension(&self) -> Option<&str> {
        self.header.string("XTENSION")
    }

    /// The trimmed `EXTNAME` value, if the HDU is named.
    pub fn extname(&self) -> Option<&str> {
        self.header.string("EXTNAME")
    }
}

/// Size of the data segment described by `header`, in bytes.
///
/// Follows the FITS size formula
/// `|BITPIX|/8 * GCOUNT * (PCOUNT + NAXIS1 * ... * NAXISn)`, where the
/// primary HDU has `PCOUNT = 0`, `GCOUNT = 1` unless it holds random groups
/// (`GROUPS = T`, `NAXIS1 = 0`), in which case `NAXIS1` is left out of the
/// product.
pub fn data_byte_len(header: &Header, is_primary: bool) -> Result<u64> {
    let bitpix = header.required_integer("BITPIX")?;
    let axes = header.axes()?;
    if axes.is_empty() {
        return Ok(0);
    }

    let random_groups = is_primary && axes[0] == 0 && header.logical("GROUPS") == Some(true);
    let (dims, pcount, gcount) = if random_groups {
        (&axes[1..], header.required_integer("PCOUNT")?, header.required_integer("GCOUNT")?)
    } else if is_primary {
        (&axes[..], 0, 1)
    } else {
        (
            &axes[..],
            header.integer("PCOUNT").unwrap_or(0),
            header.integer("GCOUNT").unwrap_or(1),
        )
    };

    let pcount = u64::try_from(pcount).map_err(|_| Error::InvalidHeader("negative PCOUNT"))?;
    let gcount = u64::try_from(gcount).map_err(|_| Error::InvalidHeader("negative GCOUNT"))?;
    let bytes_per_value = bitpix.unsigned_abs() / 8;

    let overflow = Error::InvalidHeader("data size overflow");
    let elements = dims
        .iter()
        .try_fold(1u64, |acc, &d| acc.checked_mul(d))
        .and_then(|n| n.checked_add(pcount))
        .and_then(|n| n.checked_mul(gcount))
        .and_then(|n| n.checked_mul(bytes_per_value));
    elements.ok_or(overflow)
}

/// Streams the HDU headers of a FITS file one at a time.
///
/// Header blocks are read and parsed; data segments are skipped with a seek,
/// so the cost is proportional to header size rather than file size.
#[derive(Debug)]
pub struct HeaderReader<R> {
    inner: R,
    stream_len: u64,
    offset: u64,
    index: usize,
    finished: bool,
}

impl<R: Read + Seek> HeaderReader<R> {
    /// Wrap a seekable stream positioned anywhere; reading starts at byte 0.
    pub fn new(mut inner: R) -> Result<Self> {
        let stream_len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(HeaderReader {
            inner,
            stream_len,
            offset: 0,
            index: 0,
            finished: false,
        })
    }

    /// Fill `block` from the stream, returning how many bytes were read.
    fn read_block(&mut self, block: &mut [u8; BLOCK_SIZE]) -> Result<usize> {
        let mut filled = 0;
        while filled < BLOCK_SIZE {
            match self.inner.read(&mut block[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Read the next HDU header, or `None` once the stream is exhausted.
    ///
    /// A clean end of stream at a block boundary ends the file. After the
    /// primary HDU, a trailing fragment shorter than one block is ignored.
    pub fn next_unit(&mut self) -> Result<Option<HeaderUnit>> {
        if self.finished {
            return Ok(None);
        }

        let header_start = self.offset;
        let mut block = [0u8; BLOCK_SIZE];
        let mut cards = Vec::new();
        loop {
            let filled = self.read_block(&mut block)?;
            let at_header_start = cards.is_empty();
            if filled < BLOCK_SIZE {
                self.finished = true;
                if at_header_start && self.index > 0 {
                    if filled > 0 {
                        log::debug!("ignoring {filled} trailing bytes after last HDU");
                    }
                    return Ok(None);
                }
                return Err(Error::UnexpectedEof);
            }
            self.offset += BLOCK_SIZE as u64;
            if parse_block(&block, &mut cards)? {
                break;
            }
        }

        let header = Header::from_cards(cards);
        let is_primary = self.index == 0;
        check_first_keyword(&header, is_primary)?;
        if !is_primary {
            check_table_fields(&header)?;
        }

        let data_start = self.offset;
        let data_len = data_byte_len(&header, is_primary)?;
        let in_bounds = data_start
            .checked_add(data_len)
            .is_some_and(|end| end <= self.stream_len);
        if !in_bounds {
            self.finished = true;
            return Err(Error::UnexpectedEof);
        }

        // The final block of the last HDU is sometimes left unpadded.
        self.offset = data_start
            .saturating_add(padded_byte_len(data_len))
            .min(self.stream_len);
        self.inner.seek(SeekFrom::Start(self.offset))?;

        let unit = HeaderUnit {
            index: self.index,
            header,
            header_start,
            data_start,
            data_len,
        };
        log::debug!(
            "HDU {}: {} cards, {} data bytes at offset {}",
            unit.index,
            unit.header.len(),
            unit.data_len,
            unit.data_start
        );
        self.index += 1;
        Ok(Some(unit))
    }
}

fn check_first_keyword(header: &Header, is_primary: bool) -> Result<()> {
    let first = header.cards().first().map(|c| c.keyword_str());
    if is_primary {
        match (first, header.logical("SIMPLE")) {
            (Some("SIMPLE"), Some(true)) => Ok(()),
            _ => Err(Error::NotPrimary),
        }
    } else if first == Some("XTENSION") && header.string("XTENSION").is_some() {
        Ok(())
    } else {
        Err(Error::MissingKeyword(String::from("XTENSION")))
    }
}

fn check_table_fields(header: &Header) -> Result<()> {
    if !matches!(header.string("XTENSION"), Some("BINTABLE" | "TABLE")) {
        return Ok(());
    }
    match header.integer("TFIELDS") {
        Some(n) if !(0..=MAX_TFIELDS as i64).contains(&n) => {
            Err(Error::InvalidHeader("TFIELDS out of range"))
        }
        _ => Ok(()),
    }
}

impl<R: Read + Seek> Iterator for HeaderReader<R> {
    type Item = Result<HeaderUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_unit() {
            Ok(Some(unit)) => Some(Ok(unit)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
