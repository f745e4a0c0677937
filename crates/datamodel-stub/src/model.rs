//! Names and labels derived from the input file.

use std::path::Path;

use crate::error::{Error, Result};

/// Derive the model name from a FITS file name.
///
/// The name is the part of the base name before the first `-`, or, when
/// there is no `-`, before the first `.`. The name may be empty when the
/// file name starts with the separator. A file name with neither is
/// rejected.
///
/// ```
/// use datamodel_stub::model::model_name;
///
/// assert_eq!(model_name("spectra-64-1234.fits").unwrap(), "spectra");
/// assert_eq!(model_name("/data/zbest.fits").unwrap(), "zbest");
/// ```
pub fn model_name(filename: &str) -> Result<&str> {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);

    base.find('-')
        .or_else(|| base.find('.'))
        .map(|end| &base[..end])
        .ok_or_else(|| Error::InvalidFilename(base.to_string()))
}

const SIZE_PREFIXES: [&str; 9] = ["", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Human-readable file size, e.g. `"12 Kbytes"`.
///
/// The size is divided by 1024 (rounding down) until it is below 1024 or the
/// largest prefix is reached.
pub fn human_file_size(bytes: u64) -> String {
    let mut size = bytes;
    let mut prefix = 0;
    while size >= 1024 && prefix < SIZE_PREFIXES.len() - 1 {
        size /= 1024;
        prefix += 1;
    }
    format!("{size} {}bytes", SIZE_PREFIXES[prefix])
}

/// Label for HDU `index` in a file with `count` HDUs.
///
/// The index is zero-padded so that all labels in a file have the same
/// width: `HDU3`, `HDU03` once there are more than 9 HDUs, `HDU003` once
/// there are more than 99.
pub fn hdu_label(index: usize, count: usize) -> String {
    let width = match count {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    };
    format!("HDU{index:0width$}")
}
