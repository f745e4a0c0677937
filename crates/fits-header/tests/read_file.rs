//! Reads synthetic FITS files from disk through the public API.

use std::fs;

use fits_header::block::padded_byte_len;
use fits_header::header::serialize_header;
use fits_header::{open, Card, Error, Value};

fn write_hdu(out: &mut Vec<u8>, cards: &[Card], data_bytes: u64) {
    out.extend_from_slice(&serialize_header(cards));
    let len = out.len() + padded_byte_len(data_bytes) as usize;
    out.resize(len, 0);
}

fn image_extension(extname: &str, dims: &[i64]) -> Vec<Card> {
    let mut cards = vec![
        Card::new("XTENSION", Value::String(String::from("IMAGE"))),
        Card::new("BITPIX", Value::Integer(-32)),
        Card::new("NAXIS", Value::Integer(dims.len() as i64)),
    ];
    for (i, &d) in dims.iter().enumerate() {
        cards.push(Card::new(&format!("NAXIS{}", i + 1), Value::Integer(d)));
    }
    cards.push(Card::new("PCOUNT", Value::Integer(0)));
    cards.push(Card::new("GCOUNT", Value::Integer(1)));
    cards.push(
        Card::new("EXTNAME", Value::String(String::from(extname))).with_comment("extension name"),
    );
    cards
}

#[test]
fn open_multi_extension_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame-b0-00001234.fits");

    let mut bytes = Vec::new();
    write_hdu(
        &mut bytes,
        &[
            Card::new("SIMPLE", Value::Logical(true)),
            Card::new("BITPIX", Value::Integer(8)),
            Card::new("NAXIS", Value::Integer(0)),
            Card::new("EXPTIME", Value::Float(900.0)).with_comment("seconds"),
        ],
        0,
    );
    write_hdu(&mut bytes, &image_extension("FLUX", &[64, 32]), 64 * 32 * 4);
    write_hdu(&mut bytes, &image_extension("IVAR", &[64, 32]), 64 * 32 * 4);
    fs::write(&path, &bytes).unwrap();

    let units = open(&path).unwrap();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0].header.float("EXPTIME"), Some(900.0));
    assert_eq!(
        units[0].header.get("EXPTIME").unwrap().comment.as_deref(),
        Some("seconds")
    );

    let names: Vec<_> = units.iter().map(|u| u.extname()).collect();
    assert_eq!(names, vec![None, Some("FLUX"), Some("IVAR")]);
    assert_eq!(units[2].header.axes().unwrap(), vec![64, 32]);
}

#[test]
fn open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = open(dir.path().join("absent.fits")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
