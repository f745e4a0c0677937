//! FITS header card parsing and the per-HDU [`Header`] collection.

use std::str;

use crate::block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE, HEADER_PAD_BYTE};
use crate::error::{Error, Result};
use crate::value::{format_value, parse_value, Value};

// ── Cards ──

/// A parsed FITS header card (one 80-byte keyword record).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// The 8-byte keyword name, ASCII, left-justified, space-padded.
    pub keyword: [u8; 8],
    /// The parsed value, if this card has a value indicator (`= ` in bytes 8..10).
    pub value: Option<Value>,
    /// An optional comment string. For commentary cards this is the free text.
    pub comment: Option<String>,
}

impl Card {
    /// Build a valued card; the keyword is truncated to eight bytes.
    pub fn new(keyword: &str, value: Value) -> Self {
        Card {
            keyword: pad_keyword(keyword),
            value: Some(value),
            comment: None,
        }
    }

    /// Attach a comment to this card.
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(String::from(comment));
        self
    }

    /// Return the keyword as a trimmed string.
    pub fn keyword_str(&self) -> &str {
        let end = self
            .keyword
            .iter()
            .rposition(|&b| b != b' ')
            .map_or(0, |i| i + 1);
        str::from_utf8(&self.keyword[..end]).unwrap_or("")
    }

    /// Returns `true` if this card is the END keyword.
    pub fn is_end(&self) -> bool {
        &self.keyword == b"END     "
    }

    /// Returns `true` for COMMENT, HISTORY and blank-keyword cards.
    pub fn is_commentary(&self) -> bool {
        is_commentary_keyword(&self.keyword)
    }
}

/// Pad a keyword name to 8 bytes with trailing ASCII spaces.
fn pad_keyword(name: &str) -> [u8; 8] {
    let mut buf = [b' '; 8];
    let bytes = name.as_bytes();
    let len = bytes.len().min(8);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

const COMMENTARY_KEYWORDS: [&[u8; 8]; 3] = [b"COMMENT ", b"HISTORY ", b"        "];

fn is_commentary_keyword(keyword: &[u8; 8]) -> bool {
    COMMENTARY_KEYWORDS.contains(&keyword)
}

fn free_text(bytes: &[u8]) -> Result<Option<String>> {
    let text = str::from_utf8(bytes)
        .map_err(|_| Error::InvalidHeader("non-ASCII text in header card"))?
        .trim();
    Ok((!text.is_empty()).then(|| String::from(text)))
}

/// Parse a single 80-byte FITS header card.
pub fn parse_card(record: &[u8; CARD_SIZE]) -> Result<Card> {
    let mut keyword = [b' '; 8];
    keyword.copy_from_slice(&record[..8]);

    if !keyword
        .iter()
        .all(|b| matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b' ' | b'-' | b'_'))
    {
        return Err(Error::InvalidKeyword(
            String::from_utf8_lossy(&keyword).trim_end().to_string(),
        ));
    }

    let mut card = Card {
        keyword,
        value: None,
        comment: None,
    };

    if card.is_end() {
        return Ok(card);
    }

    let has_value_indicator = &record[8..10] == b"= ";
    if is_commentary_keyword(&keyword) || !has_value_indicator {
        card.comment = free_text(&record[8..])?;
        return Ok(card);
    }

    let field = &record[10..];
    match parse_value(field) {
        Some((value, comment)) => {
            card.value = Some(value);
            card.comment = comment.map(String::from);
        }
        None => {
            // Undefined value; keep whatever follows the separator.
            let text = free_text(field)?;
            card.comment = text
                .as_deref()
                .and_then(|t| t.strip_prefix('/'))
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());
        }
    }
    Ok(card)
}

/// Parse every card of one 2880-byte header block.
///
/// Parsing stops after the END card; the returned flag reports whether it was
/// seen.
pub fn parse_block(block: &[u8; BLOCK_SIZE], cards: &mut Vec<Card>) -> Result<bool> {
    for record in block.chunks_exact(CARD_SIZE) {
        let record: &[u8; CARD_SIZE] = record
            .try_into()
            .map_err(|_| Error::InvalidHeader("short header card"))?;
        let card = parse_card(record)?;
        let is_end = card.is_end();
        cards.push(card);
        if is_end {
            return Ok(true);
        }
    }
    Ok(false)
}

// ── Header ──

/// The ordered cards of one HDU header.
///
/// Lookups return the first card with a matching keyword; the END card is
/// never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    /// Build a header from cards, dropping any END card.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let cards = cards.into_iter().filter(|c| !c.is_end()).collect();
        Header { cards }
    }

    /// All cards, in header order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over the cards in header order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The first card carrying `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.keyword_str() == keyword)
    }

    /// The value of `keyword`, if present and defined.
    pub fn value(&self, keyword: &str) -> Option<&Value> {
        self.get(keyword).and_then(|c| c.value.as_ref())
    }

    /// The trimmed string value of `keyword`.
    pub fn string(&self, keyword: &str) -> Option<&str> {
        self.value(keyword).and_then(Value::as_str).map(str::trim)
    }

    /// The integer value of `keyword`.
    pub fn integer(&self, keyword: &str) -> Option<i64> {
        self.value(keyword).and_then(Value::as_integer)
    }

    /// The numeric value of `keyword`, accepting integers and floats.
    pub fn float(&self, keyword: &str) -> Option<f64> {
        self.value(keyword).and_then(Value::as_float)
    }

    /// The logical value of `keyword`.
    pub fn logical(&self, keyword: &str) -> Option<bool> {
        self.value(keyword).and_then(Value::as_logical)
    }

    /// The integer value of a mandatory keyword.
    pub fn required_integer(&self, keyword: &str) -> Result<i64> {
        self.integer(keyword)
            .ok_or_else(|| Error::MissingKeyword(String::from(keyword)))
    }

    /// The axis lengths `NAXIS1..NAXISn`.
    pub fn axes(&self) -> Result<Vec<u64>> {
        let naxis = self.required_integer("NAXIS")?;
        let naxis = u32::try_from(naxis).map_err(|_| Error::InvalidHeader("negative NAXIS"))?;
        (1..=naxis)
            .map(|i| {
                let len = self.required_integer(&format!("NAXIS{i}"))?;
                u64::try_from(len).map_err(|_| Error::InvalidHeader("negative axis length"))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

// ── Writing ──

/// Serialize a [`Card`] into an 80-byte card image.
pub fn format_card(card: &Card) -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..8].copy_from_slice(&card.keyword);

    match &card.value {
        Some(value) => {
            buf[8] = b'=';
            buf[10..].copy_from_slice(&format_value(value));
            if let Some(comment) = &card.comment {
                let used = buf.iter().rposition(|&b| b != b' ').map_or(10, |i| i + 1);
                let text = format!(" / {comment}");
                let len = text.len().min(CARD_SIZE - used);
                buf[used..used + len].copy_from_slice(&text.as_bytes()[..len]);
            }
        }
        None => {
            if let Some(text) = &card.comment {
                let len = text.len().min(CARD_SIZE - 8);
                buf[8..8 + len].copy_from_slice(&text.as_bytes()[..len]);
            }
        }
    }
    buf
}

/// Serialize cards into complete header blocks, appending END and padding
/// the final block with blanks.
pub fn serialize_header(cards: &[Card]) -> Vec<u8> {
    let total_blocks = (cards.len() + 1).div_ceil(CARDS_PER_BLOCK);
    let mut buf = vec![HEADER_PAD_BYTE; total_blocks * BLOCK_SIZE];

    for (i, card) in cards.iter().enumerate() {
        let offset = i * CARD_SIZE;
        buf[offset..offset + CARD_SIZE].copy_from_slice(&format_card(card));
    }
    let end = cards.len() * CARD_SIZE;
    buf[end..end + 3].copy_from_slice(b"END");
    buf
}
