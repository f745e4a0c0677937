//! Render an HDU header as the body of a data model section.

use fits_header::{Card, Header, HeaderUnit, MAX_TFIELDS};

use crate::table::Table;

/// Keywords already shown in the section heading or the contents table.
const STRUCTURAL_KEYWORDS: [&str; 2] = ["XTENSION", "EXTNAME"];

/// Per-column keywords rendered in the column table instead.
const COLUMN_KEYWORD_PREFIXES: [&str; 3] = ["TTYPE", "TFORM", "TUNIT"];

const KEYWORDS_TITLE: &str = "Required Header Keywords";
const COLUMNS_TITLE: &str = "Required Data Table Columns";

/// Lines describing `unit`: the keyword table followed by a description of
/// the data (image type and shape, or the table columns).
///
/// Every block ends with a blank line so that sections can be joined
/// directly.
pub fn header_lines(unit: &HeaderUnit) -> Vec<String> {
    let kind = DataKind::of(unit);
    let mut lines = keyword_lines(&unit.header, kind);
    match kind {
        DataKind::Image => lines.extend(image_lines(&unit.header)),
        DataKind::BinaryTable | DataKind::AsciiTable => {
            lines.extend(column_lines(&unit.header, kind))
        }
        DataKind::Other => {}
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataKind {
    Image,
    BinaryTable,
    AsciiTable,
    Other,
}

impl DataKind {
    fn of(unit: &HeaderUnit) -> Self {
        if unit.is_primary() {
            return DataKind::Image;
        }
        match unit.xtension() {
            Some("IMAGE") => DataKind::Image,
            Some("BINTABLE") => DataKind::BinaryTable,
            Some("TABLE") => DataKind::AsciiTable,
            _ => DataKind::Other,
        }
    }

    fn is_table(self) -> bool {
        matches!(self, DataKind::BinaryTable | DataKind::AsciiTable)
    }
}

fn is_column_keyword(keyword: &str) -> bool {
    COLUMN_KEYWORD_PREFIXES.iter().any(|prefix| {
        keyword.strip_prefix(prefix).is_some_and(|n| {
            !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())
        })
    })
}

fn is_listed(card: &Card, kind: DataKind) -> bool {
    let keyword = card.keyword_str();
    !(card.is_end()
        || card.is_commentary()
        || STRUCTURAL_KEYWORDS.contains(&keyword)
        || (kind.is_table() && is_column_keyword(keyword)))
}

fn subsection(title: &str, table: Vec<String>) -> Vec<String> {
    let mut lines = vec![
        title.to_string(),
        "~".repeat(title.len()),
        String::new(),
    ];
    lines.extend(table);
    lines.push(String::new());
    lines
}

fn keyword_lines(header: &Header, kind: DataKind) -> Vec<String> {
    let mut table = Table::new(["KEY", "Example Value", "Type", "Comment"]);
    for card in header.iter().filter(|c| is_listed(c, kind)) {
        let (value, type_name) = match &card.value {
            Some(v) => (v.to_string(), v.type_name()),
            None => (String::new(), ""),
        };
        table.push([
            card.keyword_str().to_string(),
            value,
            type_name.to_string(),
            card.comment.clone().unwrap_or_default(),
        ]);
    }
    if table.is_empty() {
        return Vec::new();
    }
    subsection(KEYWORDS_TITLE, table.render())
}

/// Element type of an image HDU, taking the unsigned-integer `BZERO`
/// conventions into account.
pub fn image_type(header: &Header) -> String {
    let bzero = header.float("BZERO").unwrap_or(0.0);
    let name = match header.integer("BITPIX") {
        Some(8) if bzero == -128.0 => "int8",
        Some(8) => "uint8",
        Some(16) if bzero == 32768.0 => "uint16",
        Some(16) => "int16",
        Some(32) if bzero == 2_147_483_648.0 => "uint32",
        Some(32) => "int32",
        Some(64) => "int64",
        Some(-32) => "float32",
        Some(-64) => "float64",
        Some(other) => return format!("BITPIX={other}"),
        None => "unknown",
    };
    name.to_string()
}

fn image_lines(header: &Header) -> Vec<String> {
    let axes = header.axes().unwrap_or_default();
    let line = if axes.is_empty() {
        String::from("Empty HDU.")
    } else {
        let shape: Vec<String> = axes.iter().map(u64::to_string).collect();
        format!("Data: FITS image [{}, {}]", image_type(header), shape.join("x"))
    };
    vec![line, String::new()]
}

fn binary_element(code: char) -> Option<&'static str> {
    Some(match code {
        'L' => "bool",
        'X' => "bit",
        'B' => "uint8",
        'I' => "int16",
        'J' => "int32",
        'K' => "int64",
        'A' => "char",
        'E' => "float32",
        'D' => "float64",
        'C' => "complex64",
        'M' => "complex128",
        _ => return None,
    })
}

/// Data type of a table column from its `TFORMn` value.
///
/// Binary table formats carry a repeat count (`8E` is `float32[8]`, `20A`
/// is `char[20]`); variable-length arrays (`PE(100)`) become `float32[]`.
/// ASCII table formats are `Aw`, `Iw`, `Fw.d`, `Ew.d` and `Dw.d`. Formats
/// that cannot be decoded are returned unchanged.
pub fn column_type(tform: &str, ascii: bool) -> String {
    let tform = tform.trim();
    let digits = tform
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tform.len());
    let (repeat, rest) = tform.split_at(digits);
    let mut chars = rest.chars();
    let Some(code) = chars.next().map(|c| c.to_ascii_uppercase()) else {
        return tform.to_string();
    };

    if ascii {
        let width: String = chars.take_while(char::is_ascii_digit).collect();
        return match code {
            'A' => format!("char[{width}]"),
            'I' => String::from("int32"),
            'F' | 'E' => String::from("float32"),
            'D' => String::from("float64"),
            _ => tform.to_string(),
        };
    }

    if code == 'P' || code == 'Q' {
        return match chars.next().and_then(|c| binary_element(c.to_ascii_uppercase())) {
            Some(element) => format!("{element}[]"),
            None => tform.to_string(),
        };
    }

    let Some(element) = binary_element(code) else {
        return tform.to_string();
    };
    let repeat: u64 = repeat.parse().unwrap_or(1);
    if code == 'A' || repeat > 1 {
        format!("{element}[{repeat}]")
    } else {
        element.to_string()
    }
}

fn column_lines(header: &Header, kind: DataKind) -> Vec<String> {
    let ascii = kind == DataKind::AsciiTable;
    let tfields = header
        .integer("TFIELDS")
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
        .min(MAX_TFIELDS);
    if tfields == 0 {
        return Vec::new();
    }

    let mut table = Table::new(["Name", "Type", "Units", "Description"]);
    for i in 1..=tfields {
        let name = header.string(&format!("TTYPE{i}")).unwrap_or("*unnamed*");
        let form = header
            .string(&format!("TFORM{i}"))
            .map(|f| column_type(f, ascii))
            .unwrap_or_default();
        let unit = header.string(&format!("TUNIT{i}")).unwrap_or_default();
        table.push([
            name.to_string(),
            form,
            unit.to_string(),
            String::from("label"),
        ]);
    }
    subsection(COLUMNS_TITLE, table.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fits_header::Value;

    fn card(keyword: &str, value: Value) -> Card {
        Card::new(keyword, value)
    }

    fn unit(index: usize, cards: Vec<Card>) -> HeaderUnit {
        HeaderUnit {
            index,
            header: Header::from_cards(cards),
            header_start: 0,
            data_start: 0,
            data_len: 0,
        }
    }

    fn string(s: &str) -> Value {
        Value::String(String::from(s))
    }

    fn spectra_table() -> HeaderUnit {
        unit(
            1,
            vec![
                card("XTENSION", string("BINTABLE")).with_comment("binary table extension"),
                card("BITPIX", Value::Integer(8)),
                card("NAXIS", Value::Integer(2)),
                card("NAXIS1", Value::Integer(44)),
                card("NAXIS2", Value::Integer(500)),
                card("PCOUNT", Value::Integer(0)),
                card("GCOUNT", Value::Integer(1)),
                card("TFIELDS", Value::Integer(3)),
                card("TTYPE1", string("TARGETID")),
                card("TFORM1", string("K")),
                card("TTYPE2", string("FLUX")),
                card("TFORM2", string("8E")),
                card("TUNIT2", string("erg/s/cm2/A")),
                card("TTYPE3", string("OBJTYPE")),
                card("TFORM3", string("10A")),
                card("EXTNAME", string("SPECTRA")),
            ],
        )
    }

    #[test]
    fn structural_and_column_keywords_are_skipped() {
        let lines = header_lines(&spectra_table());
        let text = lines.join("\n");
        assert!(!text.contains("XTENSION"));
        assert!(!text.contains("EXTNAME"));
        assert!(!text.contains("TTYPE1"));
        assert!(!text.contains("TFORM2"));
        assert!(text.contains("TFIELDS"));
    }

    #[test]
    fn keyword_table_layout() {
        let lines = header_lines(&spectra_table());
        assert_eq!(lines[0], "Required Header Keywords");
        assert_eq!(lines[1], "~".repeat(24));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "======= ============= ==== =======");
        assert_eq!(lines[4], "KEY     Example Value Type Comment");
        assert_eq!(lines[6], "BITPIX  8             int");
        assert_eq!(lines[12], "TFIELDS 3             int");
        assert_eq!(lines[13], lines[3]);
        assert_eq!(lines[14], "");
    }

    #[test]
    fn column_table_follows_keywords() {
        let lines = header_lines(&spectra_table());
        let start = lines
            .iter()
            .position(|l| l == "Required Data Table Columns")
            .unwrap();
        assert_eq!(lines[start + 4], "Name     Type       Units       Description");
        assert_eq!(lines[start + 6], "TARGETID int64                  label");
        assert_eq!(lines[start + 7], "FLUX     float32[8] erg/s/cm2/A label");
        assert_eq!(lines[start + 8], "OBJTYPE  char[10]               label");
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn primary_image_shape() {
        let lines = header_lines(&unit(
            0,
            vec![
                card("SIMPLE", Value::Logical(true)),
                card("BITPIX", Value::Integer(16)),
                card("NAXIS", Value::Integer(2)),
                card("NAXIS1", Value::Integer(100)),
                card("NAXIS2", Value::Integer(200)),
                card("BZERO", Value::Integer(32768)),
            ],
        ));
        assert!(lines.contains(&String::from("Data: FITS image [uint16, 100x200]")));
    }

    #[test]
    fn empty_primary_hdu() {
        let lines = header_lines(&unit(
            0,
            vec![
                card("SIMPLE", Value::Logical(true)).with_comment("conforms to FITS standard"),
                card("BITPIX", Value::Integer(8)),
                card("NAXIS", Value::Integer(0)),
                card("EXTEND", Value::Logical(true)),
            ],
        ));
        let text = lines.join("\n");
        assert!(text.contains("SIMPLE T             bool conforms to FITS standard"));
        assert!(text.contains("EXTEND T             bool"));
        assert!(text.ends_with("Empty HDU.\n"));
    }

    #[test]
    fn commentary_cards_are_not_listed() {
        let mut history = card("HISTORY", Value::Logical(true));
        history.value = None;
        history.comment = Some(String::from("created by hand"));
        let lines = header_lines(&unit(
            2,
            vec![card("XTENSION", string("FOREIGN")), history],
        ));
        assert!(lines.is_empty());
    }

    #[test]
    fn column_keywords_kept_outside_tables() {
        assert!(is_column_keyword("TTYPE12"));
        assert!(!is_column_keyword("TTYPE"));
        assert!(!is_column_keyword("TFORMAT"));
        let image = unit(1, vec![card("XTENSION", string("IMAGE")), card("TUNIT1", string("m"))]);
        assert!(header_lines(&image).join("\n").contains("TUNIT1"));
    }

    #[test]
    fn column_count_is_capped() {
        let table = unit(
            1,
            vec![
                card("XTENSION", string("BINTABLE")),
                card("TFIELDS", Value::Integer(1_000_000_000_000)),
            ],
        );
        let lines = header_lines(&table);
        let columns = lines.iter().filter(|l| l.starts_with("*unnamed*")).count();
        assert_eq!(columns, MAX_TFIELDS);
    }

    #[test]
    fn binary_column_types() {
        assert_eq!(column_type("J", false), "int32");
        assert_eq!(column_type("1D", false), "float64");
        assert_eq!(column_type("3L", false), "bool[3]");
        assert_eq!(column_type("1A", false), "char[1]");
        assert_eq!(column_type("PE(100)", false), "float32[]");
        assert_eq!(column_type("1QD(7)", false), "float64[]");
        assert_eq!(column_type("2W", false), "2W");
    }

    #[test]
    fn ascii_column_types() {
        assert_eq!(column_type("A12", true), "char[12]");
        assert_eq!(column_type("I6", true), "int32");
        assert_eq!(column_type("F8.3", true), "float32");
        assert_eq!(column_type("D25.17", true), "float64");
    }

    #[test]
    fn image_types_from_bitpix() {
        let header =
            |bitpix: i64| Header::from_cards(vec![card("BITPIX", Value::Integer(bitpix))]);
        assert_eq!(image_type(&header(8)), "uint8");
        assert_eq!(image_type(&header(32)), "int32");
        assert_eq!(image_type(&header(-64)), "float64");
        assert_eq!(image_type(&header(24)), "BITPIX=24");
    }
}
