use std::fmt;
use std::str;

/// Width of the value field of a card (bytes 10..80).
pub const VALUE_FIELD_SIZE: usize = 70;

/// A parsed FITS header value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// FITS logical value (`T` or `F`).
    Logical(bool),
    /// FITS integer value.
    Integer(i64),
    /// FITS floating-point value.
    Float(f64),
    /// FITS character string (content between single quotes, trailing
    /// blanks removed).
    String(String),
    /// FITS complex integer `(real, imaginary)`.
    ComplexInt(i64, i64),
    /// FITS complex float `(real, imaginary)`.
    ComplexFloat(f64, f64),
}

impl Value {
    /// Short name of the value's type as it appears in data model tables.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Logical(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::ComplexInt(..) | Value::ComplexFloat(..) => "complex",
        }
    }

    /// Returns the string content if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value of an integer or float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the flag if this is a logical value.
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            Value::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Logical(b) => f.write_str(if *b { "T" } else { "F" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::String(s) => f.write_str(s),
            Value::ComplexInt(re, im) => write!(f, "({re}, {im})"),
            Value::ComplexFloat(re, im) => {
                write!(f, "({}, {})", format_float(*re), format_float(*im))
            }
        }
    }
}

/// Render a float so that it always reads back as a float: integral values
/// keep a `.0`, very large or very small magnitudes use exponent notation.
fn format_float(x: f64) -> String {
    let magnitude = x.abs();
    if x != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format!("{x:E}")
    } else if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

/// Position of the first ` /` comment separator in `field`, if any.
///
/// The FITS standard uses ` / ` but files written by IDL and friends often
/// drop the trailing space, so only ` /` is required.
fn comment_separator(field: &[u8]) -> Option<usize> {
    field.windows(2).position(|w| w == b" /")
}

/// Extract the comment text following a ` /` separator at `sep`.
fn comment_after(field: &[u8], sep: usize) -> Option<&str> {
    let mut start = sep + 2;
    if field.get(start) == Some(&b' ') {
        start += 1;
    }
    str::from_utf8(&field[start..])
        .ok()
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
}

/// Split a non-string value field into `(value_part, comment)`.
fn split_comment(field: &[u8]) -> (&[u8], Option<&str>) {
    match comment_separator(field) {
        Some(sep) => (&field[..sep], comment_after(field, sep)),
        None => (field, None),
    }
}

/// Parse a quoted string starting at `field[0] == b'\''`.
///
/// Doubled quotes (`''`) inside the string are a literal quote. An
/// unterminated string is accepted up to the end of the field.
fn parse_string(field: &[u8]) -> (Value, Option<&str>) {
    let mut text = String::new();
    let mut i = 1;
    while i < field.len() {
        match field[i] {
            b'\'' if field.get(i + 1) == Some(&b'\'') => {
                text.push('\'');
                i += 2;
            }
            b'\'' => {
                i += 1;
                break;
            }
            b => {
                text.push(b as char);
                i += 1;
            }
        }
    }

    let remainder = &field[i.min(field.len())..];
    let comment = comment_separator(remainder).and_then(|sep| comment_after(remainder, sep));
    (Value::String(text.trim_end().to_string()), comment)
}

/// Parse a float string, handling FITS `D` exponent notation.
fn parse_float_str(s: &str) -> Option<f64> {
    s.replace(['D', 'd'], "E").parse::<f64>().ok()
}

fn looks_integral(s: &str) -> bool {
    !s.contains(['.', 'E', 'e', 'D', 'd'])
}

/// Parse a complex value `(real, imag)`.
fn parse_complex(text: &str) -> Option<Value> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let (left, right) = inner.split_once(',')?;
    let (left, right) = (left.trim(), right.trim());

    if looks_integral(left) && looks_integral(right) {
        if let (Ok(re), Ok(im)) = (left.parse::<i64>(), right.parse::<i64>()) {
            return Some(Value::ComplexInt(re, im));
        }
    }
    Some(Value::ComplexFloat(
        parse_float_str(left)?,
        parse_float_str(right)?,
    ))
}

/// Parse the 70-byte value field of a card (bytes 10..80).
///
/// Returns the parsed [`Value`] and the optional comment, or `None` when the
/// field holds no recognizable value (an "undefined" keyword).
pub fn parse_value(field: &[u8]) -> Option<(Value, Option<&str>)> {
    let leading = field.iter().position(|&b| b != b' ')?;
    if field[leading] == b'\'' {
        return Some(parse_string(&field[leading..]));
    }

    let (value_part, comment) = split_comment(field);
    let text = str::from_utf8(value_part).ok()?.trim();
    let value = match text {
        "" => return None,
        "T" => Value::Logical(true),
        "F" => Value::Logical(false),
        _ if text.starts_with('(') => parse_complex(text)?,
        _ if looks_integral(text) => match text.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            // Integers too wide for i64 still carry a numeric value.
            Err(_) => Value::Float(parse_float_str(text)?),
        },
        _ => Value::Float(parse_float_str(text)?),
    };
    Some((value, comment))
}

/// Serialize a [`Value`] into a fixed-format value field.
///
/// Numeric and logical values are right-justified to column 30 of the card;
/// strings start with a quote at column 11 and are padded to at least eight
/// characters.
pub fn format_value(value: &Value) -> [u8; VALUE_FIELD_SIZE] {
    let mut buf = [b' '; VALUE_FIELD_SIZE];
    let text = match value {
        Value::String(s) => {
            let escaped = s.replace('\'', "''");
            format!("'{escaped:<8}'")
        }
        other => format!("{:>20}", other.to_string()),
    };
    let len = text.len().min(VALUE_FIELD_SIZE);
    buf[..len].copy_from_slice(&text.as_bytes()[..len]);
    buf
}
