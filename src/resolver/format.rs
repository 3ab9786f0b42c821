//! Positional template substitution (`{0}`, `{1,8}`, `{2:F2}`).
//!
//! Formatting never consults the host locale: numbers use `.` as the decimal
//! point and `,` for digit grouping.

use std::fmt::{
    self,
    Display,
    Write as _,
};

use thiserror::Error;

/// Largest accepted alignment width.
const MAX_ALIGNMENT: u32 = 1_000_000;

/// Largest accepted precision in a format specifier.
const MAX_PRECISION: usize = 99;

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text, inserted as-is.
    Str(String),
    Int(i64),
    UInt(u64),
    /// Rendered with `.` as the decimal point; infinities print as `Infinity`.
    Float(f64),
    /// Rendered as `true` / `false`.
    Bool(bool),
}

impl Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) if n.is_infinite() => {
                f.write_str(if n.is_sign_negative() { "-Infinity" } else { "Infinity" })
            }
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for FormatArg {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::UInt)
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Why a template could not be formatted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("Unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),

    #[error("Invalid placeholder '{{{0}}}'")]
    InvalidPlaceholder(String),

    #[error("Placeholder index {index} is out of range for {count} arguments")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Format specifier '{spec}' cannot be applied to {arg:?}")]
    UnsupportedSpecifier { spec: String, arg: FormatArg },
}

/// Builds the marker shown for a missing key: `<key>`.
#[must_use]
pub fn missing_marker(key: &str) -> String {
    format!("<{key}>")
}

/// Builds the marker shown for a missing key looked up with arguments:
/// `<key, [arg0], [arg1]>`.
#[must_use]
pub fn missing_marker_with_args(key: &str, args: &[FormatArg]) -> String {
    let mut marker = format!("<{key}");
    for arg in args {
        let _ = write!(marker, ", [{arg}]");
    }
    marker.push('>');
    marker
}

/// Substitutes `args` into `template`.
///
/// Supports `{index}`, `{index,alignment}`, `{index:spec}` and the `{{` / `}}`
/// escapes. Specifiers: `D<n>`, `F<n>`, `N<n>`, `X<n>` / `x<n>`; text and
/// booleans ignore them.
///
/// # Examples
/// ```
/// use runtime_localization::resolver::{FormatArg, format_template};
///
/// let args = [FormatArg::from("World"), FormatArg::from(3)];
/// assert_eq!(format_template("Hello {0} x{1:D2}", &args).as_deref(), Ok("Hello World x03"));
/// ```
pub fn format_template(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => output.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => output.push('}'),
            '}' => return Err(FormatError::UnmatchedBrace(offset)),
            '{' => {
                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => {
                            return Err(FormatError::UnclosedPlaceholder(offset));
                        }
                        Some((_, inner)) => body.push(inner),
                    }
                }
                let placeholder = Placeholder::parse(&body)?;
                placeholder.write(&mut output, args)?;
            }
            _ => output.push(c),
        }
    }

    Ok(output)
}

/// A parsed `{index[,alignment][:spec]}` item.
#[derive(Debug, PartialEq, Eq)]
struct Placeholder<'a> {
    /// Argument index.
    index: usize,
    /// Positive pads on the left, negative pads on the right.
    alignment: Option<i32>,
    /// Text after the `:`.
    spec: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Parses the text between the braces.
    fn parse(body: &'a str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidPlaceholder(body.to_string());

        let (head, spec) = match body.split_once(':') {
            Some((head, spec)) => (head, Some(spec)),
            None => (body, None),
        };
        let (index, alignment) = match head.split_once(',') {
            Some((index, alignment)) => {
                let alignment: i32 = alignment.trim().parse().map_err(|_| invalid())?;
                if alignment.unsigned_abs() > MAX_ALIGNMENT {
                    return Err(invalid());
                }
                (index, Some(alignment))
            }
            None => (head, None),
        };

        let index = index.trim_end();
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = index.parse().map_err(|_| invalid())?;

        Ok(Self { index, alignment, spec })
    }

    /// Formats the referenced argument into `output`.
    fn write(&self, output: &mut String, args: &[FormatArg]) -> Result<(), FormatError> {
        let arg = args
            .get(self.index)
            .ok_or(FormatError::IndexOutOfRange { index: self.index, count: args.len() })?;

        let text = match self.spec {
            Some(spec) if !spec.is_empty() => apply_specifier(arg, spec)?,
            _ => arg.to_string(),
        };

        match self.alignment {
            Some(alignment) => {
                let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
                if alignment < 0 {
                    let _ = write!(output, "{text:<width$}");
                } else {
                    let _ = write!(output, "{text:>width$}");
                }
            }
            None => output.push_str(&text),
        }
        Ok(())
    }
}

/// Applies a standard numeric format specifier.
fn apply_specifier(arg: &FormatArg, spec: &str) -> Result<String, FormatError> {
    let unsupported =
        || FormatError::UnsupportedSpecifier { spec: spec.to_string(), arg: arg.clone() };

    if matches!(arg, FormatArg::Str(_) | FormatArg::Bool(_)) {
        return Ok(arg.to_string());
    }

    let mut spec_chars = spec.chars();
    let kind = spec_chars.next().ok_or_else(unsupported)?;
    let digits = spec_chars.as_str();
    let precision = if digits.is_empty() {
        None
    } else if digits.bytes().all(|b| b.is_ascii_digit()) {
        let precision: usize = digits.parse().map_err(|_| unsupported())?;
        if precision > MAX_PRECISION {
            return Err(unsupported());
        }
        Some(precision)
    } else {
        return Err(unsupported());
    };

    match (kind, arg) {
        ('D' | 'd', FormatArg::Int(n)) => {
            let sign = if *n < 0 { "-" } else { "" };
            Ok(format!("{sign}{:0width$}", n.unsigned_abs(), width = precision.unwrap_or(0)))
        }
        ('D' | 'd', FormatArg::UInt(n)) => Ok(format!("{n:0width$}", width = precision.unwrap_or(0))),
        ('X', FormatArg::Int(n)) => Ok(format!("{n:0width$X}", width = precision.unwrap_or(0))),
        ('X', FormatArg::UInt(n)) => Ok(format!("{n:0width$X}", width = precision.unwrap_or(0))),
        ('x', FormatArg::Int(n)) => Ok(format!("{n:0width$x}", width = precision.unwrap_or(0))),
        ('x', FormatArg::UInt(n)) => Ok(format!("{n:0width$x}", width = precision.unwrap_or(0))),
        ('F' | 'f', _) => Ok(fixed_point(arg, precision.unwrap_or(2))),
        ('N' | 'n', _) => Ok(group_thousands(&fixed_point(arg, precision.unwrap_or(2)))),
        _ => Err(unsupported()),
    }
}

/// Renders a number with exactly `precision` decimals.
fn fixed_point(arg: &FormatArg, precision: usize) -> String {
    match arg {
        FormatArg::Int(n) => integer_fixed(&n.to_string(), precision),
        FormatArg::UInt(n) => integer_fixed(&n.to_string(), precision),
        FormatArg::Float(n) if n.is_finite() => format!("{n:.precision$}"),
        _ => arg.to_string(),
    }
}

/// Appends `precision` zero decimals to an integer rendering.
fn integer_fixed(digits: &str, precision: usize) -> String {
    if precision == 0 {
        digits.to_string()
    } else {
        format!("{digits}.{}", "0".repeat(precision))
    }
}

/// Inserts `,` between thousands in the integer part of a fixed-point number.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = number.strip_prefix('-').map_or(("", number), |rest| ("-", rest));
    let (integer, fraction) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));
    if !integer.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }

    let len = integer.len();
    let mut grouped = String::with_capacity(number.len() + len / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
