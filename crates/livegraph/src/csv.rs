//! Semicolon-separated text format for sample sequences.
//!
//! One sample per line, `x;y`, each value written with at most
//! [`DECIMAL_DIGITS`] fractional digits and trailing zeros removed:
//!
//! ```text
//! 1;2
//! 2.5;-0.33333
//! ```
//!
//! Encoding is lossy beyond five decimal places: a decoded value differs from
//! the written value by at most `0.5e-5`.
//!
//! Decoding never fails. A line with the wrong number of fields or a value
//! that is not a number decodes to [`DataPoint::ZERO`]; use
//! [`decode_with_report`] to find out which lines were substituted.

use super::types::DataPoint;
use livegraph_core::profiling::profile_function;
use std::fmt::{self, Write};

/// Field separator.
pub const SEPARATOR: char = ';';

/// Maximum number of fractional digits written.
pub const DECIMAL_DIGITS: usize = 5;

/// Format a number with at most [`DECIMAL_DIGITS`] fractional digits.
///
/// Trailing zeros and a trailing decimal point are dropped and negative zero
/// is written as `0`. Non-finite values use Rust's spelling (`NaN`, `inf`,
/// `-inf`), which [`decode`] reads back.
pub fn format_value(value: f64) -> String {
    let mut text = format!("{:.*}", DECIMAL_DIGITS, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Encode samples, one `x;y\n` line each.
pub fn encode<'a, I>(points: I) -> String
where
    I: IntoIterator<Item = &'a DataPoint>,
{
    profile_function!();

    let mut out = String::new();
    for point in points {
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}{}{}",
            format_value(point.x),
            SEPARATOR,
            format_value(point.y)
        );
    }
    out
}

/// Why a line was replaced with the zero sample.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// The line did not split into exactly two fields.
    FieldCount(usize),
    /// A field did not parse as a number.
    NotANumber(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::FieldCount(n) => write!(f, "expected 2 fields, found {}", n),
            MalformedReason::NotANumber(field) => write!(f, "'{}' is not a number", field),
        }
    }
}

/// A line that decoded to the zero sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// 1-based line number in the input
    pub line: usize,
    /// Index of the substituted sample in the decoded output
    pub index: usize,
    /// The offending line
    pub content: String,
    pub reason: MalformedReason,
}

/// Decoded samples plus every substitution that was made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub points: Vec<DataPoint>,
    pub malformed: Vec<MalformedRecord>,
}

impl DecodeReport {
    /// Whether every non-empty line decoded cleanly.
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Decode text, substituting the zero sample for malformed lines.
pub fn decode(text: &str) -> Vec<DataPoint> {
    decode_with_report(text).points
}

/// Decode text and report substituted lines.
///
/// Each malformed line is also logged at warn level.
pub fn decode_with_report(text: &str) -> DecodeReport {
    profile_function!();

    let mut report = DecodeReport::default();
    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(point) => report.points.push(point),
            Err(reason) => {
                tracing::warn!(
                    "Malformed CSV record on line {} ({}): {:?}",
                    line_idx + 1,
                    reason,
                    line
                );
                report.malformed.push(MalformedRecord {
                    line: line_idx + 1,
                    index: report.points.len(),
                    content: line.to_string(),
                    reason,
                });
                report.points.push(DataPoint::ZERO);
            }
        }
    }
    report
}

fn parse_line(line: &str) -> Result<DataPoint, MalformedReason> {
    let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
    let [x, y] = fields.as_slice() else {
        return Err(MalformedReason::FieldCount(fields.len()));
    };
    Ok(DataPoint::new(parse_value(x)?, parse_value(y)?))
}

fn parse_value(field: &str) -> Result<f64, MalformedReason> {
    field
        .parse::<f64>()
        .map_err(|_| MalformedReason::NotANumber(field.to_string()))
}
