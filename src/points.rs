//! Parsing of 3D points stored one literal tuple per line, e.g. `(1.0, -2, 3e-1)`.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use nalgebra::Point3;
use tracing::{debug, info, warn};

/// Maximum number of points kept from an input when none is configured.
pub const DEFAULT_LIMIT: usize = 20_000;

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub limit: usize,
    /// Log and skip malformed lines instead of failing on the first one.
    pub skip_invalid: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions { limit: DEFAULT_LIMIT, skip_invalid: false }
    }
}

#[derive(Debug, Default)]
pub struct PointSet {
    pub points: Vec<Point3<f64>>,
    /// Malformed lines dropped in lenient mode.
    pub skipped: usize,
    /// Input had more points than the limit.
    pub truncated: bool,
}

/// Parses a single tuple literal. Accepts `(x, y, z)`, `[x, y, z]` and bare `x, y, z`,
/// with an optional trailing comma.
/// # Example
/// ```
/// use spline_plot::parse_point;
///
/// let point = parse_point("(1, -2.5, 3e-1)").unwrap();
/// assert_eq!([1.0, -2.5, 0.3], [point.x, point.y, point.z]);
/// assert!(parse_point("(1, 2)").is_err());
/// ```
pub fn parse_point(line: &str) -> Result<Point3<f64>, PointError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(PointError::Empty);
    }

    let body = strip_brackets(line)?;
    if body.trim().is_empty() {
        return Err(PointError::Arity(0));
    }

    let mut tokens: Vec<&str> = body.split(',').map(str::trim).collect();
    if tokens.len() > 1 && tokens.last() == Some(&"") {
        tokens.pop();
    }
    if tokens.len() != 3 {
        return Err(PointError::Arity(tokens.len()));
    }

    Ok(Point3::new(
        parse_number(tokens[0])?,
        parse_number(tokens[1])?,
        parse_number(tokens[2])?,
    ))
}

/// Removes redundant outer parentheses, then at most one list bracket.
fn strip_brackets(line: &str) -> Result<&str, PointError> {
    check_balanced(line)?;

    let mut body = line.trim();
    while let Some(inner) = unwrap_pair(body, '(', ')') {
        body = inner.trim();
    }
    if let Some(inner) = unwrap_pair(body, '[', ']') {
        body = inner.trim();
    }
    Ok(body)
}

fn check_balanced(line: &str) -> Result<(), PointError> {
    let mut open = Vec::new();
    for c in line.chars() {
        match c {
            '(' | '[' => open.push(c),
            ')' if open.pop() != Some('(') => return Err(PointError::UnbalancedBrackets),
            ']' if open.pop() != Some('[') => return Err(PointError::UnbalancedBrackets),
            _ => {}
        }
    }
    if open.is_empty() {
        Ok(())
    } else {
        Err(PointError::UnbalancedBrackets)
    }
}

/// Inside of `s` when its first bracket `open` is closed by its last character.
fn unwrap_pair(s: &str, open: char, close: char) -> Option<&str> {
    let inner = s.strip_prefix(open)?.strip_suffix(close)?;
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(inner)
}

fn parse_number(token: &str) -> Result<f64, PointError> {
    let invalid = || PointError::InvalidNumber(token.to_string());

    let mut literal = token;
    while let Some(inner) = unwrap_pair(literal, '(', ')') {
        literal = inner.trim();
    }
    if !is_decimal_literal(literal) {
        return Err(invalid());
    }

    literal
        .replace('_', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}

/// Signed decimal integer or float literal: `_` only between digits, no leading zeros
/// on integers other than zero itself.
fn is_decimal_literal(token: &str) -> bool {
    let is_sign = |c: char| c == '+' || c == '-';
    let unsigned = token.strip_prefix(is_sign).unwrap_or(token);
    let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    if let Some(exponent) = exponent {
        if !is_digit_part(exponent.strip_prefix(is_sign).unwrap_or(exponent)) {
            return false;
        }
    }

    match mantissa.split_once('.') {
        Some((integer, fraction)) => {
            !(integer.is_empty() && fraction.is_empty())
                && (integer.is_empty() || is_digit_part(integer))
                && (fraction.is_empty() || is_digit_part(fraction))
        }
        None => is_digit_part(mantissa) && (exponent.is_some() || !has_leading_zero(mantissa)),
    }
}

fn is_digit_part(s: &str) -> bool {
    !s.is_empty()
        && s.split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

fn has_leading_zero(digits: &str) -> bool {
    digits.starts_with('0') && digits.bytes().any(|b| b != b'0' && b != b'_')
}

/// Reads points line by line until `limit` points are collected. Blank lines are ignored.
///
/// Lines after the limit are neither decoded nor parsed.
pub fn read_points<R: BufRead>(mut reader: R, options: &ReadOptions) -> Result<PointSet, PointsError> {
    let mut set = PointSet::default();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        line_number += 1;
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| PointsError::Read { line: line_number, source })?;
        if read == 0 {
            break;
        }
        if buffer.trim_ascii().is_empty() {
            continue;
        }
        if set.points.len() >= options.limit {
            set.truncated = true;
            break;
        }

        let parsed = std::str::from_utf8(&buffer)
            .map_err(|_| PointError::InvalidUtf8)
            .and_then(parse_point);
        match parsed {
            Ok(point) => set.points.push(point),
            Err(source) if options.skip_invalid => {
                warn!(line = line_number, error = %source, "skipping malformed line");
                set.skipped += 1;
            }
            Err(source) => return Err(PointsError::Malformed { line: line_number, source }),
        }
    }

    debug!(points = set.points.len(), skipped = set.skipped, truncated = set.truncated, "points read");
    Ok(set)
}

pub fn load_points(path: &Path, options: &ReadOptions) -> Result<PointSet, PointsError> {
    let file = File::open(path).map_err(|source| PointsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let set = read_points(BufReader::new(file), options)?;
    info!(
        path = %path.display(),
        points = set.points.len(),
        skipped = set.skipped,
        truncated = set.truncated,
        "points loaded"
    );
    Ok(set)
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PointError {
    #[error("empty line")]
    Empty,
    #[error("unbalanced brackets")]
    UnbalancedBrackets,
    #[error("expected 3 values, found {0}")]
    Arity(usize),
    #[error("`{0}` is not a finite number")]
    InvalidNumber(String),
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, thiserror::Error)]
pub enum PointsError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        source: PointError,
    },
}
