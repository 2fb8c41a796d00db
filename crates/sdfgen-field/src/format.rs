//! Whitespace-separated text encoding of [`SdfGrid`].
//!
//! ```text
//! <nx> <ny> <nz> <bx> <by> <bz> <d0> <d1> ... <dN-1>
//! ```
//!
//! Distances are written with at most four fractional digits, in storage
//! order. Readers split on any run of whitespace, so line breaks and
//! trailing spaces are accepted.

use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use sdfgen_math::Vec3;
use tracing::debug;

use crate::error::{FieldError, Result};
use crate::grid::{cell_count, SdfGrid};

const HEADER_TOKENS: usize = 6;

/// Format a distance with up to four fractional digits and no trailing zeros.
pub fn format_distance(d: f32) -> String {
    let mut s = format!("{d:.4}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

impl SdfGrid {
    /// Write the grid in text form.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut w = BufWriter::new(writer);
        let [nx, ny, nz] = self.resolution();
        let b = self.bounds();
        write!(w, "{nx} {ny} {nz} {} {} {} ", b.x, b.y, b.z)?;
        for &d in self.distances() {
            write!(w, "{} ", format_distance(d))?;
        }
        w.flush()?;
        Ok(())
    }

    /// Encode the grid as a string.
    pub fn to_text(&self) -> String {
        let b = self.bounds();
        let [nx, ny, nz] = self.resolution();
        let mut out = String::with_capacity(32 + self.len() * 8);
        let _ = write!(out, "{nx} {ny} {nz} {} {} {} ", b.x, b.y, b.z);
        for &d in self.distances() {
            out.push_str(&format_distance(d));
            out.push(' ');
        }
        out
    }

    /// Decode a grid from text.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < HEADER_TOKENS {
            return Err(FieldError::Format(format!(
                "expected {HEADER_TOKENS} header values, found {}",
                tokens.len()
            )));
        }

        let resolution = [
            parse_token::<usize>(tokens[0], "nx")?,
            parse_token::<usize>(tokens[1], "ny")?,
            parse_token::<usize>(tokens[2], "nz")?,
        ];
        let bounds = Vec3::new(
            parse_token(tokens[3], "bx")?,
            parse_token(tokens[4], "by")?,
            parse_token(tokens[5], "bz")?,
        );

        let expected = cell_count(resolution)?;
        let body = &tokens[HEADER_TOKENS..];
        if body.len() != expected {
            return Err(FieldError::TokenCount {
                expected,
                found: body.len(),
            });
        }

        let distances = body
            .iter()
            .map(|t| parse_token::<f32>(t, "distance"))
            .collect::<Result<Vec<_>>>()?;

        SdfGrid::new(resolution, bounds, distances)
    }

    /// Write the grid to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let start = Instant::now();
        let file = std::fs::File::create(path)?;
        self.write_to(file)?;
        debug!(
            path = %path.display(),
            cells = self.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "saved distance field"
        );
        Ok(())
    }

    /// Read a grid from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        let text = std::fs::read_to_string(path)?;
        let grid = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            cells = grid.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded distance field"
        );
        Ok(grid)
    }
}

fn parse_token<T: FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| FieldError::Format(format!("invalid {what} value '{token}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_grid() -> SdfGrid {
        let distances = (0..8).map(|i| (i as f32 - 3.5) * 0.123_456).collect();
        SdfGrid::new([2, 2, 2], Vec3::new(2.0, 2.0, 2.0), distances).unwrap()
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1.0), "1");
        assert_eq!(format_distance(0.5), "0.5");
        assert_eq!(format_distance(-0.123_456), "-0.1235");
        assert_eq!(format_distance(-0.00001), "0");
        assert_eq!(format_distance(0.0), "0");
        assert_eq!(format_distance(12.25), "12.25");
    }

    #[test]
    fn test_text_header() {
        let grid = SdfGrid::new([1, 1, 1], Vec3::new(2.0, 2.0, 2.0), vec![-0.5]).unwrap();
        assert_eq!(grid.to_text(), "1 1 1 2 2 2 -0.5 ");
    }

    #[test]
    fn test_write_matches_to_text() {
        let grid = sample_grid();
        let mut buf = Vec::new();
        grid.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), grid.to_text());
    }

    #[test]
    fn test_round_trip_within_precision() {
        let grid = sample_grid();
        let parsed = SdfGrid::parse(&grid.to_text()).unwrap();
        assert_eq!(parsed.resolution(), grid.resolution());
        assert_eq!(parsed.bounds(), grid.bounds());
        for (a, b) in grid.distances().iter().zip(parsed.distances()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_parse_any_whitespace() {
        let grid = SdfGrid::parse("1 1 2\n1.5\t1.5 1.5\n 0.25\n\n-0.75   \n").unwrap();
        assert_eq!(grid.resolution(), [1, 1, 2]);
        assert_eq!(grid.distances(), &[0.25, -0.75]);
    }

    #[test]
    fn test_parse_short_header() {
        let err = SdfGrid::parse("2 2 2 1").unwrap_err();
        assert!(matches!(err, FieldError::Format(_)));
    }

    #[test]
    fn test_parse_wrong_count() {
        let err = SdfGrid::parse("2 1 1 1 1 1 0.5").unwrap_err();
        assert!(matches!(err, FieldError::TokenCount { expected: 2, found: 1 }));

        let err = SdfGrid::parse("1 1 1 1 1 1 0.5 0.5").unwrap_err();
        assert!(matches!(err, FieldError::TokenCount { expected: 1, found: 2 }));
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = SdfGrid::parse("1 1 1 1 1 1 abc").unwrap_err();
        assert!(matches!(err, FieldError::Format(_)));

        let err = SdfGrid::parse("x 1 1 1 1 1 0").unwrap_err();
        assert!(matches!(err, FieldError::Format(_)));
    }

    #[test]
    fn test_save_load_file() {
        let grid = sample_grid();
        let path = std::env::temp_dir().join(format!("sdfgen-field-{}.txt", std::process::id()));
        grid.save(&path).unwrap();
        let loaded = SdfGrid::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.len(), grid.len());
    }
}
