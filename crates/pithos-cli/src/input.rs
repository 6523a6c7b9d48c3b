//! Plain-text profile input.
//!
//! One `height radius` pair per line (whitespace, comma, or semicolon
//! separated, `#` starts a comment), in centimeters. Extraction from
//! drawing formats is a separate collaborator's job; this reader only
//! covers the already-extracted sample lists.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read and parse a profile sample file.
pub fn read_samples(path: &Path) -> Result<Vec<(f64, f64)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_samples(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse `height radius` lines into samples.
pub fn parse_samples(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut samples = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line
            .split([' ', '\t', ',', ';'])
            .filter(|f| !f.is_empty());
        let height = next_number(&mut fields, idx, line)?;
        let radius = next_number(&mut fields, idx, line)?;
        if fields.next().is_some() {
            bail!("line {}: expected 'height radius', got '{line}'", idx + 1);
        }
        samples.push((height, radius));
    }
    if samples.is_empty() {
        bail!("no samples found");
    }
    Ok(samples)
}

fn next_number<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    idx: usize,
    line: &str,
) -> Result<f64> {
    let field = match fields.next() {
        Some(f) => f,
        None => bail!("line {}: expected 'height radius', got '{line}'", idx + 1),
    };
    field
        .parse()
        .with_context(|| format!("line {}: invalid number '{field}'", idx + 1))
}

/// Profile name derived from the file stem.
pub fn profile_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "profile".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let samples = parse_samples("0 5\n3.5 4.2\n10 5\n").unwrap();
        assert_eq!(samples, vec![(0.0, 5.0), (3.5, 4.2), (10.0, 5.0)]);
    }

    #[test]
    fn test_parse_separators_and_comments() {
        let text = "# rim profile\n0, 5\n2;4.5\n\n4\t3 # shoulder\n";
        let samples = parse_samples(text).unwrap();
        assert_eq!(samples, vec![(0.0, 5.0), (2.0, 4.5), (4.0, 3.0)]);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_samples("0 5\nnot numbers\n").is_err());
        assert!(parse_samples("0 5 9\n").is_err());
        assert!(parse_samples("0\n").is_err());
        assert!(parse_samples("# only comments\n").is_err());
    }
}
