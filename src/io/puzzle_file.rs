//! Text format for puzzle descriptions
//!
//! ```text
//! # comments run to the end of the line
//! topology hexagonal
//! 04 01 0x09
//! 12 20 3f
//! ```
//!
//! Every non-empty line after the optional `topology` header is one row of
//! whitespace-separated hexadecimal direction masks. Rows must have equal
//! length.

use crate::io::configuration::{COMMENT_MARKER, TOPOLOGY_KEYWORD};
use crate::io::error::{Result, WithPath, invalid_line};
use crate::math::rotation::Configuration;
use crate::spatial::{Puzzle, Topology};
use ndarray::Array2;
use std::path::Path;

/// Parsed contents of a puzzle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleFile {
    /// Topology named in the header, if any
    pub topology: Option<Topology>,
    /// Observed configurations indexed `[y, x]`
    pub configurations: Array2<Configuration>,
}

impl PuzzleFile {
    /// Build the puzzle, using `fallback` when the file names no topology
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be built from the grid
    pub fn into_puzzle(self, fallback: Topology) -> Result<Puzzle> {
        Puzzle::new(self.topology.unwrap_or(fallback), &self.configurations)
    }
}

fn parse_mask(token: &str, line: usize) -> Result<Configuration> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    Configuration::from_str_radix(digits, 16)
        .map_err(|e| invalid_line(line, &format!("bad mask '{token}': {e}")))
}

/// Parse puzzle text
///
/// # Errors
///
/// Returns `PuzzleError::InvalidPuzzleFile` for a malformed header, a bad
/// mask, ragged rows or a file without tiles
pub fn parse(text: &str) -> Result<PuzzleFile> {
    let mut topology = None;
    let mut width = None;
    let mut height = 0;
    let mut cells = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split(COMMENT_MARKER).next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens = content.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        if first.eq_ignore_ascii_case(TOPOLOGY_KEYWORD) {
            if height > 0 {
                return Err(invalid_line(line, &"topology header must come before the rows"));
            }
            if topology.is_some() {
                return Err(invalid_line(line, &"topology given twice"));
            }
            let name = tokens.next().unwrap_or_default();
            let parsed = name.parse::<Topology>().map_err(|e| invalid_line(line, &e))?;
            topology = Some(parsed);
            continue;
        }

        let row = content
            .split_whitespace()
            .map(|token| parse_mask(token, line))
            .collect::<Result<Vec<_>>>()?;
        match width {
            None => width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(invalid_line(
                    line,
                    &format!("row has {} tiles, expected {expected}", row.len()),
                ));
            }
            Some(_) => {}
        }
        cells.extend(row);
        height += 1;
    }

    let Some(width) = width else {
        return Err(invalid_line(text.lines().count(), &"no tiles found"));
    };
    let configurations = Array2::from_shape_vec((height, width), cells)
        .map_err(|e| invalid_line(text.lines().count(), &e))?;
    Ok(PuzzleFile {
        topology,
        configurations,
    })
}

/// Read and parse a puzzle file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load(path: &Path) -> Result<PuzzleFile> {
    let text = std::fs::read_to_string(path).with_path(path, "read puzzle")?;
    parse(&text).with_path(path, "parse puzzle")
}

/// Render a grid in the puzzle file format
pub fn render(topology: Topology, configurations: &Array2<Configuration>) -> String {
    let mut out = format!("{TOPOLOGY_KEYWORD} {topology}\n");
    for row in configurations.rows() {
        let masks: Vec<String> = row.iter().map(|mask| format!("{mask:02x}")).collect();
        out.push_str(&masks.join(" "));
        out.push('\n');
    }
    out
}
