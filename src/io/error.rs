//! Error types and context management for puzzle construction and solving

use std::fmt;
use std::path::PathBuf;

/// Main error type for all structural failures
///
/// Contradictions found while propagating or searching are not errors; they are
/// ordinary values consumed by the search. Only malformed input or invariant
/// violations surface here.
#[derive(Debug)]
pub enum PuzzleError {
    /// A neighbor relation is not reciprocal
    Topology {
        /// Coordinates of the tile whose neighbor does not point back
        tile: (usize, usize),
        /// Slot on that tile holding the one-sided neighbor
        slot: usize,
        /// Coordinates of the neighbor
        neighbor: (usize, usize),
    },

    /// No rotation maps the initial configuration onto the target
    NoRotation {
        /// Observed configuration
        initial: u8,
        /// Requested configuration
        target: u8,
        /// Number of direction slots
        slots: usize,
    },

    /// A configuration uses bits beyond the tile's slot count
    InvalidConfiguration {
        /// Coordinates of the offending tile
        tile: (usize, usize),
        /// The configuration as read
        configuration: u8,
        /// Number of direction slots
        slots: usize,
    },

    /// Puzzle description file could not be parsed
    InvalidPuzzleFile {
        /// Path to the puzzle file
        path: PathBuf,
        /// One-based line number of the failure
        line: usize,
        /// Description of what is wrong with the line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topology {
                tile,
                slot,
                neighbor,
            } => {
                write!(
                    f,
                    "Neighbor ({}, {}) in slot {slot} of tile ({}, {}) has no slot pointing back",
                    neighbor.0, neighbor.1, tile.0, tile.1
                )
            }
            Self::NoRotation {
                initial,
                target,
                slots,
            } => {
                write!(
                    f,
                    "Configuration {target:#04x} is not a rotation of {initial:#04x} over {slots} slots"
                )
            }
            Self::InvalidConfiguration {
                tile,
                configuration,
                slots,
            } => {
                write!(
                    f,
                    "Configuration {configuration:#04x} at ({}, {}) does not fit in {slots} slots",
                    tile.0, tile.1
                )
            }
            Self::InvalidPuzzleFile { path, line, reason } => {
                write!(f, "Invalid puzzle file '{}' line {line}: {reason}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Attaches a file path to errors raised without one
pub trait WithPath<T> {
    /// Replace placeholder paths in file-related errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &std::path::Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_path(self, path: &std::path::Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            PuzzleError::FileSystem { source, .. } => PuzzleError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            PuzzleError::InvalidPuzzleFile { line, reason, .. } => {
                PuzzleError::InvalidPuzzleFile {
                    path: path.to_path_buf(),
                    line,
                    reason,
                }
            }
            other => other,
        })
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a puzzle file error for a line of an as yet unnamed file
pub fn invalid_line(line: usize, reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidPuzzleFile {
        path: PathBuf::from("<unknown>"),
        line,
        reason: reason.to_string(),
    }
}
