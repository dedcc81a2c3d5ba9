//! Opt-in capture of backtracking search events

use crate::math::rotation::Configuration;
use std::fmt;

/// A single step taken by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A full pass over the board started at the given depth
    PassStarted {
        /// Depth of the pass
        depth: usize,
    },
    /// The search began trying the candidates of a tile
    TileTried {
        /// Column of the tile
        x: usize,
        /// Row of the tile
        y: usize,
    },
    /// A candidate is being tried
    Hypothesis {
        /// The candidate configuration
        configuration: Configuration,
    },
    /// A candidate led to a contradiction and was removed
    Refuted {
        /// The removed configuration
        configuration: Configuration,
    },
    /// A speculative scope was opened
    ScopePushed {
        /// Scope depth after opening
        depth: usize,
    },
    /// A speculative scope was discarded
    ScopePopped {
        /// Scope depth before discarding
        depth: usize,
    },
    /// A complete solution was committed
    Committed,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassStarted { depth } => write!(f, "pass depth={depth}"),
            Self::TileTried { x, y } => write!(f, "tile ({x}, {y})"),
            Self::Hypothesis { configuration } => write!(f, "  try {configuration:02x}"),
            Self::Refuted { configuration } => write!(f, "  refute {configuration:02x}"),
            Self::ScopePushed { depth } => write!(f, "  push {depth}"),
            Self::ScopePopped { depth } => write!(f, "  pop {depth}"),
            Self::Committed => write!(f, "commit"),
        }
    }
}

/// Records search events in the order they happen
#[derive(Debug, Default, Clone)]
pub struct SearchTrace {
    events: Vec<TraceEvent>,
}

impl SearchTrace {
    /// Create an empty trace
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Events in recording order
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of events of a given shape
    pub fn count_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&TraceEvent) -> bool,
    {
        self.events.iter().filter(|event| predicate(event)).count()
    }

    /// One line per event
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }
}
