use crate::{
    algorithm::propagation::{Contradiction, Propagator},
    io::trace::{SearchTrace, TraceEvent},
    math::rotation::Configuration,
    spatial::TileId,
};

/// How deep speculative search may nest and whether to retry deeper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Search once at the given depth
    Fixed(usize),
    /// Start at `start` and retry one level deeper after every exhausted,
    /// unsolved pass, up to `limit`
    Escalating {
        /// First depth to search at
        start: usize,
        /// Deepest depth to try
        limit: usize,
    },
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self::Fixed(crate::io::configuration::DEFAULT_SEARCH_DEPTH)
    }
}

impl DepthPolicy {
    const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Fixed(depth) => (depth, depth),
            Self::Escalating { start, limit } => {
                if limit < start { (start, start) } else { (start, limit) }
            }
        }
    }
}

/// Result of a search pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete solution was found and committed
    Solved,
    /// Every candidate at this depth was tried without a contradiction
    Exhausted,
    /// The state the pass started from admits no solution
    Contradiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileTrial {
    Solved,
    Reduced,
    Unchanged,
    Infeasible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hypothesis {
    Solved,
    Consistent,
    Refuted,
}

/// Counters describing search work
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates tried as hypotheses
    pub trials: usize,
    /// Candidates ruled out by a failed hypothesis
    pub refutations: usize,
    /// Scopes opened
    pub scopes_opened: usize,
    /// Deepest scope nesting reached
    pub deepest_scope: usize,
    /// Complete solutions committed
    pub commits: usize,
    /// Depth of the last pass
    pub depth_reached: usize,
}

/// Backtracking search over speculative scopes
///
/// Each candidate of an undetermined tile is tried inside its own scope with
/// propagation running on top. A candidate whose scope runs into a
/// contradiction is removed from the enclosing state for good; a scope that
/// reaches a complete solution is committed into the canonical states.
#[derive(Debug)]
pub struct Backtracker<'a> {
    propagator: Propagator<'a>,
    /// Work counters
    pub stats: SearchStats,
    /// Optional capture of search events
    pub trace: Option<SearchTrace>,
}

impl<'a> Backtracker<'a> {
    /// Wrap a propagator that has already reached its first fixpoint
    pub const fn new(propagator: Propagator<'a>) -> Self {
        Self {
            propagator,
            stats: SearchStats {
                trials: 0,
                refutations: 0,
                scopes_opened: 0,
                deepest_scope: 0,
                commits: 0,
                depth_reached: 0,
            },
            trace: None,
        }
    }

    /// Start capturing search events
    pub fn enable_trace(&mut self) {
        self.trace = Some(SearchTrace::new());
    }

    /// The wrapped propagator
    pub const fn propagator(&self) -> &Propagator<'a> {
        &self.propagator
    }

    /// Give back the wrapped propagator
    pub fn into_propagator(self) -> Propagator<'a> {
        self.propagator
    }

    fn record(&mut self, event: TraceEvent) {
        if let Some(trace) = self.trace.as_mut() {
            trace.record(event);
        }
    }

    /// Search under a depth policy until solved, contradicted or out of depth
    pub fn solve(&mut self, policy: DepthPolicy) -> SearchOutcome {
        let (mut depth, limit) = policy.bounds();
        loop {
            self.stats.depth_reached = depth;
            self.record(TraceEvent::PassStarted { depth });
            let outcome = self.search(depth);
            if outcome == SearchOutcome::Contradiction {
                return outcome;
            }
            if outcome == SearchOutcome::Solved || self.propagator.store().all_determined() {
                return SearchOutcome::Solved;
            }
            if depth >= limit {
                return SearchOutcome::Exhausted;
            }
            depth += 1;
        }
    }

    /// Try every undetermined tile at the given depth until nothing changes
    pub fn search(&mut self, depth: usize) -> SearchOutcome {
        if depth == 0 {
            return SearchOutcome::Exhausted;
        }
        let order: Vec<TileId> = self.propagator.board().ids().collect();

        let mut changed = true;
        while changed {
            changed = false;
            for &id in &order {
                match self.try_tile(id, depth) {
                    TileTrial::Solved => return SearchOutcome::Solved,
                    TileTrial::Infeasible => return SearchOutcome::Contradiction,
                    TileTrial::Reduced => {
                        if self.settle_reduced(id).is_err() {
                            return SearchOutcome::Contradiction;
                        }
                        changed = true;
                    }
                    TileTrial::Unchanged => {}
                }
            }
        }
        SearchOutcome::Exhausted
    }

    fn settle_reduced(&mut self, id: TileId) -> Result<usize, Contradiction> {
        let store = self.propagator.store();
        if store.domain_len(id) == 1 && !store.is_applied(id) {
            self.propagator.apply_configuration(id)?;
        }
        self.propagator.propagate_from(id)
    }

    fn try_tile(&mut self, id: TileId, depth: usize) -> TileTrial {
        let candidates: Vec<Configuration> = self
            .propagator
            .store()
            .read(id)
            .map(|state| state.possible_configurations.to_vec())
            .unwrap_or_default();
        if candidates.len() <= 1 {
            return TileTrial::Unchanged;
        }
        if let Some(tile) = self.propagator.board().tile(id) {
            let (x, y) = (tile.x, tile.y);
            self.record(TraceEvent::TileTried { x, y });
        }

        let mut reduced = false;
        for configuration in candidates {
            self.stats.trials += 1;
            self.record(TraceEvent::Hypothesis { configuration });

            let verdict = if self.propagator.configuration_feasible(id, configuration) {
                self.open_scope();
                let verdict = self.hypothesize(id, configuration, depth);
                if verdict == Hypothesis::Solved {
                    return TileTrial::Solved;
                }
                self.close_scope();
                verdict
            } else {
                Hypothesis::Refuted
            };

            if verdict == Hypothesis::Refuted {
                self.stats.refutations += 1;
                self.record(TraceEvent::Refuted { configuration });
                if let Some(state) = self.propagator.store_mut().write(id) {
                    state.possible_configurations.remove(configuration);
                }
                reduced = true;
            }
        }

        if self.propagator.store().domain_len(id) == 0 {
            TileTrial::Infeasible
        } else if reduced {
            TileTrial::Reduced
        } else {
            TileTrial::Unchanged
        }
    }

    fn hypothesize(&mut self, id: TileId, configuration: Configuration, depth: usize) -> Hypothesis {
        if self.propagator.assign(id, configuration).is_err()
            || self.propagator.propagate_from(id).is_err()
        {
            return Hypothesis::Refuted;
        }
        if self.commit_if_complete(id) {
            return Hypothesis::Solved;
        }
        if depth > 1 {
            match self.search(depth - 1) {
                SearchOutcome::Solved => return Hypothesis::Solved,
                SearchOutcome::Contradiction => return Hypothesis::Refuted,
                SearchOutcome::Exhausted => {
                    if self.commit_if_complete(id) {
                        return Hypothesis::Solved;
                    }
                }
            }
        }
        Hypothesis::Consistent
    }

    fn commit_if_complete(&mut self, id: TileId) -> bool {
        if !self.propagator.is_complete(id) {
            return false;
        }
        self.propagator.store_mut().commit();
        self.stats.commits += 1;
        self.record(TraceEvent::Committed);
        true
    }

    fn open_scope(&mut self) {
        self.propagator.store_mut().push_scope();
        let depth = self.propagator.store().depth();
        self.stats.scopes_opened += 1;
        self.stats.deepest_scope = self.stats.deepest_scope.max(depth);
        self.record(TraceEvent::ScopePushed { depth });
    }

    fn close_scope(&mut self) {
        let depth = self.propagator.store().depth();
        self.propagator.store_mut().pop_scope();
        self.record(TraceEvent::ScopePopped { depth });
    }
}
