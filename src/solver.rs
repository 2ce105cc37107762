use std::collections::VecDeque;
use std::num::NonZero;

use itertools::Itertools;
use log::{debug, info, trace};
use thiserror::Error;

use crate::board::Grid;
use crate::propagation::candidates;
use crate::state::{SearchState, StateId};
use crate::validator::is_goal;

/// Reasons a [`Solver`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every branch was explored and none was a finished network, i.e. the puzzle as stated is unsolvable.
    #[error("no solution found")]
    Exhausted,
    /// The configured dequeue limit was reached before a solution turned up.
    #[error("gave up after {0} states")]
    DequeueLimit(usize),
}

/// Knobs for a [`Solver`]. The default searches until the frontier runs dry.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SolverConfig {
    dequeue_limit: Option<NonZero<usize>>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop with [`SolverFailure::DequeueLimit`] once `limit` states have been taken off the frontier without success.
    /// A limit of 0 means no limit.
    pub fn with_dequeue_limit(mut self, limit: usize) -> Self {
        self.dequeue_limit = NonZero::new(limit);
        self
    }

    pub fn dequeue_limit(&self) -> Option<NonZero<usize>> {
        self.dequeue_limit
    }
}

/// Counters describing the work a search did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// States taken off the frontier.
    pub dequeues: usize,
    /// Calls to [`Solver::expand`].
    pub expansions: usize,
    /// Child states created.
    pub generated: usize,
    /// Child states that propagation proved unsolvable.
    pub dead_branches: usize,
    /// Largest the frontier ever got.
    pub peak_frontier: usize,
}

/// A solved grid and what it took to find it.
#[derive(Clone, Debug)]
pub struct Solution {
    pub grid: Grid,
    pub stats: SearchStats,
}

/// Breadth-first tree search over rotation choices.
///
/// Every state is propagated when it is created. Taking a state off the frontier checks it against the goal;
/// if it is not the goal, the first unlocked cell in row-major order is branched on, one child per orientation
/// the catalog and the locked neighbors still allow. Children join the back of the frontier.
///
/// No state is ever deduplicated: the same grid reached by two different branch orders is explored twice.
pub struct Solver {
    frontier: VecDeque<SearchState>,
    next_id: StateId,
    config: SolverConfig,
    stats: SearchStats,
}

impl Solver {
    /// Prepare a search over `grid`, forcing its borders and propagating right away.
    pub fn new(grid: Grid) -> Self {
        Self::with_config(grid, SolverConfig::default())
    }

    pub fn with_config(grid: Grid, config: SolverConfig) -> Self {
        let root = SearchState::root(grid);

        Self {
            frontier: VecDeque::from([root]),
            next_id: 1,
            config,
            stats: SearchStats { peak_frontier: 1, ..Default::default() },
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn next_id(&mut self) -> StateId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Branch on `state`.
    ///
    /// - a dead branch has no children
    /// - a state with every cell locked yields a copy of itself, a leaf
    /// - otherwise, one child per remaining candidate orientation of the first unlocked cell, in catalog order
    pub fn expand(&mut self, state: &SearchState) -> Vec<SearchState> {
        self.stats.expansions += 1;

        if state.is_dead_branch() {
            return Vec::new();
        }

        let Some(location) = state.grid().first_unlocked() else {
            return vec![state.clone()];
        };

        let children = candidates(state.grid(), location).into_iter()
            .filter_map(|orientation| {
                let id = self.next_id();
                state.child(id, location, orientation)
            })
            .collect_vec();

        self.stats.generated += children.len();
        self.stats.dead_branches += children.iter().filter(|child| child.is_dead_branch()).count();
        trace!("state {} branched on {:?} into {} children", state.id(), location, children.len());

        children
    }

    /// Run the search to the first finished network.
    ///
    /// Returns [`SolverFailure::Exhausted`] if the frontier empties first.
    /// [`Self::stats`] stays available afterwards either way.
    pub fn solve(&mut self) -> Result<Solution, SolverFailure> {
        while let Some(state) = self.frontier.pop_front() {
            self.stats.dequeues += 1;

            if is_goal(state.grid()) {
                info!("solved at state {} after {} dequeues", state.id(), self.stats.dequeues);
                debug!("{:?}", self.stats);
                return Ok(Solution { grid: state.into_grid(), stats: self.stats });
            }

            if let Some(limit) = self.config.dequeue_limit {
                if self.stats.dequeues >= limit.get() {
                    info!("dequeue limit of {} reached", limit);
                    return Err(SolverFailure::DequeueLimit(limit.get()));
                }
            }

            // expanding a finished non-goal grid would only hand back the same grid
            if state.grid().is_complete() {
                trace!("state {} is complete but not connected", state.id());
                continue;
            }

            let children = self.expand(&state);
            self.frontier.extend(children);
            self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        }

        info!("frontier exhausted after {} dequeues", self.stats.dequeues);
        debug!("{:?}", self.stats);
        Err(SolverFailure::Exhausted)
    }
}

impl Grid {
    /// Solves this grid, deferring to a [`Solver`] with the default configuration and returning the solved grid.
    ///
    /// Returns according to the result of [`Solver::solve`].
    pub fn solve(self) -> Result<Self, SolverFailure> {
        Solver::new(self).solve().map(|solution| solution.grid)
    }
}
