use std::cmp::Ordering;

use log::trace;

use crate::board::Grid;
use crate::location::Location;
use crate::piece::Orientation;
use crate::propagation::{force_borders, propagate, Fixpoint};

/// Identity of a [`SearchState`]. Only ever used to order states; carries no meaning otherwise.
pub type StateId = usize;

/// Whether a state can still lead anywhere.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Propagation settled without contradiction.
    Open,
    /// Propagation found a cell with no orientation left, at `at`.
    DeadBranch { at: Location },
}

/// One node of the search tree: a grid, already propagated as far as it goes.
///
/// States never change after they are created. Children are made from a full copy of the parent's grid.
#[derive(Clone, Debug)]
pub struct SearchState {
    id: StateId,
    grid: Grid,
    status: Status,
}

impl SearchState {
    /// The state a search starts from: `grid` with its borders forced, then propagated. Always id 0.
    pub fn root(mut grid: Grid) -> Self {
        force_borders(&mut grid);
        Self::settle(0, grid)
    }

    fn settle(id: StateId, mut grid: Grid) -> Self {
        let status = match propagate(&mut grid) {
            Fixpoint::Settled { .. } => Status::Open,
            Fixpoint::Contradiction { at } => Status::DeadBranch { at },
        };

        Self { id, grid, status }
    }

    /// A copy of this state with the piece at `location` turned to `orientation` and locked, then propagated.
    ///
    /// `None` if there is no piece at `location` or the piece has no such orientation.
    pub fn child(&self, id: StateId, location: Location, orientation: Orientation) -> Option<Self> {
        let rotated = self.grid.get(location)?.rotate(orientation)?;

        let mut grid = self.grid.clone();
        grid.lock(location, rotated);
        trace!("state {} from {}: {:?} chosen as {}", id, self.id, location, rotated);

        Some(Self::settle(id, grid))
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether propagation proved this state unsolvable.
    pub fn is_dead_branch(&self) -> bool {
        matches!(self.status, Status::DeadBranch { .. })
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
