//! Deduce orientations that the board's geometry and the already locked pieces leave no choice about.
//!
//! Two passes exist:
//! 1. [`force_borders`] runs once on a fresh grid and locks border pieces with exactly one orientation that stays on the board.
//! 2. [`propagate`] repeatedly scans every unlocked cell, works out what its locked neighbors demand of it,
//! and locks it if exactly one orientation satisfies them. A cell with no satisfying orientation proves the grid unsolvable.
//!
//! Only the single-survivor case narrows anything; cells with several survivors are left alone until a neighbor locks.

use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, trace};

use crate::board::Grid;
use crate::catalog::legal_orientations;
use crate::direction::Direction;
use crate::location::Location;
use crate::piece::{Orientation, Piece};

/// What the locked neighbors of a cell demand of it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Constraints {
    /// Directions in which a locked neighbor opens toward this cell.
    pub must_connect: HashSet<Direction>,
    /// Directions leading off the board, or toward a locked neighbor that does not open toward this cell.
    pub must_not_connect: HashSet<Direction>,
}

impl Constraints {
    /// Gather the constraints on `location` from its neighbors on `grid`.
    /// Unlocked neighbors say nothing.
    pub fn around(grid: &Grid, location: Location) -> Self {
        let mut constraints = Self::default();

        for (neighbor, direction) in grid.neighbor_positions(location) {
            match grid.cell(neighbor) {
                None => {
                    constraints.must_not_connect.insert(direction);
                }
                Some(cell) if cell.is_locked() => {
                    if cell.piece().opens_toward(direction.invert()) {
                        constraints.must_connect.insert(direction);
                    } else {
                        constraints.must_not_connect.insert(direction);
                    }
                }
                Some(_) => {}
            }
        }

        constraints
    }

    /// Whether `piece` opens toward every required direction and toward no forbidden one.
    pub fn admits(&self, piece: &Piece) -> bool {
        let openings = piece.openings();
        openings.is_superset(&self.must_connect) && openings.is_disjoint(&self.must_not_connect)
    }
}

/// The verdict on a single unlocked cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Deduction {
    /// Exactly one orientation fits.
    Locked(Orientation),
    /// Several orientations still fit.
    Undetermined,
    /// Nothing fits; the grid has no solution.
    Contradiction,
}

/// How a run of [`propagate`] ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fixpoint {
    /// No further cell can be locked. `locked` lists the cells this run locked, in the order it locked them.
    Settled { locked: Vec<Location> },
    /// The cell at `at` has no orientation left. Propagation stopped there.
    Contradiction { at: Location },
}

impl Fixpoint {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Legal orientations for the piece at `location` that also satisfy its current [`Constraints`], in catalog order.
///
/// Empty off the board.
pub fn candidates(grid: &Grid, location: Location) -> Vec<Orientation> {
    let Some(piece) = grid.get(location) else {
        return Vec::new();
    };
    let constraints = Constraints::around(grid, location);

    legal_orientations(piece.shape(), grid.classify(location)).into_iter()
        .filter(|orientation| piece.rotate(*orientation).is_some_and(|rotated| constraints.admits(&rotated)))
        .collect_vec()
}

/// Decide what, if anything, is forced at `location`.
pub fn deduce(grid: &Grid, location: Location) -> Deduction {
    match candidates(grid, location).as_slice() {
        [] => Deduction::Contradiction,
        [only] => Deduction::Locked(*only),
        _ => Deduction::Undetermined,
    }
}

/// Lock every unlocked border cell whose shape has exactly one legal orientation at its position.
///
/// Returns how many cells were locked. Running this again on the same grid locks nothing more.
pub fn force_borders(grid: &mut Grid) -> usize {
    let border = grid.locations()
        .filter(|location| grid.classify(*location).is_border() && !grid.is_locked(*location))
        .collect_vec();

    let mut forced = 0;
    for location in border {
        let Some(piece) = grid.get(location) else { continue };
        if let [only] = legal_orientations(piece.shape(), grid.classify(location)).as_slice() {
            if let Some(rotated) = piece.rotate(*only) {
                grid.lock(location, rotated);
                forced += 1;
            }
        }
    }

    debug!("border forcing locked {} of {} cells", forced, grid.len());
    forced
}

/// Lock forced cells until nothing changes or a contradiction shows up.
///
/// Each pass scans every unlocked cell in row-major order. A lock made mid-pass is visible to the rest of that pass;
/// any pass that locked something is followed by another, since one lock can force others anywhere on the board.
pub fn propagate(grid: &mut Grid) -> Fixpoint {
    let mut locked = Vec::new();

    loop {
        let mut changed = false;

        for location in grid.locations().collect_vec() {
            if grid.is_locked(location) {
                continue;
            }

            match deduce(grid, location) {
                Deduction::Locked(orientation) => {
                    let Some(rotated) = grid.get(location).and_then(|piece| piece.rotate(orientation)) else {
                        continue;
                    };
                    trace!("{:?} forced to {}", location, rotated);
                    grid.lock(location, rotated);
                    locked.push(location);
                    changed = true;
                }
                Deduction::Contradiction => {
                    trace!("{:?} has no orientation left", location);
                    return Fixpoint::Contradiction { at: location };
                }
                Deduction::Undetermined => {}
            }
        }

        if !changed {
            return Fixpoint::Settled { locked };
        }
    }
}
