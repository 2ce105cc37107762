#![warn(missing_docs)]

//! # `pipemania`
//!
//! A solver for pipe-rotation puzzles: a rectangular board of pipe pieces, each turned at random,
//! must be rotated in place until every opening meets an opening of its neighbor and the pipes form one network covering the board.
//!
//! Parse a board from text with [`str::parse`] or assemble one with a [`GridBuilder`],
//! then call [`solve()`](crate::Grid::solve), consuming the grid and yielding the solved version of it.
//! A [`Solver`] gives access to the search itself, its configuration and its statistics.
//!
//! # Internals
//! Pieces come in four shapes: terminals (one opening), corners and straights (two), and junctions (three).
//! The [`catalog`] decides which orientations a shape may take at a given spot on the board; it is the only source of candidate rotations.
//!
//! Solving proceeds in three layers:
//! 1. [`propagation`] locks pieces that have only one way to fit. Border pieces are forced once up front,
//! then every unlocked cell is checked against its locked neighbors until nothing changes.
//! A cell left with no way to fit proves the board unsolvable.
//! 2. [`Solver`] runs a breadth-first tree search. Each state is a full copy of the grid; branching locks
//! the first undecided cell to each of its surviving orientations and propagates again.
//! 3. [`validator`] certifies a candidate by walking the pipe network from the top left corner.
//!
//! The search never merges identical grids reached by different routes. Boards are small, and this keeps exploration order simple.

pub use board::{Grid, ParseError};
pub use builder::{BuilderInvalidReason, GridBuilder};
pub use cell::Cell;
pub use direction::{Axis, Direction};
pub use location::{Dimension, Location, PositionClass};
pub use piece::{Orientation, Piece, PieceCodeError, Shape};
pub use solver::{SearchStats, Solution, Solver, SolverConfig, SolverFailure};
pub use state::{SearchState, StateId, Status};

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod direction;
pub(crate) mod piece;
pub(crate) mod cell;
pub mod builder;
pub mod catalog;
pub mod propagation;
pub(crate) mod state;
pub(crate) mod solver;
pub mod validator;
