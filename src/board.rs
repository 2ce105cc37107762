use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use ndarray::Array2;
use thiserror::Error;

use crate::builder::{BuilderInvalidReason, GridBuilder};
use crate::cell::Cell;
use crate::direction::Direction;
use crate::location::{Dimension, Location, PositionClass};
use crate::piece::{Piece, PieceCodeError};

/// Reasons puzzle text may fail to parse into a [`Grid`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// No rows at all.
    #[error("puzzle contains no rows")]
    Empty,
    /// A code that does not name a piece.
    #[error("bad piece code at row {row}, column {col}")]
    UnknownCode {
        row: usize,
        col: usize,
        #[source]
        source: PieceCodeError,
    },
    /// A row whose length differs from the first row.
    #[error("row {row} has {found} pieces, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The builder refused the parsed pieces.
    #[error("grid could not be assembled: {0:?}")]
    Invalid(Vec<BuilderInvalidReason>),
}

/// A rectangular board of pipe pieces, each possibly locked.
///
/// Grids should be built with a [`GridBuilder`] or parsed from text with [`str::parse`].
/// Cloning a grid copies every cell; no two grids share storage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    pub(crate) cells: Array2<Cell>,
    // rows, cols
    pub(crate) dims: (Dimension, Dimension),
}

impl Grid {
    /// `(rows, cols)`.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Grids always hold at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_on_board(&self, location: Location) -> bool {
        location.within(self.dims)
    }

    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    /// The piece at `location`, or [`None`] off the board.
    pub fn get(&self, location: Location) -> Option<Piece> {
        self.cell(location).map(Cell::piece)
    }

    /// Off-board locations are never locked.
    pub fn is_locked(&self, location: Location) -> bool {
        self.cell(location).is_some_and(Cell::is_locked)
    }

    /// The four geometric neighbors of `location` in up, right, down, left order, paired with the direction they lie in.
    ///
    /// Neighbors past the edge are included; check them with [`Self::is_on_board`].
    pub fn neighbor_positions(&self, location: Location) -> [(Location, Direction); 4] {
        Direction::CLOCKWISE.map(|direction| (direction.attempt_from(location), direction))
    }

    pub fn classify(&self, location: Location) -> PositionClass {
        location.classify(self.dims)
    }

    /// Every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        iproduct!(0..self.dims.0.get(), 0..self.dims.1.get()).map(Location::from)
    }

    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.locked).count()
    }

    /// Whether every cell is locked.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.locked)
    }

    /// The first unlocked location in row-major order.
    pub fn first_unlocked(&self) -> Option<Location> {
        self.locations().find(|location| !self.is_locked(*location))
    }

    /// Replace the piece at `location` and lock it. Does nothing off the board.
    pub(crate) fn lock(&mut self, location: Location, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(location.as_index()) {
            cell.piece = piece;
            cell.locked = true;
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cells.rows().into_iter()
            .map(|row| row.iter().map(|cell| cell.piece.to_string()).join("\t"))
            .join("\n"))
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    /// Parse whitespace-separated piece codes, one row per line. Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| line.split_whitespace()
                .enumerate()
                .map(|(col, code)| code.parse::<Piece>()
                    .map_err(|source| ParseError::UnknownCode { row, col, source }))
                .collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        let expected = rows.first().map(Vec::len).ok_or(ParseError::Empty)?;
        if let Some((row, found)) = rows.iter().map(Vec::len).find_position(|len| *len != expected) {
            return Err(ParseError::Ragged { row, expected, found });
        }

        let (Some(height), Some(width)) = (Dimension::new(rows.len()), Dimension::new(expected)) else {
            return Err(ParseError::Empty);
        };

        let mut builder = GridBuilder::with_dims((height, width));
        for (row, pieces) in rows.into_iter().enumerate() {
            for (col, piece) in pieces.into_iter().enumerate() {
                builder.place(Location(row, col), piece);
            }
        }

        builder.build().map_err(ParseError::Invalid)
    }
}
