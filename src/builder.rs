use ndarray::{Array2, AssignElem};

use crate::board::Grid;
use crate::cell::Cell;
use crate::location::{Dimension, Location};
use crate::piece::Piece;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A piece was placed outside the bounds specified by `dims` on the builder.
    PieceOutOfBounds(Location),
    /// No piece was ever placed at this location.
    MissingPiece(Location),
}

/// A builder for [`Grid`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Every location must receive a piece before [`build`](Self::build) succeeds; placing twice keeps the later piece.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    pieces: Array2<Option<Piece>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl GridBuilder {
    /// Construct an empty builder with the specified dimensions, specified in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            pieces: Array2::from_elem((dims.0.get(), dims.1.get()), None),
            invalid_reasons: Default::default(),
        }
    }

    /// Put `piece` at `location`, unlocked and in whatever orientation it was given.
    ///
    /// May cause the builder to enter a [`PieceOutOfBounds`](BuilderInvalidReason::PieceOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn place(&mut self, location: Location, piece: Piece) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.pieces.get_mut(location.as_index()) {
            Some(slot) => slot.assign_elem(Some(piece)),
            None => self.invalid_reasons.push(BuilderInvalidReason::PieceOutOfBounds(location)),
        }

        self
    }

    /// Shorthand for [`Self::place`] along one row, starting at column 0.
    pub fn place_row(&mut self, row: usize, pieces: &[Piece]) -> &mut Self {
        for (col, piece) in pieces.iter().enumerate() {
            self.place(Location(row, col), *piece);
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    /// Missing pieces are only detected by [`Self::build`].
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`] with no cell locked.
    /// If the builder is invalid for any reason, the [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let missing: Vec<_> = self.pieces.indexed_iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| BuilderInvalidReason::MissingPiece(Location::from(index)))
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Grid {
            // every slot was checked above
            cells: self.pieces.map(|slot| slot.map(Cell::unlocked).unwrap_or_else(|| unreachable!())),
            dims: self.dims,
        })
    }
}
