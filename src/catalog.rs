//! Which orientations are ever worth considering, and when two pieces meet properly.

use itertools::Itertools;

use crate::direction::Direction;
use crate::location::PositionClass;
use crate::piece::{Orientation, Piece, Shape};

/// Every orientation of `shape` that keeps all of its openings on the board at a cell of class `class`.
///
/// Orientations come back in [`Shape::orientations`] order, which is also the order branches are explored in.
/// A shape that cannot fit at all (a junction in a corner, say) yields nothing.
pub fn legal_orientations(shape: Shape, class: PositionClass) -> Vec<Orientation> {
    shape.orientations().into_iter()
        .filter(|orientation| {
            // Shape::orientations only yields orientations the shape accepts
            Piece::new(shape, *orientation).is_some_and(|piece| {
                class.blocked().iter().all(|blocked| !piece.opens_toward(*blocked))
            })
        })
        .collect_vec()
}

/// Whether `piece` opens toward `direction` and `neighbor`, the piece found that way, opens back.
///
/// A missing neighbor (off the board) is never compatible.
pub fn compatible(piece: &Piece, neighbor: Option<&Piece>, direction: Direction) -> bool {
    piece.opens_toward(direction)
        && neighbor.is_some_and(|other| other.opens_toward(direction.invert()))
}
