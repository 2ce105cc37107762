use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A board extent; boards are never empty along either axis.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
///
/// Ordering is row-major, which is also the order cells are scanned in.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    /// Offsetting past zero wraps around, so the result is always off any real board.
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies within a board of `dims` `(rows, cols)`.
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }

    /// Where this location sits relative to the border of a board of `dims` `(rows, cols)`.
    ///
    /// Corners win over edges, and the top and bottom rows win over the side columns,
    /// so one-row and one-column boards still classify to a single class.
    pub fn classify(&self, dims: (Dimension, Dimension)) -> PositionClass {
        let last_row = dims.0.get() - 1;
        let last_col = dims.1.get() - 1;
        let Location(row, col) = *self;

        match (row == 0, row == last_row, col == 0, col == last_col) {
            (true, _, true, _) => PositionClass::CornerTopLeft,
            (true, _, _, true) => PositionClass::CornerTopRight,
            (_, true, true, _) => PositionClass::CornerBottomLeft,
            (_, true, _, true) => PositionClass::CornerBottomRight,
            (true, _, _, _) => PositionClass::EdgeTop,
            (_, true, _, _) => PositionClass::EdgeBottom,
            (_, _, true, _) => PositionClass::EdgeLeft,
            (_, _, _, true) => PositionClass::EdgeRight,
            _ => PositionClass::Interior,
        }
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

/// The border clipping that applies at a location.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PositionClass {
    /// Not on any edge.
    Interior,
    /// Top row, not a corner.
    EdgeTop,
    /// Bottom row, not a corner.
    EdgeBottom,
    /// Left column, not a corner.
    EdgeLeft,
    /// Right column, not a corner.
    EdgeRight,
    /// `(0, 0)`.
    CornerTopLeft,
    /// Top row, right column.
    CornerTopRight,
    /// Bottom row, left column.
    CornerBottomLeft,
    /// Bottom row, right column.
    CornerBottomRight,
}

impl PositionClass {
    /// Directions that lead off the board from this class.
    pub fn blocked(&self) -> &'static [crate::Direction] {
        use crate::Direction::{Down, Left, Right, Up};

        match self {
            Self::Interior => &[],
            Self::EdgeTop => &[Up],
            Self::EdgeBottom => &[Down],
            Self::EdgeLeft => &[Left],
            Self::EdgeRight => &[Right],
            Self::CornerTopLeft => &[Up, Left],
            Self::CornerTopRight => &[Up, Right],
            Self::CornerBottomLeft => &[Down, Left],
            Self::CornerBottomRight => &[Down, Right],
        }
    }

    /// Whether this class is on the border at all.
    pub fn is_border(&self) -> bool {
        *self != Self::Interior
    }
}
