use strum::VariantArray;

use crate::location::Location;

/// The four square-grid directions pipes can open toward.
///
/// [`VARIANTS`](VariantArray::VARIANTS) lists them up, down, left, right, which is the order orientations are tried in.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbor order used when looking around a cell: up, right, down, left.
    pub const CLOCKWISE: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    /// The result is not bounds checked.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// The direction pointing back.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// A quarter turn counter-clockwise.
    pub fn counter_clockwise(&self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }
}

/// The two ways a straight pipe can lie.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Axis {
    /// Open to the left and right.
    Horizontal,
    /// Open up and down.
    Vertical,
}

impl Axis {
    /// Both ends of a pipe along this axis.
    pub fn ends(&self) -> [Direction; 2] {
        match self {
            Self::Horizontal => [Direction::Left, Direction::Right],
            Self::Vertical => [Direction::Up, Direction::Down],
        }
    }
}
