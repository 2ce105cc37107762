use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use strum::VariantArray;
use thiserror::Error;

use crate::direction::{Axis, Direction};

/// The four pipe shapes.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Shape {
    /// One opening; a dead end.
    Terminal,
    /// Two openings on adjacent sides.
    Corner,
    /// Two openings on opposite sides.
    Straight,
    /// Three openings.
    Junction,
}

impl Shape {
    /// Every orientation of this shape, in the order they are tried.
    pub fn orientations(&self) -> Vec<Orientation> {
        match self {
            Self::Straight => Axis::VARIANTS.iter().copied().map(Orientation::Along).collect_vec(),
            _ => Direction::VARIANTS.iter().copied().map(Orientation::Facing).collect_vec(),
        }
    }

    /// Whether `orientation` is one of this shape's orientations.
    pub fn accepts(&self, orientation: Orientation) -> bool {
        matches!(
            (self, orientation),
            (Self::Straight, Orientation::Along(_))
                | (Self::Terminal | Self::Corner | Self::Junction, Orientation::Facing(_))
        )
    }

    fn code(&self) -> char {
        match self {
            Self::Terminal => 'F',
            Self::Junction => 'B',
            Self::Corner => 'V',
            Self::Straight => 'L',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|shape| shape.code() == code)
    }
}

/// Which way a piece is turned.
///
/// Straight pieces lie along an [`Axis`]; every other shape faces a [`Direction`].
/// What "facing" means depends on the shape, see [`Piece::openings`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Orientation {
    Facing(Direction),
    Along(Axis),
}

impl Orientation {
    fn code(&self) -> char {
        match self {
            Self::Facing(Direction::Up) => 'C',
            Self::Facing(Direction::Down) => 'B',
            Self::Facing(Direction::Left) => 'E',
            Self::Facing(Direction::Right) => 'D',
            Self::Along(Axis::Horizontal) => 'H',
            Self::Along(Axis::Vertical) => 'V',
        }
    }
}

/// Reasons a two-character piece code may be rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PieceCodeError {
    /// Codes are exactly one shape letter followed by one orientation letter.
    #[error("expected a two-character piece code, got {0:?}")]
    Length(String),
    /// The first letter is not one of `F`, `B`, `V`, `L`.
    #[error("unknown shape letter {0:?}")]
    UnknownShape(char),
    /// The second letter does not name an orientation of the shape.
    #[error("{shape:?} has no orientation {code:?}")]
    UnknownOrientation {
        /// The shape that was read.
        shape: Shape,
        /// The offending letter.
        code: char,
    },
}

/// A pipe piece: a shape turned to one of its orientations.
///
/// Pieces are plain values; turning one yields a new piece.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    shape: Shape,
    orientation: Orientation,
}

impl Piece {
    /// `None` if `orientation` does not belong to `shape`.
    pub fn new(shape: Shape, orientation: Orientation) -> Option<Self> {
        shape.accepts(orientation).then_some(Self { shape, orientation })
    }

    /// Shorthand constructors, one per shape.
    pub fn terminal(facing: Direction) -> Self {
        Self { shape: Shape::Terminal, orientation: Orientation::Facing(facing) }
    }

    pub fn corner(facing: Direction) -> Self {
        Self { shape: Shape::Corner, orientation: Orientation::Facing(facing) }
    }

    pub fn junction(facing: Direction) -> Self {
        Self { shape: Shape::Junction, orientation: Orientation::Facing(facing) }
    }

    pub fn straight(axis: Axis) -> Self {
        Self { shape: Shape::Straight, orientation: Orientation::Along(axis) }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The same shape turned to `orientation`, or `None` if the shape has no such orientation.
    pub fn rotate(&self, orientation: Orientation) -> Option<Self> {
        Self::new(self.shape, orientation)
    }

    /// The directions this piece opens toward.
    ///
    /// - a terminal facing `d` opens toward `d`
    /// - a corner facing `d` opens toward `d` and a quarter turn counter-clockwise of it
    /// - a junction facing `d` opens everywhere except directly behind `d`
    /// - a straight opens toward both ends of its axis
    pub fn openings(&self) -> HashSet<Direction> {
        match (self.shape, self.orientation) {
            (Shape::Straight, Orientation::Along(axis)) => axis.ends().into_iter().collect(),
            (Shape::Terminal, Orientation::Facing(d)) => HashSet::from([d]),
            (Shape::Corner, Orientation::Facing(d)) => HashSet::from([d, d.counter_clockwise()]),
            (Shape::Junction, Orientation::Facing(d)) => Direction::VARIANTS.iter()
                .copied()
                .filter(|other| *other != d.invert())
                .collect(),
            // Piece::new refuses these
            _ => unreachable!(),
        }
    }

    pub fn opens_toward(&self, direction: Direction) -> bool {
        self.openings().contains(&direction)
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.shape.code(), self.orientation.code())
    }
}

impl FromStr for Piece {
    type Err = PieceCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((shape_code, orientation_code)) = s.chars().collect_tuple() else {
            return Err(PieceCodeError::Length(s.to_owned()));
        };

        let shape = Shape::from_code(shape_code).ok_or(PieceCodeError::UnknownShape(shape_code))?;
        shape.orientations().into_iter()
            .find(|orientation| orientation.code() == orientation_code)
            .and_then(|orientation| Self::new(shape, orientation))
            .ok_or(PieceCodeError::UnknownOrientation { shape, code: orientation_code })
    }
}
