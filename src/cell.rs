use crate::piece::Piece;

/// One square of the board.
///
/// Once `locked`, the piece keeps its orientation for this state and every state derived from it.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cell {
    pub(crate) piece: Piece,
    pub(crate) locked: bool,
}

impl Cell {
    pub(crate) fn unlocked(piece: Piece) -> Self {
        Self { piece, locked: false }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
