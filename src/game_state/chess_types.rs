//! Core value types shared by the position model, move generation and search.
//!
//! Coordinates follow the board layout used throughout the crate: row 0 is the
//! dark side's home rank (rank 8), row 7 is the light side's home rank (rank 1),
//! and column 0 is the a-file.

pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn advance for this color.
    #[inline]
    pub const fn pawn_forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row on which this color's king and rooks start.
    #[inline]
    pub const fn home_row(self) -> i8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Row on which this color's pawns start.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// `+1.0` for light, `-1.0` for dark. Used as the negamax turn sign.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Color::Light => 1.0,
            Color::Dark => -1.0,
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used in notation and FEN.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// An occupied square's content. Empty squares are `None` in a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// FEN character: upper-case for light, lower-case for dark.
    #[inline]
    pub fn fen_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::Light => letter,
            Color::Dark => letter.to_ascii_lowercase(),
        }
    }
}

/// 8x8 grid indexed `[row][col]`.
pub type Board = [[Option<Piece>; 8]; 8];

/// Board coordinate. Only squares with both components in `0..8` are on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// The square `distance` steps away along `direction`, if it is on the board.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i8) -> Option<Square> {
        let target = Square::new(
            self.row + direction.d_row * distance,
            self.col + direction.d_col * distance,
        );
        target.is_on_board().then_some(target)
    }

    #[inline]
    pub fn step(self, direction: Direction) -> Option<Square> {
        self.offset(direction, 1)
    }
}

/// A (row, col) step. Used for rays, knight jumps and pin/check descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    #[inline]
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    #[inline]
    pub const fn reversed(self) -> Self {
        Self::new(-self.d_row, -self.d_col)
    }

    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        (self.d_row == 0) != (self.d_col == 0)
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.d_row != 0 && self.d_row.abs() == 1 && self.d_col.abs() == 1
    }
}

/// Castling permissions, ordered as light kingside, dark kingside, light
/// queenside, dark queenside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub dark_kingside: bool,
    pub light_queenside: bool,
    pub dark_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        light_kingside: true,
        dark_kingside: true,
        light_queenside: true,
        dark_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        light_kingside: false,
        dark_kingside: false,
        light_queenside: false,
        dark_queenside: false,
    };

    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_kingside,
            Color::Dark => self.dark_kingside,
        }
    }

    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_queenside,
            Color::Dark => self.dark_queenside,
        }
    }

    #[inline]
    pub fn revoke_kingside(&mut self, color: Color) {
        match color {
            Color::Light => self.light_kingside = false,
            Color::Dark => self.dark_kingside = false,
        }
    }

    #[inline]
    pub fn revoke_queenside(&mut self, color: Color) {
        match color {
            Color::Light => self.light_queenside = false,
            Color::Dark => self.dark_queenside = false,
        }
    }

    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.step(Direction::new(-1, 0)), None);
        assert_eq!(corner.offset(Direction::new(1, 1), 7), Some(Square::new(7, 7)));
        assert_eq!(corner.offset(Direction::new(1, 1), 8), None);
    }

    #[test]
    fn direction_classification() {
        assert!(Direction::new(0, 1).is_orthogonal());
        assert!(!Direction::new(0, 1).is_diagonal());
        assert!(Direction::new(-1, 1).is_diagonal());
        assert!(!Direction::new(2, 1).is_diagonal());
        assert!(!Direction::new(2, 1).is_orthogonal());
        assert_eq!(Direction::new(-1, 1).reversed(), Direction::new(1, -1));
    }

    #[test]
    fn revoking_rights_is_per_side_and_wing() {
        let mut rights = CastlingRights::ALL;
        rights.revoke_queenside(Color::Dark);
        assert!(rights.kingside(Color::Dark));
        assert!(!rights.queenside(Color::Dark));
        rights.revoke_all(Color::Light);
        assert!(!rights.kingside(Color::Light) && !rights.queenside(Color::Light));
        assert!(rights.kingside(Color::Dark));
    }
}
