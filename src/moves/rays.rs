//! Fixed direction and offset tables.

use crate::game_state::chess_types::{Color, Direction};

/// Orthogonal rays: up, left, down, right.
pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
];

/// Diagonal rays.
pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

/// All eight rays, orthogonal first. This is also the king's step set.
pub const QUEEN_DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KING_OFFSETS: [Direction; 8] = QUEEN_DIRECTIONS;

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, 2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
    Direction::new(-1, -2),
    Direction::new(1, -2),
];

/// The two diagonal steps a pawn of `color` captures along.
#[inline]
pub const fn pawn_capture_directions(color: Color) -> [Direction; 2] {
    let forward = color.pawn_forward();
    [Direction::new(forward, -1), Direction::new(forward, 1)]
}
