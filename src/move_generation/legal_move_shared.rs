//! Helpers shared by the per-piece generators.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::PinRay;
use crate::moves::move_descriptions::ChessMove;

/// Read-only lookup from square to pin direction, built once per legal move
/// query and shared by every generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinMap {
    cells: [[Option<Direction>; 8]; 8],
}

impl PinMap {
    pub fn from_rays(pins: &[PinRay]) -> Self {
        let mut map = Self::default();
        for pin in pins {
            map.cells[pin.square.row as usize][pin.square.col as usize] = Some(pin.direction);
        }
        map
    }

    #[inline]
    pub fn direction_at(&self, square: Square) -> Option<Direction> {
        self.cells[square.row as usize][square.col as usize]
    }

    /// Whether the piece on `square` may move along `direction`: unpinned
    /// pieces always may, pinned ones only along the pin axis.
    #[inline]
    pub fn allows(&self, square: Square, direction: Direction) -> bool {
        match self.direction_at(square) {
            None => true,
            Some(pin) => pin == direction || pin == direction.reversed(),
        }
    }

    #[inline]
    pub fn is_pinned(&self, square: Square) -> bool {
        self.direction_at(square).is_some()
    }
}

/// Walk `direction` from `from`, pushing quiet moves until blocked; an enemy
/// blocker is included as a capture, an allied one is not.
pub fn push_slides(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    direction: Direction,
    out: &mut Vec<ChessMove>,
) {
    for distance in 1..8 {
        let Some(to) = from.offset(direction, distance) else {
            break;
        };
        match game_state.piece_at(to) {
            None => out.push(ChessMove::new(from, to, piece, &game_state.board)),
            Some(other) => {
                if other.color != piece.color {
                    out.push(ChessMove::new(from, to, piece, &game_state.board));
                }
                break;
            }
        }
    }
}

/// Push the single step `from -> from + offset` if it lands on the board and
/// is not occupied by an ally.
pub fn push_step(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    offset: Direction,
    out: &mut Vec<ChessMove>,
) {
    let Some(to) = from.step(offset) else {
        return;
    };
    if game_state
        .piece_at(to)
        .is_some_and(|other| other.color == piece.color)
    {
        return;
    }
    out.push(ChessMove::new(from, to, piece, &game_state.board));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_map_allows_both_directions_of_the_axis() {
        let pinned = Square::new(6, 4);
        let map = PinMap::from_rays(&[PinRay {
            square: pinned,
            direction: Direction::new(-1, 0),
        }]);
        assert!(map.is_pinned(pinned));
        assert!(map.allows(pinned, Direction::new(-1, 0)));
        assert!(map.allows(pinned, Direction::new(1, 0)));
        assert!(!map.allows(pinned, Direction::new(0, 1)));
        assert!(!map.allows(pinned, Direction::new(-1, -1)));
        assert!(map.allows(Square::new(0, 0), Direction::new(0, 1)));
    }
}
