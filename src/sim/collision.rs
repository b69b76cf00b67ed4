//! Axis-aligned overlap tests
//!
//! Boxes are `Piece` rectangles anchored at their top-left corner. Touching
//! edges do not count: a crash needs a strictly positive overlap area.

use super::state::Piece;

/// True when the two boxes share a positive area
#[inline]
pub fn overlaps(a: &Piece, b: &Piece) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// True once a falling piece's top edge has reached the bottom of the arena
#[inline]
pub fn below_arena(piece: &Piece, arena_height: f32) -> bool {
    piece.position.y >= arena_height
}
