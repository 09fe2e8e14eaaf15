//! Screen geometry: square rectangles, spare-piece rectangles and hit testing.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::Orientation;
use crate::board::{Piece, PieceCode, Square};

/// Axis-aligned rectangle in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Same-size rectangle centered on a point.
    #[must_use]
    pub fn centered_on(&self, x: f64, y: f64) -> Rect {
        Rect::new(x - self.width / 2.0, y - self.height / 2.0, self.width, self.height)
    }
}

/// Where a pointer is relative to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Location {
    Square(Square),
    Offboard,
}

impl Location {
    #[inline]
    #[must_use]
    pub const fn square(self) -> Option<Square> {
        match self {
            Location::Square(sq) => Some(sq),
            Location::Offboard => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Square(sq) => write!(f, "{sq}"),
            Location::Offboard => f.write_str("offboard"),
        }
    }
}

/// The rendering layer's view of where things are on screen.
pub trait BoardGeometry {
    /// Screen rectangle of a square.
    fn square_rect(&self, square: Square, orientation: Orientation) -> Rect;

    /// Screen rectangle of a spare piece, if spare pieces are shown.
    fn spare_piece_rect(&self, piece: PieceCode, orientation: Orientation) -> Option<Rect>;

    /// The square under a point, or `Location::Offboard`.
    fn hit_test(&self, x: f64, y: f64, orientation: Orientation) -> Location;

    /// Recompute the layout for a new board width.
    fn resize(&mut self, board_width: f64);

    /// Show or hide the spare-piece rows.
    fn show_spare_pieces(&mut self, _shown: bool) {}
}

/// An 8x8 grid of equal squares, with optional spare-piece rows above and
/// below the board.
///
/// The top spare row holds the pieces of the color drawn at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub square_size: f64,
    pub spare_pieces: bool,
}

impl GridGeometry {
    #[must_use]
    pub fn new(origin_x: f64, origin_y: f64, square_size: f64) -> Self {
        GridGeometry {
            origin_x,
            origin_y,
            square_size,
            spare_pieces: false,
        }
    }

    #[must_use]
    pub fn with_spare_pieces(mut self, spare_pieces: bool) -> Self {
        self.spare_pieces = spare_pieces;
        self
    }

    /// (column, row) of a square as drawn, both counted from the top left.
    fn cell(square: Square, orientation: Orientation) -> (usize, usize) {
        let drawn = match orientation {
            Orientation::White => square,
            Orientation::Black => square.flip_vertical().flip_horizontal(),
        };
        (drawn.file(), 7 - drawn.rank())
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        GridGeometry::new(0.0, 0.0, 50.0)
    }
}

impl BoardGeometry for GridGeometry {
    fn square_rect(&self, square: Square, orientation: Orientation) -> Rect {
        let (col, row) = Self::cell(square, orientation);
        Rect::new(
            self.origin_x + col as f64 * self.square_size,
            self.origin_y + row as f64 * self.square_size,
            self.square_size,
            self.square_size,
        )
    }

    fn spare_piece_rect(&self, piece: PieceCode, orientation: Orientation) -> Option<Rect> {
        if !self.spare_pieces {
            return None;
        }
        let slot = Piece::SPARE_ORDER.iter().position(|&p| p == piece.piece)?;
        let y = if piece.color == orientation.bottom() {
            self.origin_y + 8.0 * self.square_size
        } else {
            self.origin_y - self.square_size
        };
        // Slots 1..=6 of an eight-wide row.
        let x = self.origin_x + (slot + 1) as f64 * self.square_size;
        Some(Rect::new(x, y, self.square_size, self.square_size))
    }

    fn hit_test(&self, x: f64, y: f64, orientation: Orientation) -> Location {
        if self.square_size <= 0.0 {
            return Location::Offboard;
        }
        let col = ((x - self.origin_x) / self.square_size).floor();
        let row = ((y - self.origin_y) / self.square_size).floor();
        if !(0.0..8.0).contains(&col) || !(0.0..8.0).contains(&row) {
            return Location::Offboard;
        }
        let (col, row) = (col as usize, row as usize);
        let drawn = Square::new(7 - row, col);
        let square = match orientation {
            Orientation::White => drawn,
            Orientation::Black => drawn.map(|sq| sq.flip_vertical().flip_horizontal()),
        };
        square.map_or(Location::Offboard, Location::Square)
    }

    fn resize(&mut self, board_width: f64) {
        self.square_size = (board_width / 8.0).floor().max(0.0);
    }

    fn show_spare_pieces(&mut self, shown: bool) {
        self.spare_pieces = shown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_rect_white() {
        let geometry = GridGeometry::new(10.0, 20.0, 50.0);
        let a8 = geometry.square_rect(sq("a8"), Orientation::White);
        assert_eq!(a8, Rect::new(10.0, 20.0, 50.0, 50.0));
        let h1 = geometry.square_rect(sq("h1"), Orientation::White);
        assert_eq!(h1, Rect::new(360.0, 370.0, 50.0, 50.0));
    }

    #[test]
    fn test_square_rect_black_is_rotated() {
        let geometry = GridGeometry::new(0.0, 0.0, 50.0);
        let h1 = geometry.square_rect(sq("h1"), Orientation::Black);
        assert_eq!(h1, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_hit_test_round_trips_square_centers() {
        let geometry = GridGeometry::new(5.0, 5.0, 40.0);
        for orientation in [Orientation::White, Orientation::Black] {
            for square in Square::ALL {
                let rect = geometry.square_rect(square, orientation);
                let hit = geometry.hit_test(rect.x + 20.0, rect.y + 20.0, orientation);
                assert_eq!(hit, Location::Square(square));
            }
        }
    }

    #[test]
    fn test_hit_test_offboard() {
        let geometry = GridGeometry::new(0.0, 0.0, 50.0);
        assert_eq!(geometry.hit_test(-1.0, 10.0, Orientation::White), Location::Offboard);
        assert_eq!(geometry.hit_test(10.0, 400.0, Orientation::White), Location::Offboard);
        assert_eq!(geometry.hit_test(400.0, 10.0, Orientation::White), Location::Offboard);
    }

    #[test]
    fn test_spare_rows() {
        let geometry = GridGeometry::new(0.0, 50.0, 50.0).with_spare_pieces(true);
        let white_king = geometry
            .spare_piece_rect("wK".parse().unwrap(), Orientation::White)
            .unwrap();
        assert_eq!(white_king, Rect::new(50.0, 450.0, 50.0, 50.0));
        let black_pawn = geometry
            .spare_piece_rect("bP".parse().unwrap(), Orientation::White)
            .unwrap();
        assert_eq!(black_pawn, Rect::new(300.0, 0.0, 50.0, 50.0));
        assert_eq!(
            geometry.hit_test(white_king.x + 1.0, white_king.y + 1.0, Orientation::White),
            Location::Offboard
        );
        let hidden = GridGeometry::new(0.0, 0.0, 50.0);
        assert!(hidden
            .spare_piece_rect("wK".parse().unwrap(), Orientation::White)
            .is_none());
    }

    #[test]
    fn test_resize() {
        let mut geometry = GridGeometry::default();
        geometry.resize(403.0);
        assert_eq!(geometry.square_size, 50.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.9, 9.9));
        assert!(!rect.contains(10.0, 5.0));
    }
}
