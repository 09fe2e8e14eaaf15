//! Sparse square-to-piece positions and the predicates around them.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{BoardError, PositionError};
use super::fen::{fen_to_position, START_FEN};
use super::{BoardMove, PieceCode, Square};

static START_POSITION: Lazy<Position> =
    Lazy::new(|| fen_to_position(START_FEN).unwrap_or_default());

/// A mapping from occupied squares to the pieces on them.
///
/// Absent squares are empty. Iteration follows square enumeration order
/// (files-then-ranks). Positions are plain values: every hand-off between
/// the board and its host is a clone, so a retained copy never aliases the
/// board's own state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position(BTreeMap<Square, PieceCode>);

impl Position {
    /// The empty board.
    #[must_use]
    pub fn empty() -> Self {
        Position(BTreeMap::new())
    }

    /// The standard initial position.
    #[must_use]
    pub fn start() -> Self {
        START_POSITION.clone()
    }

    /// Build a position from untyped square/piece strings.
    ///
    /// Fails on the first key that is not a square or value that is not a
    /// piece code.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PositionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut position = Position::empty();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let square = key
                .parse::<Square>()
                .map_err(|_| PositionError::InvalidSquare {
                    key: key.to_string(),
                })?;
            let piece = value
                .parse::<PieceCode>()
                .map_err(|_| PositionError::InvalidPiece {
                    square: key.to_string(),
                    value: value.to_string(),
                })?;
            position.put(square, piece);
        }
        Ok(position)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, square: Square) -> Option<PieceCode> {
        self.0.get(&square).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        self.0.contains_key(&square)
    }

    /// Place a piece, returning whatever stood there before.
    pub fn put(&mut self, square: Square, piece: PieceCode) -> Option<PieceCode> {
        self.0.insert(square, piece)
    }

    /// Empty a square, returning the piece that stood there.
    pub fn remove(&mut self, square: Square) -> Option<PieceCode> {
        self.0.remove(&square)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Occupied squares and their pieces, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.0.iter().map(|(sq, piece)| (*sq, *piece))
    }

    /// Occupied squares in enumeration order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(Square, PieceCode)> for Position {
    fn from_iter<T: IntoIterator<Item = (Square, PieceCode)>>(iter: T) -> Self {
        Position(iter.into_iter().collect())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Position::from_pairs(raw).map_err(serde::de::Error::custom)
    }
}

/// Input accepted wherever the board takes a new position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionInput {
    /// The `"start"` keyword
    Start,
    /// A FEN string; trailing fields are ignored
    Fen(String),
    Position(Position),
    /// No position at all, treated as the empty board
    Empty,
}

impl From<&str> for PositionInput {
    fn from(s: &str) -> Self {
        if s == "start" {
            PositionInput::Start
        } else {
            PositionInput::Fen(s.to_string())
        }
    }
}

impl From<String> for PositionInput {
    fn from(s: String) -> Self {
        PositionInput::from(s.as_str())
    }
}

impl From<Position> for PositionInput {
    fn from(position: Position) -> Self {
        PositionInput::Position(position)
    }
}

impl From<&Position> for PositionInput {
    fn from(position: &Position) -> Self {
        PositionInput::Position(position.clone())
    }
}

impl From<Option<Position>> for PositionInput {
    fn from(position: Option<Position>) -> Self {
        position.map_or(PositionInput::Empty, PositionInput::Position)
    }
}

/// Resolve any accepted position input to a concrete position.
pub fn normalize_position(input: impl Into<PositionInput>) -> Result<Position, BoardError> {
    match input.into() {
        PositionInput::Start => Ok(Position::start()),
        PositionInput::Fen(fen) => Ok(fen_to_position(&fen)?),
        PositionInput::Position(position) => Ok(position),
        PositionInput::Empty => Ok(Position::empty()),
    }
}

/// Returns true if `s` names one of the 64 squares (`a1`..`h8`).
#[must_use]
pub fn valid_square(s: &str) -> bool {
    s.parse::<Square>().is_ok()
}

/// Returns true if `s` is a color letter followed by a piece letter (`wK`, `bP`, ...).
#[must_use]
pub fn valid_piece_code(s: &str) -> bool {
    s.parse::<PieceCode>().is_ok()
}

/// Returns true if `s` has the form `"<square>-<square>"`.
#[must_use]
pub fn valid_move(s: &str) -> bool {
    s.parse::<BoardMove>().is_ok()
}

/// Returns true if every key is a square and every value a piece code.
#[must_use]
pub fn valid_position<I, K, V>(pairs: I) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .all(|(k, v)| valid_square(k.as_ref()) && valid_piece_code(v.as_ref()))
}

/// Chebyshev distance between two squares.
#[inline]
#[must_use]
pub fn square_distance(a: Square, b: Square) -> u8 {
    a.distance(b)
}

/// Find the nearest square (other than `from`) holding `piece`.
///
/// Squares are visited by ascending distance from `from`; equidistant
/// squares keep their enumeration order, so the first match in
/// files-then-ranks order wins a tie.
#[must_use]
pub fn find_closest_piece(position: &Position, piece: PieceCode, from: Square) -> Option<Square> {
    let mut radius: Vec<Square> = Square::ALL.iter().copied().filter(|&sq| sq != from).collect();
    radius.sort_by_key(|sq| sq.distance(from));
    radius
        .into_iter()
        .find(|&sq| position.get(sq) == Some(piece))
}

/// Relocate pieces, one `from -> to` pair at a time.
///
/// Moves whose `from` square is empty (at the time the move is applied) are
/// skipped. A piece landing on an occupied square replaces its occupant.
#[must_use]
pub fn apply_moves<I>(position: &Position, moves: I) -> Position
where
    I: IntoIterator<Item = BoardMove>,
{
    let mut next = position.clone();
    for mv in moves {
        if let Some(piece) = next.remove(mv.from) {
            next.put(mv.to, piece);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn pc(s: &str) -> PieceCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_valid_square_accepts_exactly_64() {
        let mut count = 0;
        for file in 'a'..='j' {
            for rank in '0'..='9' {
                if valid_square(&format!("{file}{rank}")) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 64);
        assert!(!valid_square("i1"));
        assert!(!valid_square("a9"));
        assert!(!valid_square("A1"));
        assert!(!valid_square(""));
    }

    #[test]
    fn test_valid_piece_code() {
        assert!(valid_piece_code("wK"));
        assert!(valid_piece_code("bP"));
        assert!(!valid_piece_code("wk"));
        assert!(!valid_piece_code("gK"));
        assert!(!valid_piece_code("K"));
    }

    #[test]
    fn test_valid_move() {
        assert!(valid_move("e2-e4"));
        assert!(valid_move("a1-a1"));
        assert!(!valid_move("e2e4"));
        assert!(!valid_move("e2-e9"));
        assert!(!valid_move("-e4"));
    }

    #[test]
    fn test_valid_position() {
        assert!(valid_position([("e4", "wP"), ("d5", "bP")]));
        assert!(valid_position(Vec::<(String, String)>::new()));
        assert!(!valid_position([("e4", "wP"), ("z9", "bP")]));
        assert!(!valid_position([("e4", "xP")]));
    }

    #[test]
    fn test_from_pairs_reports_offender() {
        let err = Position::from_pairs([("e4", "wP"), ("e5", "bX")]).unwrap_err();
        assert_eq!(
            err,
            PositionError::InvalidPiece {
                square: "e5".to_string(),
                value: "bX".to_string()
            }
        );
        let err = Position::from_pairs([("k1", "wP")]).unwrap_err();
        assert!(matches!(err, PositionError::InvalidSquare { .. }));
    }

    #[test]
    fn test_normalize_position() {
        assert_eq!(normalize_position("start").unwrap(), Position::start());
        assert_eq!(normalize_position(None::<Position>).unwrap(), Position::empty());
        let fen = normalize_position("8/8/8/8/4P3/8/8/8 w - - 0 1").unwrap();
        assert_eq!(fen.get(sq("e4")), Some(pc("wP")));
        let explicit: Position = [(sq("a1"), pc("wR"))].into_iter().collect();
        assert_eq!(normalize_position(explicit.clone()).unwrap(), explicit);
        assert!(matches!(
            normalize_position("not a fen"),
            Err(BoardError::Fen(_))
        ));
    }

    #[test]
    fn test_square_distance() {
        assert_eq!(square_distance(sq("e4"), sq("e4")), 0);
        assert_eq!(square_distance(sq("e4"), sq("f6")), 2);
        assert_eq!(square_distance(sq("a8"), sq("h1")), 7);
    }

    #[test]
    fn test_find_closest_piece() {
        let position: Position = [
            (sq("a1"), pc("wR")),
            (sq("h1"), pc("wR")),
            (sq("d4"), pc("bN")),
        ]
        .into_iter()
        .collect();
        assert_eq!(find_closest_piece(&position, pc("wR"), sq("b2")), Some(sq("a1")));
        assert_eq!(find_closest_piece(&position, pc("wR"), sq("g3")), Some(sq("h1")));
        assert_eq!(find_closest_piece(&position, pc("wQ"), sq("g3")), None);
        // The square itself never counts.
        assert_eq!(find_closest_piece(&position, pc("bN"), sq("d4")), None);
    }

    #[test]
    fn test_find_closest_piece_tie_uses_enumeration_order() {
        // d3 and f5 are both one square from e4; d3 comes first.
        let position: Position = [(sq("f5"), pc("wN")), (sq("d3"), pc("wN"))]
            .into_iter()
            .collect();
        assert_eq!(find_closest_piece(&position, pc("wN"), sq("e4")), Some(sq("d3")));
    }

    #[test]
    fn test_apply_moves() {
        let start = Position::start();
        let moved = apply_moves(&start, ["e2-e4".parse().unwrap(), "g8-f6".parse().unwrap()]);
        assert_eq!(moved.get(sq("e4")), Some(PieceCode::new(Color::White, Piece::Pawn)));
        assert!(!moved.contains(sq("e2")));
        assert_eq!(moved.get(sq("f6")), Some(pc("bN")));
        assert_eq!(moved.len(), 32);
        // Retained copy is unaffected.
        assert!(start.contains(sq("e2")));
    }

    #[test]
    fn test_apply_moves_skips_empty_source_and_captures() {
        let position: Position = [(sq("e4"), pc("wP")), (sq("d5"), pc("bP"))]
            .into_iter()
            .collect();
        let next = apply_moves(&position, ["a3-a4".parse().unwrap(), "e4-d5".parse().unwrap()]);
        assert_eq!(next.len(), 1);
        assert_eq!(next.get(sq("d5")), Some(pc("wP")));
    }
}
