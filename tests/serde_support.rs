//! JSON forms of the public value types.
#![cfg(feature = "serde")]

use chessboard::board::{compute_animations, Position, Square};
use chessboard::component::{BoardConfig, Orientation, Speed};

#[test]
fn position_serializes_as_square_map() {
    let position: Position = "8/8/8/8/4P3/8/8/k7".parse().unwrap();
    let json = serde_json::to_string(&position).unwrap();
    assert_eq!(json, r#"{"a1":"bK","e4":"wP"}"#);
    let back: Position = serde_json::from_str(&json).unwrap();
    assert_eq!(back, position);
}

#[test]
fn invalid_position_is_rejected_on_deserialize() {
    assert!(serde_json::from_str::<Position>(r#"{"e9":"wP"}"#).is_err());
    assert!(serde_json::from_str::<Position>(r#"{"e4":"xP"}"#).is_err());
}

#[test]
fn square_serializes_as_string() {
    let square: Square = "h8".parse().unwrap();
    assert_eq!(serde_json::to_string(&square).unwrap(), r#""h8""#);
}

#[test]
fn animations_are_tagged() {
    let before: Position = "8/8/8/8/8/8/4P3/8".parse().unwrap();
    let after: Position = "8/8/8/8/4P3/8/8/8".parse().unwrap();
    let json = serde_json::to_value(compute_animations(&before, &after)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"type": "move", "source": "e2", "destination": "e4", "piece": "wP"}
        ])
    );
}

#[test]
fn config_fills_missing_fields_with_defaults() {
    let config: BoardConfig =
        serde_json::from_str(r#"{"draggable_pieces": true, "orientation": "black", "move_speed": "slow"}"#)
            .unwrap();
    assert!(config.draggable_pieces);
    assert_eq!(config.orientation, Orientation::Black);
    assert_eq!(config.move_speed, Speed::Slow);
    assert_eq!(config.snap_speed.millis(), 30);
}
