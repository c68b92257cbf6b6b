use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Direction a snake segment moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (d_row, d_col) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a WASD key, in either case, to a direction
    pub fn from_key(key: char) -> Result<Self, GameError> {
        match key.to_ascii_lowercase() {
            'w' => Ok(Direction::Up),
            'a' => Ok(Direction::Left),
            's' => Ok(Direction::Down),
            'd' => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection(key.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "a" => Ok(Direction::Left),
            "right" | "d" => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(Direction::from_key('w'), Ok(Direction::Up));
        assert_eq!(Direction::from_key('W'), Ok(Direction::Up));
        assert_eq!(Direction::from_key('A'), Ok(Direction::Left));
        assert_eq!(Direction::from_key('s'), Ok(Direction::Down));
        assert_eq!(Direction::from_key('D'), Ok(Direction::Right));
    }

    #[test]
    fn test_unknown_key_is_invalid() {
        assert_eq!(
            Direction::from_key('x'),
            Err(GameError::InvalidDirection("x".to_string()))
        );
        assert!(Direction::from_key(',').is_err());
    }

    #[test]
    fn test_parse_direction_names() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("RIGHT".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" left ".parse::<Direction>(), Ok(Direction::Left));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
        let parsed: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, Direction::Down);
    }
}
