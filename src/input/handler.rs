use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            // Movement - WASD
            KeyCode::Char(c) => Direction::from_key(c)
                .map(KeyAction::Steer)
                .unwrap_or(KeyAction::None),

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_for(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_steering_keys() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(
                action_for(code, KeyModifiers::NONE),
                KeyAction::Steer(direction),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_shifted_letters_still_steer() {
        assert_eq!(
            action_for(KeyCode::Char('W'), KeyModifiers::SHIFT),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            action_for(KeyCode::Char('D'), KeyModifiers::SHIFT),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(action_for(KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Char('Q'), KeyModifiers::SHIFT), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Char('R'), KeyModifiers::SHIFT), KeyAction::Restart);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(action_for(KeyCode::Char('x'), KeyModifiers::NONE), KeyAction::None);
        assert_eq!(action_for(KeyCode::Char('c'), KeyModifiers::NONE), KeyAction::None);
        assert_eq!(action_for(KeyCode::Tab, KeyModifiers::NONE), KeyAction::None);
    }
}
