use std::collections::HashSet;

use super::direction::Direction;
use super::grid::{Grid, Position};

/// One cell of the snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    /// Direction this segment moves on the next tick; None until the game starts
    pub direction: Option<Direction>,
}

impl Segment {
    pub fn new(position: Position, direction: Option<Direction>) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Segment>,
}

impl Snake {
    /// Create a motionless snake whose body trails behind `head`, opposite `facing`
    pub fn new(head: Position, facing: Direction, length: usize) -> Self {
        let back = facing.opposite();
        let mut segments = Vec::with_capacity(length.max(1));
        let mut position = head;

        for _ in 0..length.max(1) {
            segments.push(Segment::new(position, None));
            position = position.moved_in_direction(back);
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }

    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.positions().collect()
    }

    /// Check if any segment sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if every pair of consecutive segments shares an edge
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].position.is_adjacent(pair[1].position))
    }

    /// Give the head its first direction and point the body along `body_facing`
    pub(crate) fn launch(&mut self, head_direction: Direction, body_facing: Direction) {
        self.segments[0].direction = Some(head_direction);
        for segment in self.segments.iter_mut().skip(1) {
            segment.direction = Some(body_facing);
        }
    }

    pub(crate) fn steer(&mut self, direction: Direction) {
        self.segments[0].direction = Some(direction);
    }

    /// Move every segment one step along its own direction, then hand each
    /// segment the direction its predecessor held before the move.
    ///
    /// Returns the direction the tail moved with.
    pub(crate) fn slither(&mut self) -> Option<Direction> {
        let handoff: Vec<Option<Direction>> =
            self.segments.iter().map(|segment| segment.direction).collect();

        for segment in &mut self.segments {
            if let Some(direction) = segment.direction {
                segment.position = segment.position.moved_in_direction(direction);
            }
        }

        for (segment, inherited) in self.segments.iter_mut().skip(1).zip(&handoff) {
            segment.direction = *inherited;
        }

        handoff.last().copied().flatten()
    }

    /// Append a new tail segment on `position`
    pub(crate) fn grow_tail(&mut self, position: Position, direction: Option<Direction>) {
        self.segments.push(Segment::new(position, direction));
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Spawned, waiting for the first direction
    NotStarted,
    Running,
    /// Terminal until the next reset
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Option<Position>,
    pub score: u32,
    /// Ticks during which the tail still extends instead of following
    pub pending_growth: u32,
    pub phase: Phase,
    /// Completed ticks
    pub steps: u32,
    /// Direction the head last moved, or the spawn direction before the first move
    pub heading: Direction,
    /// Set when a collision ended the game
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(grid: Grid, snake: Snake, food: Option<Position>, heading: Direction) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            pending_growth: 0,
            phase: Phase::NotStarted,
            steps: 0,
            heading,
            collision: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(1, 4), Direction::Right, 4);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head().position, Position::new(1, 4));
        assert_eq!(snake.tail().position, Position::new(1, 1));
        assert!(snake.segments().iter().all(|s| s.direction.is_none()));
        assert!(snake.is_contiguous());
    }

    #[test]
    fn test_snake_minimum_length() {
        let snake = Snake::new(Position::new(0, 0), Direction::Down, 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_launch_sets_directions() {
        let mut snake = Snake::new(Position::new(1, 4), Direction::Right, 3);
        snake.launch(Direction::Up, Direction::Right);

        assert_eq!(snake.head().direction, Some(Direction::Up));
        assert_eq!(snake.segments()[1].direction, Some(Direction::Right));
        assert_eq!(snake.tail().direction, Some(Direction::Right));
    }

    #[test]
    fn test_slither_follows_the_head() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.launch(Direction::Down, Direction::Right);

        let tail_moved = snake.slither();

        assert_eq!(tail_moved, Some(Direction::Right));
        let positions: Vec<_> = snake.positions().collect();
        assert_eq!(
            positions,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(5, 4)]
        );
        assert_eq!(snake.segments()[1].direction, Some(Direction::Down));
        assert_eq!(snake.tail().direction, Some(Direction::Right));
        assert!(snake.is_contiguous());

        snake.slither();
        let positions: Vec<_> = snake.positions().collect();
        assert_eq!(
            positions,
            vec![Position::new(7, 5), Position::new(6, 5), Position::new(5, 5)]
        );
        assert!(snake.segments().iter().all(|s| s.direction == Some(Direction::Down)));
    }

    #[test]
    fn test_grow_tail() {
        let mut snake = Snake::new(Position::new(2, 2), Direction::Right, 2);
        snake.grow_tail(Position::new(2, 0), Some(Direction::Right));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail().position, Position::new(2, 0));
        assert!(snake.is_contiguous());
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(5, 3)));
        assert!(!snake.occupies(Position::new(5, 6)));
        assert_eq!(snake.occupied_cells().len(), 3);
    }

    #[test]
    fn test_new_state() {
        let grid = Grid::new(10, 10).unwrap();
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = GameState::new(grid, snake, Some(Position::new(0, 0)), Direction::Right);

        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.pending_growth, 0);
        assert!(!state.is_running());
        assert!(!state.is_over());
        assert!(state.is_occupied_by_snake(Position::new(5, 4)));
    }
}
