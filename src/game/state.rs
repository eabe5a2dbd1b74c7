use super::action::Direction;

/// A cell coordinate on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another cell
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The snake in the game
///
/// Segments are stored in body order: the tail is the first element and
/// the head is the last. Advancing the snake pushes the new head onto the
/// end; an ordinary (non-growing) move also vacates the tail at the front.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail first, head last
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// Create a snake with the given head, heading and length
    ///
    /// Body segments trail behind the head opposite to the heading.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length)
            .map(|i| {
                let back = (length - 1 - i) as i32;
                head.moved_by(-dx * back, -dy * back)
            })
            .collect();

        Self { body, direction }
    }

    /// Head position (last segment)
    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Tail position (first segment)
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// Whether any segment occupies the given cell
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Remove and return the tail cell, vacating it for this step
    pub fn vacate_tail(&mut self) -> Position {
        self.body.remove(0)
    }

    /// Append a new head cell
    pub fn advance(&mut self, new_head: Position) {
        self.body.push(new_head);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Apples eaten this game
    pub apples_eaten: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, apple: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            apple,
            grid_width,
            grid_height,
            apples_eaten: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Whether a candidate cell would be lethal: out of bounds or occupied
    /// by the current snake body (lookahead only, the snake does not move)
    pub fn is_dangerous(&self, pos: Position) -> bool {
        !self.is_in_bounds(pos) || self.snake.contains(pos)
    }

    /// Score, defined as the current snake length
    pub fn score(&self) -> usize {
        self.snake.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(12, 5);
        assert_eq!(a.manhattan_distance(Position::new(13, 5)), 1);
        assert_eq!(a.manhattan_distance(Position::new(0, 0)), 17);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_snake_creation_head_last() {
        let snake = Snake::new(Position::new(12, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.body,
            vec![
                Position::new(10, 5),
                Position::new(11, 5),
                Position::new(12, 5)
            ]
        );
        assert_eq!(snake.head(), Position::new(12, 5));
        assert_eq!(snake.tail(), Position::new(10, 5));
    }

    #[test]
    fn test_snake_creation_all_headings() {
        for dir in [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            let snake = Snake::new(Position::new(10, 10), dir, 3);
            assert_eq!(snake.head(), Position::new(10, 10));
            // Segments are distinct
            for (i, a) in snake.body.iter().enumerate() {
                for b in snake.body.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_vacate_then_advance() {
        let mut snake = Snake::new(Position::new(12, 5), Direction::Right, 3);
        let vacated = snake.vacate_tail();
        assert_eq!(vacated, Position::new(10, 5));
        snake.advance(Position::new(13, 5));
        assert_eq!(
            snake.body,
            vec![
                Position::new(11, 5),
                Position::new(12, 5),
                Position::new(13, 5)
            ]
        );
    }

    #[test]
    fn test_contains() {
        let snake = Snake::new(Position::new(12, 5), Direction::Right, 3);
        assert!(snake.contains(Position::new(12, 5)));
        assert!(snake.contains(Position::new(10, 5)));
        assert!(!snake.contains(Position::new(13, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            50,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(49, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(50, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_danger_lookahead() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            50,
            20,
        );

        // Wall
        assert!(state.is_dangerous(Position::new(-1, 5)));
        // Own body
        assert!(state.is_dangerous(Position::new(4, 5)));
        // Free cell
        assert!(!state.is_dangerous(Position::new(6, 5)));
    }

    #[test]
    fn test_score_is_length() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            50,
            20,
        );
        assert_eq!(state.score(), 3);
    }
}
