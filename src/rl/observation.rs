use crate::game::{Direction, GameState, Turn};

/// Length of the compact feature encoding
pub const COMPACT_FEATURES: usize = 11;

/// Compact 11-feature observation of the game state
///
/// Features, in order, each 0.0 or 1.0:
/// - danger if continuing straight
/// - danger if turning right
/// - danger if turning left
/// - heading one-hot (Up, Right, Down, Left)
/// - apple left of head, right of head, above head, below head
///
/// Danger is a lookahead against the walls and the current (pre-move) body.
pub fn compact_observation(state: &GameState) -> Vec<f32> {
    let head = state.snake.head();
    let heading = state.snake.direction;
    let apple = state.apple;

    let danger = |turn: Turn| -> f32 {
        let cell = head.moved_in_direction(heading.turned(turn));
        bit(state.is_dangerous(cell))
    };

    vec![
        danger(Turn::Straight),
        danger(Turn::Right),
        danger(Turn::Left),
        bit(heading == Direction::Up),
        bit(heading == Direction::Right),
        bit(heading == Direction::Down),
        bit(heading == Direction::Left),
        bit(apple.x < head.x),
        bit(apple.x > head.x),
        bit(apple.y < head.y),
        bit(apple.y > head.y),
    ]
}

/// Full-grid observation: one cell code per grid cell, row-major
///
/// Cell codes: empty 0, body 2, head 1, apple 3. Cells the snake holds
/// outside the grid (a dead head) are skipped.
pub fn grid_observation(state: &GameState) -> Vec<f32> {
    let width = state.grid_width;
    let mut cells = vec![0.0; width * state.grid_height];

    for &pos in &state.snake.body {
        if state.is_in_bounds(pos) {
            cells[pos.y as usize * width + pos.x as usize] = 2.0;
        }
    }

    let head = state.snake.head();
    if state.is_in_bounds(head) {
        cells[head.y as usize * width + head.x as usize] = 1.0;
    }

    cells[state.apple.y as usize * width + state.apple.x as usize] = 3.0;

    cells
}

fn bit(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}
