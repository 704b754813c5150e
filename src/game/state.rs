use super::direction::Direction;
use super::food::place_food;
use super::grid::Bounds;
use super::snake::Snake;
use rand::Rng;
use ratatui::layout::Position;

/// The simulation: the snake, the food, and the score on a grid of fixed size
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    snake: Snake,
    food: Option<Position>,
    score: u32,
    status: Status,
    bounds: Bounds,
}

impl GameState {
    /// Start a new game with a one-cell snake in the middle of the grid
    /// heading right
    pub(crate) fn new<R: Rng>(bounds: Bounds, rng: &mut R) -> GameState {
        let snake = Snake::new(bounds.center(), Direction::Right, bounds.capacity());
        let food = place_food(&snake, bounds, rng);
        GameState {
            snake,
            food,
            score: 0,
            status: Status::Running,
            bounds,
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    /// `None` once the snake has filled the entire grid
    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn is_over(&self) -> bool {
        self.status != Status::Running
    }

    /// What ended the game, if it's over
    pub(crate) fn collision(&self) -> Option<Collision> {
        match self.status {
            Status::Running => None,
            Status::GameOver(c) => Some(c),
        }
    }

    /// Point the snake in `direction` for the next step.  Turning straight
    /// back is ignored, as is anything after the game has ended.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !self.is_over() {
            self.snake.turn(direction);
        }
    }

    /// Move the snake one cell forwards, eating the food and checking for
    /// collisions.  Does nothing once the game is over.
    pub(crate) fn advance<R: Rng>(&mut self, rng: &mut R) {
        if self.is_over() {
            return;
        }
        let Some(head) = self.snake.direction().advance(self.snake.head(), self.bounds) else {
            // Leave the snake where it was; there's no cell to put the head in.
            self.game_over(Collision::Wall);
            return;
        };
        let grow = self.food == Some(head) && !self.snake.is_full();
        self.snake.slither(head, grow);
        if grow {
            self.score = self.score.saturating_add(1);
            self.food = place_food(&self.snake, self.bounds, rng);
            tracing::debug!(
                score = self.score,
                length = self.snake.len(),
                food = ?self.food,
                "Snake ate food"
            );
        }
        if self.snake.bit_itself() {
            self.game_over(Collision::Snake);
        }
    }

    fn game_over(&mut self, collision: Collision) {
        tracing::info!(
            ?collision,
            score = self.score,
            length = self.snake.len(),
            "Game over"
        );
        self.status = Status::GameOver(collision);
    }

    /// Build a state with the snake occupying `cells`, head first
    #[cfg(test)]
    pub(crate) fn arranged(
        bounds: Bounds,
        cells: &[(u16, u16)],
        direction: Direction,
        food: Option<(u16, u16)>,
    ) -> GameState {
        let mut cells = cells.iter().map(|&(x, y)| Position::new(x, y));
        let mut snake = Snake::new(
            cells.next().expect("snake should have a head"),
            direction,
            bounds.capacity(),
        );
        snake.body.extend(cells);
        GameState {
            snake,
            food: food.map(|(x, y)| Position::new(x, y)),
            score: 0,
            status: Status::Running,
            bounds,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    Running,
    GameOver(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The snake ran into the edge of the grid
    Wall,
    /// The snake ran into itself
    Snake,
}
