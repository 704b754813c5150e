use super::grid::Bounds;
use super::snake::Snake;
use rand::Rng;
use ratatui::layout::Position;

/// Pick a random cell in `bounds` that `snake` does not occupy.  Returns
/// `None` if the snake fills the whole grid.
pub(crate) fn place_food<R: Rng>(
    snake: &Snake,
    bounds: Bounds,
    rng: &mut R,
) -> Option<Position> {
    if snake.len() >= bounds.capacity() {
        return None;
    }
    loop {
        let pos = Position::new(
            rng.random_range(0..bounds.width()),
            rng.random_range(0..bounds.height()),
        );
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}
