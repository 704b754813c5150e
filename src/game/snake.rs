use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the grid the snake is
/// on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake's segments, starting with the
    /// one right behind the head and ending with the tail
    pub(super) body: VecDeque<Position>,

    /// The maximum total length of the snake, head included
    pub(super) capacity: usize,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head` facing in
    /// `direction`
    pub(super) fn new(head: Position, direction: Direction, capacity: usize) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            capacity,
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the segments behind the head
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Iterate over all segments, head first
    #[cfg(test)]
    pub(crate) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        }
    }

    /// Change the snake's direction to `direction` unless that would turn it
    /// straight back onto itself.  Returns whether the direction changed.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction || direction == self.direction.reverse() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Move the head to `pos`, with every other segment taking the place of
    /// the one in front of it.  If `grow` is true, the old tail cell is kept
    /// as a new last segment.
    pub(super) fn slither(&mut self, pos: Position, grow: bool) {
        self.body.push_front(self.head);
        self.head = pos;
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Is the head on top of any other segment?
    pub(super) fn bit_itself(&self) -> bool {
        self.body.contains(&self.head)
    }
}
