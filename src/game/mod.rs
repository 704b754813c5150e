mod direction;
mod food;
mod grid;
mod snake;
mod state;
use self::direction::Direction;
pub(crate) use self::grid::Bounds;
use self::state::GameState;
use crate::app::AppState;
use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::{Duration, Instant};

/// The game screen: paces the simulation, feeds it input, and draws it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::StdRng> {
    rng: R,
    state: GameState,
    tick_period: Duration,
    next_tick: Option<Instant>,
    /// Direction change to apply at the next tick
    turn: Option<Direction>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(bounds: Bounds, tick_period: Duration, mut rng: R) -> Game<R> {
        let state = GameState::new(bounds, &mut rng);
        Game {
            rng,
            state,
            tick_period,
            next_tick: None,
            turn: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> io::Result<Option<AppState<R>>> {
        if self.running() {
            let tick_period = self.tick_period;
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + tick_period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn tick(&mut self) {
        if let Some(direction) = self.turn.take() {
            self.state.set_direction(direction);
        }
        self.state.advance(&mut self.rng);
    }

    fn handle_event(&mut self, event: Event) -> Option<AppState<R>> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => {
                tracing::info!(score = self.state.score(), "Quitting");
                return Some(AppState::Quit);
            }
            Command::Up => self.steer(Direction::Up),
            Command::Right => self.steer(Direction::Right),
            Command::Down => self.steer(Direction::Down),
            Command::Left => self.steer(Direction::Left),
            Command::Restart if !self.running() => self.restart(),
            Command::Restart => (),
        }
        None
    }

    /// Buffer a direction change for the next tick.  Only the first key that
    /// would actually turn the snake counts; the rest are dropped.
    fn steer(&mut self, direction: Direction) {
        let current = self.state.snake().direction();
        if self.running()
            && self.turn.is_none()
            && direction != current
            && direction != current.reverse()
        {
            self.turn = Some(direction);
        }
    }

    fn restart(&mut self) {
        tracing::info!(
            last_score = self.state.score(),
            cause = ?self.state.collision(),
            "Restarting with a new game"
        );
        self.state = GameState::new(self.state.bounds(), &mut self.rng);
        self.next_tick = None;
        self.turn = None;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn running(&self) -> bool {
        !self.state.is_over()
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid_size = self.state.bounds().size();
        let block_size = Size {
            width: grid_size.width.saturating_add(2),
            height: grid_size.height.saturating_add(2),
        };
        let display_size = Size {
            width: block_size.width,
            height: block_size.height.saturating_add(2),
        };
        if area.width < display_size.width || area.height < display_size.height {
            Line::raw(" Terminal too small").render(area, buf);
            return;
        }
        let display = center_rect(area, display_size);
        let [score_area, block_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}", self.state.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut grid = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let snake = self.state.snake();
        for &p in snake.body() {
            grid.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(food) = self.state.food() {
            grid.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.state.is_over() {
            grid.draw_cell(
                snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
            Line::from_iter([
                Span::raw(" GAME OVER — Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg_area, buf);
        } else {
            grid.draw_cell(snake.head(), snake.head_symbol(), consts::SNAKE_STYLE);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` at grid position `pos`.  Positions outside the canvas
    /// are not drawn.
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
