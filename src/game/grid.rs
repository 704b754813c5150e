use ratatui::layout::{Position, Size};

/// The size of the playing field.  Both dimensions are always nonzero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    width: u16,
    height: u16,
}

impl Bounds {
    /// Returns `None` if either dimension is zero
    pub(crate) fn new(width: u16, height: u16) -> Option<Bounds> {
        (width > 0 && height > 0).then_some(Bounds { width, height })
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The total number of cells, which is also the longest a snake can get
    pub(crate) fn capacity(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}
