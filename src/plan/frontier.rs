//! Wing cursors for economy expansion.
//!
//! New factories grow along two diagonal fronts from fixed seed cells, one
//! per wing, alternating left and right. A cursor advances one diagonal
//! step inward only when its cell was actually placed; a rejected cell is
//! retried on the next eligible turn rather than skipped, and nothing ever
//! rolls a cursor back. The state lives for the whole match.

use crate::board::location::Location;

/// One of the two diagonal expansion fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wing {
    Left,
    Right,
}

impl Wing {
    pub const fn other(self) -> Wing {
        match self {
            Wing::Left => Wing::Right,
            Wing::Right => Wing::Left,
        }
    }
}

/// The two wing cursors and whose turn it is to grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierState {
    left: Location,
    right: Location,
    next: Wing,
}

impl FrontierState {
    /// Starts both cursors at their seeds; the left wing grows first.
    pub fn new(left_seed: Location, right_seed: Location) -> Self {
        FrontierState {
            left: left_seed,
            right: right_seed,
            next: Wing::Left,
        }
    }

    /// The wing whose cursor should be tried next.
    pub fn next_wing(&self) -> Wing {
        self.next
    }

    /// The cell the given wing would build on.
    pub fn cursor(&self, wing: Wing) -> Location {
        match wing {
            Wing::Left => self.left,
            Wing::Right => self.right,
        }
    }

    /// Records a successful placement on the wing: its cursor advances one
    /// diagonal step inward and the other wing is up next.
    pub fn advance(&mut self, wing: Wing) {
        match wing {
            Wing::Left => self.left = Location::new(self.left.x - 1, self.left.y + 1),
            Wing::Right => self.right = Location::new(self.right.x + 1, self.right.y + 1),
        }
        self.next = wing.other();
    }
}
