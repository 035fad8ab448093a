use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    game::board::{are_adjacent, Board},
    models::Position,
};

/// What a call to [`PathTracker::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// The cell was pushed onto the path.
    Appended,
    /// The cell was the last one selected and has been popped.
    Undone,
    /// Nothing changed.
    Rejected,
}

impl Selection {
    pub fn changed(self) -> bool {
        self != Selection::Rejected
    }
}

/// The player's in-progress selection: a stack of distinct cells where each
/// cell is adjacent to the one below it.
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
    stack: Vec<Position>,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `pos` on `board`.
    ///
    /// Re-selecting the top of the stack pops it. Re-selecting any other cell
    /// already on the stack is rejected, as is a new cell that is off the
    /// board, blank, or not adjacent to the top.
    pub fn select(&mut self, board: &Board, pos: Position) -> Selection {
        if board.face_at(pos).map_or(true, str::is_empty) {
            return Selection::Rejected;
        }

        if self.stack.last() == Some(&pos) {
            self.stack.pop();
            return Selection::Undone;
        }

        if self.stack.contains(&pos) {
            return Selection::Rejected;
        }

        match self.stack.last() {
            Some(&top) if !are_adjacent(top, pos) => Selection::Rejected,
            _ => {
                self.stack.push(pos);
                Selection::Appended
            }
        }
    }

    pub fn reset(&mut self) {
        self.stack.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn path(&self) -> &[Position] {
        &self.stack
    }

    /// Faces of the selected cells concatenated in selection order.
    pub fn current_word(&self, board: &Board) -> String {
        extract_word(board, &self.stack)
    }
}

/// Extract word from grid positions
pub fn extract_word(board: &Board, positions: &[Position]) -> String {
    positions
        .iter()
        .filter_map(|&pos| board.face_at(pos))
        .collect()
}

/// Validate that positions form a valid path on the board
pub fn is_valid_path(board: &Board, positions: &[Position]) -> bool {
    if positions.is_empty() {
        return false;
    }

    // Check that each position is adjacent to the previous one
    if !positions.windows(2).all(|w| are_adjacent(w[0], w[1])) {
        return false;
    }

    // Check that no position is used twice
    let unique_positions: HashSet<_> = positions.iter().collect();
    if unique_positions.len() != positions.len() {
        return false;
    }

    positions.iter().all(|&pos| board.contains(pos))
}
