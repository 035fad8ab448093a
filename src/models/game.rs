use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{path::Selection, Board};

/// Largest board a client may supply
pub const MAX_BOARD_CELLS: usize = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Explicit board layout supplied by a client, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLayout {
    pub rows: usize,
    pub cols: usize,
    pub faces: Vec<String>,
}

impl BoardLayout {
    /// Build the board, or `None` if it is larger than [`MAX_BOARD_CELLS`]
    /// or has more faces than cells. Fewer faces than cells is allowed; the
    /// remainder read as empty.
    pub fn into_board(self) -> Option<Board> {
        let cells = self.rows.checked_mul(self.cols)?;
        if cells > MAX_BOARD_CELLS || self.faces.len() > cells {
            return None;
        }
        Some(Board::new(self.rows, self.cols, self.faces))
    }
}

/// Result of committing the current word.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WordOutcome {
    New,
    Duplicate,
    Invalid,
    /// The round's timer has run out.
    RoundOver,
}

/// Snapshot of a round as seen by a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: Uuid,
    pub rows: usize,
    pub cols: usize,
    pub board: Vec<Vec<String>>,
    pub current_word: String,
    pub path: Vec<Position>,
    pub found_words: Vec<String>,
    pub score: u32,
    pub started_at: DateTime<Utc>,
    pub time_remaining: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionView {
    pub selection: Selection,
    pub word: String,
    pub path: Vec<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitView {
    pub word: String,
    pub outcome: WordOutcome,
    pub points: u32,
    pub score: u32,
}

/// Every word on a board, sorted, with the best possible score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveSummary {
    pub words: Vec<String>,
    pub count: usize,
    pub max_score: u32,
}
