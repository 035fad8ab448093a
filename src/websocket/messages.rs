use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BoardLayout, CommitView, GameView, SelectionView, SolveSummary};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start a round; rolls a board unless one is given.
    NewGame {
        #[serde(default)]
        board: Option<BoardLayout>,
    },
    JoinGame {
        game_id: Uuid,
    },
    Select {
        row: usize,
        col: usize,
    },
    Reset,
    Commit,
    Solve,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState(GameView),
    SelectionChanged(SelectionView),
    WordChecked(CommitView),
    Solution(SolveSummary),
    Error { message: String },
}
