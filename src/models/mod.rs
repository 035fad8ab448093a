pub mod game;

pub use game::{
    // Grid types
    Position,
    // API views
    BoardLayout, CommitView, GameView, SelectionView, SolveSummary, WordOutcome,
};
