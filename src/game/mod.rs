// Word-grid engine: board, dice, selection, solving, scoring and rounds.

pub mod board;
pub mod dice;
pub mod path;
pub mod scorer;
pub mod session;
pub mod solver;

pub use board::Board;
pub use dice::{title_board, BoardGenerator};
pub use path::{PathTracker, Selection};
pub use scorer::{FoundWords, Scorer};
pub use session::GameSession;
pub use solver::{SolveError, Solver, WordSet};
