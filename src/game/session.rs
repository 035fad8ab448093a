use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::{
    dictionary::Dictionary,
    game::{
        board::Board,
        path::{is_valid_path, PathTracker, Selection},
        scorer::{FoundWords, Scorer},
    },
    models::{CommitView, GameView, Position, SelectionView, SolveSummary, WordOutcome},
};

/// One timed round on one board.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub game_id: Uuid,
    board: Board,
    tracker: PathTracker,
    found: FoundWords,
    started_at: DateTime<Utc>,
    duration: TimeDelta,
    solution: Option<SolveSummary>,
}

impl GameSession {
    pub fn new(board: Board, round_seconds: u32) -> Self {
        Self::started_at(board, round_seconds, Utc::now())
    }

    pub fn started_at(board: Board, round_seconds: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            board,
            tracker: PathTracker::new(),
            found: FoundWords::new(),
            started_at,
            duration: TimeDelta::seconds(round_seconds.into()),
            solution: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn found_words(&self) -> &FoundWords {
        &self.found
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.started_at + self.duration
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.ends_at()
    }

    /// Whole seconds left in the round, rounded to nearest.
    pub fn time_remaining_at(&self, now: DateTime<Utc>) -> u32 {
        let millis = (self.ends_at() - now).num_milliseconds().max(0);
        ((millis + 500) / 1000) as u32
    }

    /// Apply a cell selection. Rejected once the round is over.
    pub fn select_at(&mut self, pos: Position, now: DateTime<Utc>) -> SelectionView {
        let selection = if self.is_active_at(now) {
            self.tracker.select(&self.board, pos)
        } else {
            Selection::Rejected
        };
        debug_assert!(self.tracker.is_empty() || is_valid_path(&self.board, self.tracker.path()));

        if selection.changed() {
            tracing::debug!(
                "Game {}: {:?} ({}, {}) -> {:?}",
                self.game_id,
                selection,
                pos.row,
                pos.col,
                self.tracker.current_word(&self.board)
            );
        }

        SelectionView {
            selection,
            word: self.tracker.current_word(&self.board),
            path: self.tracker.path().to_vec(),
        }
    }

    pub fn select(&mut self, pos: Position) -> SelectionView {
        self.select_at(pos, Utc::now())
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Check the current word against the dictionary and the words already
    /// found, then clear the selection.
    pub fn commit_at(&mut self, dictionary: &Dictionary, now: DateTime<Utc>) -> CommitView {
        let word = self.tracker.current_word(&self.board).to_lowercase();
        self.tracker.reset();

        let outcome = if self.is_active_at(now) {
            self.found.submit(dictionary, &word)
        } else {
            WordOutcome::RoundOver
        };

        let points = match outcome {
            WordOutcome::New => Scorer::word_points(&word),
            _ => 0,
        };

        tracing::debug!(
            "Game {}: committed {:?} -> {:?} (+{})",
            self.game_id,
            word,
            outcome,
            points
        );

        CommitView {
            word,
            outcome,
            points,
            score: self.found.score(),
        }
    }

    pub fn commit(&mut self, dictionary: &Dictionary) -> CommitView {
        self.commit_at(dictionary, Utc::now())
    }

    pub fn solution(&self) -> Option<&SolveSummary> {
        self.solution.as_ref()
    }

    pub fn set_solution(&mut self, solution: SolveSummary) {
        self.solution = Some(solution);
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> GameView {
        GameView {
            game_id: self.game_id,
            rows: self.board.num_rows(),
            cols: self.board.num_cols(),
            board: self.board.rows(),
            current_word: self.tracker.current_word(&self.board),
            path: self.tracker.path().to_vec(),
            found_words: self.found.words().to_vec(),
            score: self.found.score(),
            started_at: self.started_at,
            time_remaining: self.time_remaining_at(now),
            active: self.is_active_at(now),
        }
    }

    pub fn view(&self) -> GameView {
        self.view_at(Utc::now())
    }
}
