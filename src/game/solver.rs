use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    dictionary::{Dictionary, Prefix},
    game::board::Board,
};

/// Shortest word the solver reports.
pub const MIN_WORD_LENGTH: usize = 3;

/// Every distinct word found on a board.
pub type WordSet = BTreeSet<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("solve was cancelled")]
    Cancelled,
    #[error("solve did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("solve task failed: {0}")]
    Task(String),
}

/// Finds every dictionary word that can be traced on a board.
///
/// The search is a depth-first walk over simple paths from each starting
/// cell. The dictionary's trie is walked in step with the path, so a branch
/// is dropped as soon as its text stops being a prefix of any word.
pub struct Solver<'a> {
    dictionary: &'a Dictionary,
    /// Lowercased face per cell, row-major.
    fragments: Vec<String>,
    /// Adjacent cell indices per cell, excluding blank cells.
    neighbors: Vec<Vec<usize>>,
}

impl<'a> Solver<'a> {
    pub fn new(board: &Board, dictionary: &'a Dictionary) -> Self {
        let cells = board.cell_count();
        let fragments: Vec<String> = (0..cells)
            .map(|i| {
                let pos = board.position_of(i);
                board.face_at(pos).unwrap_or_default().to_lowercase()
            })
            .collect();
        // A blank cell adds no text, so it can never narrow the prefix.
        // Walking through blanks would enumerate every path among them.
        let neighbors = (0..cells)
            .map(|i| {
                board
                    .neighbors(board.position_of(i))
                    .map(|p| board.index_of(p))
                    .filter(|&j| !fragments[j].is_empty())
                    .collect()
            })
            .collect();

        Self {
            dictionary,
            fragments,
            neighbors,
        }
    }

    /// Solve on the calling thread.
    pub fn solve(&self) -> WordSet {
        let never = AtomicBool::new(false);
        self.run(false, &never).unwrap_or_default()
    }

    /// Solve with one rayon task per starting cell. Returns the same set as
    /// [`Solver::solve`].
    #[cfg(test)]
    pub fn solve_parallel(&self) -> WordSet {
        let never = AtomicBool::new(false);
        self.run(true, &never).unwrap_or_default()
    }

    /// Solve, checking `cancel` between branches. A cancelled solve yields
    /// an error rather than a partial set.
    pub fn solve_cancellable(
        &self,
        parallel: bool,
        cancel: &AtomicBool,
    ) -> Result<WordSet, SolveError> {
        self.run(parallel, cancel)
    }

    fn run(&self, parallel: bool, cancel: &AtomicBool) -> Result<WordSet, SolveError> {
        let Some(root) = self.dictionary.root() else {
            return Ok(WordSet::new());
        };

        let started = Instant::now();
        let cells = self.fragments.len();
        let starts: Vec<usize> = (0..cells)
            .filter(|&i| !self.fragments[i].is_empty())
            .collect();

        let words = if parallel {
            starts
                .into_par_iter()
                .map(|start| self.solve_from(root, start, cancel))
                .try_reduce(WordSet::new, |mut a, mut b| {
                    a.append(&mut b);
                    Ok(a)
                })?
        } else {
            let mut words = WordSet::new();
            for start in starts {
                words.append(&mut self.solve_from(root, start, cancel)?);
            }
            words
        };

        tracing::debug!(
            "Solved {}-cell board: {} words in {:?}",
            cells,
            words.len(),
            started.elapsed()
        );

        Ok(words)
    }

    fn solve_from(
        &self,
        root: Prefix<'_>,
        start: usize,
        cancel: &AtomicBool,
    ) -> Result<WordSet, SolveError> {
        let mut search = Search {
            solver: self,
            cancel,
            visited: VisitedCells::new(self.fragments.len()),
            text: String::new(),
            found: WordSet::new(),
        };
        search.visit(root, start)?;
        Ok(search.found)
    }
}

/// Convenience wrapper: every word on `board` found in `dictionary`.
pub fn solve(board: &Board, dictionary: &Dictionary) -> WordSet {
    Solver::new(board, dictionary).solve()
}

/// Solve on the blocking pool, cancelling the search if it runs past
/// `limit`.
pub async fn solve_with_timeout(
    dictionary: Arc<Dictionary>,
    board: Board,
    parallel: bool,
    limit: Duration,
) -> Result<WordSet, SolveError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    let task = tokio::task::spawn_blocking(move || {
        Solver::new(&board, &dictionary).solve_cancellable(parallel, &flag)
    });

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(SolveError::Task(e.to_string())),
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            tracing::warn!("Solve exceeded {:?}, cancelling", limit);
            Err(SolveError::TimedOut(limit))
        }
    }
}

/// State owned by one depth-first search from one starting cell.
struct Search<'s, 'a> {
    solver: &'s Solver<'a>,
    cancel: &'s AtomicBool,
    visited: VisitedCells,
    text: String,
    found: WordSet,
}

impl Search<'_, '_> {
    fn visit(&mut self, prefix: Prefix<'_>, cell: usize) -> Result<(), SolveError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(SolveError::Cancelled);
        }

        let solver = self.solver;
        let fragment = &solver.fragments[cell];
        let Some(prefix) = prefix.extend(fragment) else {
            return Ok(());
        };

        let mark = self.text.len();
        self.text.push_str(fragment);
        self.visited.insert(cell);

        if prefix.is_word()
            && self.text.chars().count() >= MIN_WORD_LENGTH
            && !self.found.contains(&self.text)
        {
            self.found.insert(self.text.clone());
        }

        let mut result = Ok(());
        for &next in &solver.neighbors[cell] {
            if !self.visited.contains(next) {
                result = self.visit(prefix, next);
                if result.is_err() {
                    break;
                }
            }
        }

        self.visited.remove(cell);
        self.text.truncate(mark);
        result
    }
}

/// Fixed-size bitset of cell indices.
#[derive(Debug, Clone)]
struct VisitedCells {
    blocks: Vec<u64>,
}

impl VisitedCells {
    fn new(cells: usize) -> Self {
        Self {
            blocks: vec![0; cells.div_ceil(64)],
        }
    }

    fn insert(&mut self, cell: usize) {
        self.blocks[cell / 64] |= 1u64 << (cell % 64);
    }

    fn remove(&mut self, cell: usize) {
        self.blocks[cell / 64] &= !(1u64 << (cell % 64));
    }

    fn contains(&self, cell: usize) -> bool {
        self.blocks[cell / 64] & (1u64 << (cell % 64)) != 0
    }
}
