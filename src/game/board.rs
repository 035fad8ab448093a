use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Immutable grid of die faces stored row-major.
///
/// The face list may be shorter than `rows * cols`; cells past the end of
/// the data read as an empty face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    faces: Vec<String>,
}

impl Board {
    pub fn new(rows: usize, cols: usize, faces: Vec<String>) -> Self {
        Self { rows, cols, faces }
    }

    pub fn from_faces<S: AsRef<str>>(rows: usize, cols: usize, faces: &[S]) -> Self {
        Self::new(rows, cols, faces.iter().map(|f| f.as_ref().to_string()).collect())
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Face at `(row, col)`, or `None` outside the board.
    pub fn face(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row * self.cols + col;
        Some(self.faces.get(index).map(String::as_str).unwrap_or(""))
    }

    pub fn face_at(&self, pos: Position) -> Option<&str> {
        self.face(pos.row, pos.col)
    }

    pub fn index_of(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    /// In-bounds cells 8-adjacent to `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let rows = pos.row.saturating_sub(1)..=(pos.row + 1).min(self.rows.saturating_sub(1));
        rows.flat_map(move |row| {
            let cols = pos.col.saturating_sub(1)..=(pos.col + 1).min(self.cols.saturating_sub(1));
            cols.map(move |col| Position { row, col })
        })
        .filter(move |&other| other != pos && self.contains(other))
    }

    /// Faces laid out as rows, for display.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.face(row, col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}

/// Check if two positions are adjacent (including diagonals)
pub fn are_adjacent(a: Position, b: Position) -> bool {
    let row_diff = a.row.abs_diff(b.row);
    let col_diff = a.col.abs_diff(b.col);

    row_diff <= 1 && col_diff <= 1 && (row_diff + col_diff > 0)
}
