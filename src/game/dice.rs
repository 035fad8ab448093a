use once_cell::sync::Lazy;
use rand::{seq::SliceRandom, Rng};

use crate::game::board::Board;

/// Give up on the vowel requirement after this many rolls of the board.
const MAX_ROLL_ATTEMPTS: usize = 1000;

/// Board shown before the first round.
pub const TITLE_FACES: [&str; 16] = [
    "E", "P", "W", "T", //
    "R", "A", "M", "Y", //
    "G", "B", "L", "E", //
    "V", "D", "R", "A",
];

/// The fixed 4x4 board shown before the first round.
pub fn title_board() -> Board {
    Board::from_faces(4, 4, &TITLE_FACES)
}

/// One six-sided letter die.
#[derive(Debug, Clone)]
pub struct Die {
    faces: Vec<String>,
}

impl Die {
    /// One face per character of `letters`.
    pub fn from_letters(letters: &str) -> Self {
        Self {
            faces: letters.chars().map(String::from).collect(),
        }
    }

    pub fn from_faces(faces: &[&str]) -> Self {
        Self {
            faces: faces.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[cfg(test)]
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        if self.faces.is_empty() {
            return "";
        }
        &self.faces[rng.random_range(0..self.faces.len())]
    }
}

/// The standard pool of 16 dice.
pub static DICE: Lazy<Vec<Die>> = Lazy::new(|| {
    let mut dice: Vec<Die> = [
        "RIFOBX", "IFEHEY", "DENOWS", "UTOKND", "HMSRAO", "LUPETS", "ACITOA", "YLGKUE",
    ]
    .iter()
    .map(|letters| Die::from_letters(letters))
    .collect();

    dice.push(Die::from_faces(&["Qu", "B", "M", "J", "O", "A"]));

    dice.extend(
        [
            "EHISPN", "VETIGN", "BALIYT", "EZAVND", "RALESC", "UWILRG", "PACEMD",
        ]
        .iter()
        .map(|letters| Die::from_letters(letters)),
    );

    dice
});

pub fn is_vowel(face: &str) -> bool {
    matches!(
        face.to_ascii_uppercase().as_str(),
        "A" | "E" | "I" | "O" | "U"
    )
}

/// Rolls boards from the die pool.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    rows: usize,
    cols: usize,
    min_vowels: usize,
}

impl BoardGenerator {
    pub fn new(rows: usize, cols: usize, min_vowels: usize) -> Self {
        Self {
            rows,
            cols,
            min_vowels,
        }
    }

    pub fn generate(&self) -> Board {
        self.generate_with(&mut rand::rng())
    }

    /// Shuffle the pool and roll one die per cell, re-rolling until the
    /// board has at least `min_vowels` vowel faces. Boards larger than the
    /// pool reuse dice in shuffled order.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let cells = self.rows * self.cols;
        let min_vowels = self.min_vowels.min(cells);

        let mut dice: Vec<&Die> = DICE.iter().collect();
        dice.shuffle(rng);

        let mut faces = Vec::with_capacity(cells);
        for attempt in 1..=MAX_ROLL_ATTEMPTS {
            faces.clear();
            faces.extend(
                dice.iter()
                    .cycle()
                    .take(cells)
                    .map(|die| die.roll(rng).to_string()),
            );

            let vowels = faces.iter().filter(|f| is_vowel(f)).count();
            if vowels >= min_vowels {
                tracing::debug!(
                    "Rolled {}x{} board with {} vowels after {} attempt(s)",
                    self.rows,
                    self.cols,
                    vowels,
                    attempt
                );
                return Board::new(self.rows, self.cols, faces);
            }
        }

        tracing::warn!(
            "Could not roll {} vowels in {} attempts; using last roll",
            min_vowels,
            MAX_ROLL_ATTEMPTS
        );
        Board::new(self.rows, self.cols, faces)
    }
}
