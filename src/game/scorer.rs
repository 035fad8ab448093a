use crate::{
    dictionary::Dictionary,
    game::solver::{WordSet, MIN_WORD_LENGTH},
    models::{SolveSummary, WordOutcome},
};

pub struct Scorer;

impl Scorer {
    /// Points for a single word: one point per letter beyond the second.
    /// Words shorter than the minimum score nothing.
    pub fn word_points(word: &str) -> u32 {
        let length = word.chars().count();
        if length < MIN_WORD_LENGTH {
            0
        } else {
            (length - 2) as u32
        }
    }

    /// Sum of [`Scorer::word_points`] over `words`.
    pub fn total<I, S>(words: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words.into_iter().map(|w| Self::word_points(w.as_ref())).sum()
    }

    /// Whether `word` would be accepted on commit: long enough and in the
    /// dictionary. `word` must already be lowercase.
    pub fn is_acceptable(dictionary: &Dictionary, word: &str) -> bool {
        word.chars().count() >= MIN_WORD_LENGTH && dictionary.contains_word(word)
    }

    /// Sorted word list and best possible score for a solved board.
    pub fn summarize(words: &WordSet) -> SolveSummary {
        SolveSummary {
            words: words.iter().cloned().collect(),
            count: words.len(),
            max_score: Self::total(words),
        }
    }
}

/// Words found by a player during a round, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct FoundWords {
    words: Vec<String>,
}

impl FoundWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a word and record it if it is valid and new.
    pub fn submit(&mut self, dictionary: &Dictionary, word: &str) -> WordOutcome {
        let word = word.to_lowercase();
        if !Scorer::is_acceptable(dictionary, &word) {
            return WordOutcome::Invalid;
        }
        if self.contains(&word) {
            return WordOutcome::Duplicate;
        }

        self.words.push(word);
        WordOutcome::New
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn score(&self) -> u32 {
        Scorer::total(&self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["at", "cat", "cats", "ramble", "quit"])
    }

    #[test]
    fn test_word_points() {
        assert_eq!(Scorer::word_points("at"), 0);
        assert_eq!(Scorer::word_points("cat"), 1);
        assert_eq!(Scorer::word_points("cats"), 2);
        assert_eq!(Scorer::word_points("ramble"), 4);
    }

    #[test]
    fn test_total() {
        assert_eq!(Scorer::total(["cat", "cats", "ramble"]), 7);
        assert_eq!(Scorer::total(Vec::<String>::new()), 0);
    }

    #[test]
    fn test_summarize() {
        let words: WordSet = ["cats", "cat", "ramble"].iter().map(|w| w.to_string()).collect();
        let summary = Scorer::summarize(&words);
        assert_eq!(summary.words, vec!["cat", "cats", "ramble"]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.max_score, 7);
    }

    #[test]
    fn test_submit_outcomes() {
        let dict = dictionary();
        let mut found = FoundWords::new();

        assert_eq!(found.submit(&dict, "CAT"), WordOutcome::New);
        assert_eq!(found.submit(&dict, "cat"), WordOutcome::Duplicate);
        assert_eq!(found.submit(&dict, "at"), WordOutcome::Invalid);
        assert_eq!(found.submit(&dict, "dog"), WordOutcome::Invalid);
        assert_eq!(found.submit(&dict, "QuIT"), WordOutcome::New);

        assert_eq!(found.words(), &["cat".to_string(), "quit".to_string()]);
        assert_eq!(found.score(), 3);
    }
}
