mod trie;

use std::io::BufRead;
use std::path::Path;

use thiserror::Error;
use tokio::fs;

pub use trie::Prefix;
use trie::Trie;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list is not valid UTF-8 at line {line}")]
    InvalidUtf8 { line: usize },
}

/// Lowercase word list answering membership and prefix queries.
///
/// Built once and read-only afterwards, so a shared reference can be used
/// from any number of threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    trie: Trie,
    len: usize,
}

impl Dictionary {
    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read(path).await?;
        let dict = Self::from_reader(content.as_slice())?;

        tracing::info!(
            "Loaded {} words into dictionary ({} trie nodes)",
            dict.len(),
            dict.trie.node_count()
        );

        Ok(dict)
    }

    /// Load dictionary from a file, falling back to an empty dictionary
    /// (which rejects every word) if it cannot be read.
    pub async fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path).await {
            Ok(dict) => dict,
            Err(e) => {
                tracing::warn!(
                    "Failed to load dictionary from {}: {}. Using empty dictionary.",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Build from newline-separated words. Lines are trimmed and lowercased,
    /// and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut dict = Self::empty();
        for (number, line) in reader.split(b'\n').enumerate() {
            let line = String::from_utf8(line?)
                .map_err(|_| LoadError::InvalidUtf8 { line: number + 1 })?;
            dict.insert(&line);
        }
        Ok(dict)
    }

    #[cfg(test)]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::empty();
        for word in words {
            dict.insert(word.as_ref());
        }
        dict
    }

    /// Create an empty dictionary
    pub fn empty() -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
        }
    }

    fn insert(&mut self, raw: &str) {
        let word = raw.trim().to_lowercase();
        if word.is_empty() {
            return;
        }
        if self.trie.insert(&word) {
            self.len += 1;
        }
    }

    /// Exact membership. The query must already be lowercase.
    pub fn contains_word(&self, word: &str) -> bool {
        self.root()
            .and_then(|root| root.extend(word))
            .is_some_and(Prefix::is_word)
    }

    /// True iff some stored word starts with `prefix`. The empty prefix
    /// matches whenever the dictionary has any words.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.root().and_then(|root| root.extend(prefix)).is_some()
    }

    /// Starting point for incremental prefix walks; `None` for an empty
    /// dictionary.
    pub fn root(&self) -> Option<Prefix<'_>> {
        (!self.is_empty()).then(|| self.trie.root())
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
