use crate::results::SverdleError;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// A list of words that all have the same length.
///
/// Words are trimmed and converted to lower case. Blank lines are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, SverdleError> {
        let words = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        Self::from_iterator(words)
    }

    /// Constructs a new `WordBank` using the words from the given iterator.
    ///
    /// Fails with [`SverdleError::WordLength`] if the words do not all have the same length, or
    /// with [`SverdleError::UnsupportedCharacter`] if a word contains anything but ASCII letters.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, SverdleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut word_length = 0;
        let mut all_words: Vec<Arc<str>> = Vec::new();
        for word in words {
            let word = normalize(word.as_ref());
            if word.is_empty() {
                continue;
            }
            if let Some(bad) = word.chars().find(|letter| !letter.is_ascii_lowercase()) {
                return Err(SverdleError::UnsupportedCharacter(bad));
            }
            if word_length == 0 {
                word_length = word.len();
            } else if word.len() != word_length {
                return Err(SverdleError::WordLength(word_length));
            }
            all_words.push(Arc::from(word.as_str()));
        }
        all_words.sort_unstable();
        all_words.dedup();
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of every word in the bank, or 0 if the bank is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Trims surrounding whitespace and lower-cases the word.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
