use crate::config::{AnswerSelection, GameConfig};
use crate::data::{normalize, WordBank};
use crate::results::{GuessRejection, SverdleError};
use chrono::{Datelike, NaiveDate, Utc};
use log::info;
use rand::seq::SliceRandom;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::result::Result;
use std::sync::Arc;

/// The fixed vocabulary for a game: the possible answers, the accepted guesses, and the policy
/// for picking an answer.
///
/// A `Dictionary` is built once and never modified, so it can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    answers: WordBank,
    accepted: HashSet<Arc<str>>,
    selection: AnswerSelection,
}

impl Dictionary {
    /// Builds a dictionary from the given answers and accepted guesses.
    ///
    /// Every answer is added to the accepted guesses. Fails if either list is empty, or if the
    /// two lists use different word lengths.
    pub fn new(
        answers: WordBank,
        accepted_guesses: WordBank,
        selection: AnswerSelection,
    ) -> Result<Self, SverdleError> {
        if answers.is_empty() {
            return Err(SverdleError::Configuration(
                "the answer list is empty".to_string(),
            ));
        }
        if accepted_guesses.is_empty() {
            return Err(SverdleError::Configuration(
                "the accepted guess list is empty".to_string(),
            ));
        }
        if accepted_guesses.word_length() != answers.word_length() {
            return Err(SverdleError::Configuration(format!(
                "answers have {} letters, but accepted guesses have {}",
                answers.word_length(),
                accepted_guesses.word_length()
            )));
        }
        let accepted: HashSet<Arc<str>> = accepted_guesses
            .iter()
            .chain(answers.iter())
            .map(Arc::clone)
            .collect();
        Ok(Dictionary {
            answers,
            accepted,
            selection,
        })
    }

    /// Loads the word lists named in the config.
    pub fn load(config: &GameConfig) -> Result<Self, SverdleError> {
        config.validate()?;
        let answers = config
            .answers
            .load_answers()
            .map_err(|e| with_context("answer list", e))?;
        let accepted = config
            .accepted_guesses
            .load_accepted()
            .map_err(|e| with_context("accepted guess list", e))?;
        if answers.word_length() != config.word_length {
            return Err(SverdleError::Configuration(format!(
                "word_length is {}, but the answers have {} letters",
                config.word_length,
                answers.word_length()
            )));
        }
        let dictionary = Dictionary::new(answers, accepted, config.answer_selection)?;
        info!(
            "Loaded {} answers and {} accepted guesses.",
            dictionary.num_answers(),
            dictionary.num_accepted_guesses()
        );
        Ok(dictionary)
    }

    /// Chooses the answer for a new game, according to the configured [`AnswerSelection`].
    pub fn pick_answer(&self) -> Arc<str> {
        match self.selection {
            AnswerSelection::Random => {
                let mut rng = rand::thread_rng();
                // The answer bank is never empty.
                self.answers
                    .choose(&mut rng)
                    .map(Arc::clone)
                    .unwrap_or_else(|| self.answers[0].clone())
            }
            AnswerSelection::Daily { seed } => self.daily_answer(seed, Utc::now().date_naive()),
        }
    }

    /// Returns the daily answer for the given date, or `None` when answers are picked at random.
    pub fn pick_answer_on(&self, date: NaiveDate) -> Option<Arc<str>> {
        match self.selection {
            AnswerSelection::Daily { seed } => Some(self.daily_answer(seed, date)),
            AnswerSelection::Random => None,
        }
    }

    fn daily_answer(&self, seed: u64, date: NaiveDate) -> Arc<str> {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        hasher.update(date.num_days_from_ce().to_le_bytes());
        let digest = hasher.finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let index = u64::from_le_bytes(prefix) % self.answers.len() as u64;
        Arc::clone(&self.answers[index as usize])
    }

    /// Returns `true` iff the word, once trimmed and lower-cased, may be guessed.
    pub fn is_accepted_guess(&self, word: &str) -> bool {
        self.check_guess(word).is_ok()
    }

    /// Normalizes the word and checks that it may be guessed.
    pub fn check_guess(&self, word: &str) -> Result<String, SverdleError> {
        let guess = normalize(word);
        let actual = guess.chars().count();
        if actual != self.word_length() {
            return Err(SverdleError::InvalidGuess {
                guess: guess.into(),
                reason: GuessRejection::WrongLength {
                    expected: self.word_length(),
                    actual,
                },
            });
        }
        if !self.accepted.contains(guess.as_str()) {
            return Err(SverdleError::InvalidGuess {
                guess: guess.into(),
                reason: GuessRejection::NotInWordList,
            });
        }
        Ok(guess)
    }

    /// Returns `true` iff the word may be chosen as an answer.
    pub fn is_answer(&self, word: &str) -> bool {
        self.answers.binary_search(&Arc::from(word)).is_ok()
    }

    pub fn word_length(&self) -> usize {
        self.answers.word_length()
    }

    pub fn num_answers(&self) -> usize {
        self.answers.len()
    }

    pub fn num_accepted_guesses(&self) -> usize {
        self.accepted.len()
    }

    pub fn selection(&self) -> AnswerSelection {
        self.selection
    }
}

fn with_context(list: &str, error: SverdleError) -> SverdleError {
    match error {
        SverdleError::Configuration(message) => {
            SverdleError::Configuration(format!("{}: {}", list, message))
        }
        other => SverdleError::Configuration(format!("{}: {}", list, other)),
    }
}
