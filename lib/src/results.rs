use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::result::Result;
use thiserror::Error;

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum LetterResult {
    /// The letter is in the answer at this location.
    Correct,
    /// The letter is in the answer, but somewhere else, and not all of its occurrences have been
    /// accounted for by other locations.
    Present,
    /// The letter is not in the answer, or all of its occurrences are already accounted for.
    Absent,
}

impl LetterResult {
    /// The single-character code for this result: `x` for correct, `c` for close (present), and
    /// `_` for missing (absent).
    pub fn code(self) -> char {
        match self {
            LetterResult::Correct => 'x',
            LetterResult::Present => 'c',
            LetterResult::Absent => '_',
        }
    }

    /// Orders results by how much they reveal: `Correct` beats `Present` beats `Absent`.
    pub(crate) fn rank(self) -> u8 {
        match self {
            LetterResult::Correct => 2,
            LetterResult::Present => 1,
            LetterResult::Absent => 0,
        }
    }
}

/// A single accepted guess and how each of its letters scored.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: Box<str>,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl GuessRecord {
    /// Returns `true` iff every letter of the guess was correct.
    pub fn is_correct(&self) -> bool {
        self.results
            .iter()
            .all(|result| *result == LetterResult::Correct)
    }

    /// Renders the results as a compact pattern, e.g. `"_xxcx"`.
    pub fn pattern(&self) -> String {
        self.results.iter().map(|result| result.code()).collect()
    }
}

/// Where a game stands.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Returns `true` iff no more guesses will be accepted.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won => write!(f, "won"),
            GameStatus::Lost => write!(f, "lost"),
        }
    }
}

/// Why a submitted word was not accepted as a guess.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GuessRejection {
    WrongLength { expected: usize, actual: usize },
    NotInWordList,
}

/// Why an encoded game could not be restored.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("no game state was provided")]
    Missing,
    #[error("the game state is not a valid token")]
    Malformed,
    #[error("the game state uses unsupported token version {0}")]
    UnsupportedVersion(u8),
    #[error("the game state failed authentication")]
    Authentication,
    #[error("the game state payload could not be read: {0}")]
    Payload(String),
    #[error("the game state is inconsistent: {0}")]
    InconsistentState(&'static str),
    #[error("the game state has a {actual}-letter answer, but games use {expected} letters")]
    WordLength { expected: usize, actual: usize },
}

/// Indicates that an error occurred while setting up or playing a game.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SverdleError {
    /// The word lists or other settings are unusable. This is fatal at start-up.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// The guess was not accepted. The game state is unchanged and no turn was used.
    #[error("{}", describe_rejection(.guess, .reason))]
    InvalidGuess {
        guess: Box<str>,
        reason: GuessRejection,
    },
    /// The game has already been won or lost.
    #[error("the game is already over (you {0})")]
    GameAlreadyOver(GameStatus),
    /// The game state could not be restored. Callers should start a new game.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Indicates that a word has the wrong length. Provides the expected length.
    #[error("words must have {0} letters")]
    WordLength(usize),
    /// Indicates that a word list contains a character other than an ASCII letter.
    #[error("unsupported character '{0}'; words must only contain the letters a-z")]
    UnsupportedCharacter(char),
    /// The game state could not be encoded.
    #[error("failed to encode the game state: {0}")]
    Encode(String),
}

impl SverdleError {
    /// Returns `false` only for errors that should abort start-up.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SverdleError::Configuration(_))
    }
}

impl From<io::Error> for SverdleError {
    fn from(e: io::Error) -> Self {
        SverdleError::Configuration(format!("i/o error: {}", e))
    }
}

fn describe_rejection(guess: &str, reason: &GuessRejection) -> String {
    match reason {
        GuessRejection::WrongLength { expected, .. } => {
            format!("'{}' must have {} letters", guess, expected)
        }
        GuessRejection::NotInWordList => format!("'{}' is not in the word list", guess),
    }
}

/// Determines the result of the given `guess` when applied to the given `answer`.
///
/// Exact matches are marked first and consume their letter from the answer. Each remaining
/// letter is then marked present only while unconsumed occurrences of it remain, so a letter is
/// never credited more times than it occurs in the answer.
///
/// ```
/// use sverdle::{get_result_for_guess, LetterResult};
///
/// assert_eq!(
///     get_result_for_guess("crane", "trace").unwrap(),
///     vec![
///         LetterResult::Absent,
///         LetterResult::Correct,
///         LetterResult::Correct,
///         LetterResult::Present,
///         LetterResult::Correct,
///     ]
/// );
/// ```
pub fn get_result_for_guess(answer: &str, guess: &str) -> Result<Vec<LetterResult>, SverdleError> {
    let answer: Vec<char> = answer.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    if answer.len() != guess.len() {
        return Err(SverdleError::WordLength(answer.len()));
    }

    let mut results = vec![LetterResult::Absent; guess.len()];
    let mut unmatched: HashMap<char, u32> = HashMap::new();
    for (index, (answer_letter, guess_letter)) in answer.iter().zip(guess.iter()).enumerate() {
        if answer_letter == guess_letter {
            results[index] = LetterResult::Correct;
        } else {
            *unmatched.entry(*answer_letter).or_insert(0) += 1;
        }
    }

    for (index, letter) in guess.iter().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some(count) = unmatched.get_mut(letter) {
            if *count > 0 {
                *count -= 1;
                results[index] = LetterResult::Present;
            }
        }
    }
    Ok(results)
}
