use crate::data::WordBank;
use crate::results::SverdleError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::result::Result;

const EMBEDDED_ANSWERS: &str = include_str!("../data/answers.txt");
const EMBEDDED_ACCEPTED: &str = include_str!("../data/accepted.txt");

/// How the answer for a new game is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerSelection {
    /// Every new game gets an answer chosen uniformly at random.
    Random,
    /// Every game started on the same (UTC) day gets the same answer, so all players share one
    /// daily puzzle. Servers with the same seed and word lists agree on the answer.
    Daily { seed: u64 },
}

/// Where a word list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordListSource {
    /// The five-letter lists compiled into this crate.
    Embedded,
    /// A file with one word per line.
    File(PathBuf),
    /// An inline list of words.
    Words(Vec<String>),
}

/// Settings for running games.
///
/// Every field has a default, so a config file only needs to name the fields it changes:
///
/// ```
/// use sverdle::{AnswerSelection, GameConfig};
///
/// let config = GameConfig::from_ron_str("(max_guesses: 8, answer_selection: Daily(seed: 7))").unwrap();
/// assert_eq!(config.word_length, 5);
/// assert_eq!(config.max_guesses, 8);
/// assert_eq!(config.answer_selection, AnswerSelection::Daily { seed: 7 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_guesses: u8,
    pub answer_selection: AnswerSelection,
    /// The words that may be chosen as answers.
    pub answers: WordListSource,
    /// The words that may be guessed. Every answer is also accepted as a guess.
    pub accepted_guesses: WordListSource,
    /// The passphrase that game tokens are encrypted with. When absent, a random key is generated
    /// on start-up and tokens do not survive a restart.
    pub secret: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            word_length: 5,
            max_guesses: 6,
            answer_selection: AnswerSelection::Random,
            answers: WordListSource::Embedded,
            accepted_guesses: WordListSource::Embedded,
            secret: None,
        }
    }
}

impl GameConfig {
    /// Parses a config written in RON.
    pub fn from_ron_str(config: &str) -> Result<Self, SverdleError> {
        ron::from_str(config).map_err(|e| SverdleError::Configuration(e.to_string()))
    }

    /// Reads a RON config from the given file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SverdleError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SverdleError::Configuration(format!("unable to open {}: {}", path.display(), e))
        })?;
        ron::de::from_reader(file).map_err(|e| {
            SverdleError::Configuration(format!("unable to parse {}: {}", path.display(), e))
        })
    }

    /// Checks the settings that don't depend on the word lists.
    pub fn validate(&self) -> Result<(), SverdleError> {
        if self.word_length == 0 {
            return Err(SverdleError::Configuration(
                "word_length must be at least 1".to_string(),
            ));
        }
        if self.max_guesses == 0 {
            return Err(SverdleError::Configuration(
                "max_guesses must be at least 1".to_string(),
            ));
        }
        if matches!(&self.secret, Some(secret) if secret.is_empty()) {
            return Err(SverdleError::Configuration(
                "secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl WordListSource {
    /// Loads the words. `embedded` is the compiled-in list to use for [`WordListSource::Embedded`].
    pub(crate) fn load(&self, embedded: &str) -> Result<WordBank, SverdleError> {
        match self {
            WordListSource::Embedded => WordBank::from_iterator(embedded.lines()),
            WordListSource::File(path) => {
                let file = File::open(path).map_err(|e| {
                    SverdleError::Configuration(format!(
                        "unable to open {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                WordBank::from_reader(io::BufReader::new(file))
            }
            WordListSource::Words(words) => WordBank::from_iterator(words),
        }
    }

    pub(crate) fn load_answers(&self) -> Result<WordBank, SverdleError> {
        self.load(EMBEDDED_ANSWERS)
    }

    /// The embedded accepted list is every embedded word, answers included.
    pub(crate) fn load_accepted(&self) -> Result<WordBank, SverdleError> {
        match self {
            WordListSource::Embedded => {
                WordBank::from_iterator(EMBEDDED_ACCEPTED.lines().chain(EMBEDDED_ANSWERS.lines()))
            }
            _ => self.load(EMBEDDED_ACCEPTED),
        }
    }
}
