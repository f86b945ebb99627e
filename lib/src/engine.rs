use crate::config::GameConfig;
use crate::dictionary::Dictionary;
use crate::results::*;
use crate::token::TokenCodec;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::result::Result;
use std::sync::Arc;

/// The full record of one game.
///
/// The status is derived from the guesses, so it is always consistent with them. The answer is
/// private: it only leaves the state through [`GameState::revealed_answer`] once the game is lost,
/// or sealed inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    answer: Box<str>,
    guesses: Vec<GuessRecord>,
    max_guesses: u8,
}

/// What a single accepted guess did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub results: Vec<LetterResult>,
    pub status: GameStatus,
    /// The answer, provided only if this guess lost the game.
    pub answer: Option<Box<str>>,
}

impl GameState {
    /// Starts a game with the given answer and no guesses.
    pub fn new(answer: &str, max_guesses: u8) -> Result<GameState, SverdleError> {
        if answer.is_empty() {
            return Err(SverdleError::WordLength(0));
        }
        if max_guesses == 0 {
            return Err(SverdleError::Configuration(
                "max_guesses must be at least 1".to_string(),
            ));
        }
        Ok(GameState {
            answer: answer.into(),
            guesses: Vec::new(),
            max_guesses,
        })
    }

    /// Applies a guess, returning the new state along with the scored result.
    ///
    /// The current state is never modified. If the game is over, or the guess is not accepted by
    /// the dictionary, an error is returned and no turn is used.
    pub fn submit_guess(
        &self,
        dictionary: &Dictionary,
        word: &str,
    ) -> Result<(GameState, GuessOutcome), SverdleError> {
        let status = self.status();
        if status.is_over() {
            return Err(SverdleError::GameAlreadyOver(status));
        }
        let guess = dictionary.check_guess(word)?;
        let results = get_result_for_guess(&self.answer, &guess)?;

        let mut next = self.clone();
        next.guesses.push(GuessRecord {
            guess: guess.into(),
            results: results.clone(),
        });
        let status = next.status();
        let answer = next.revealed_answer().map(Box::from);
        Ok((
            next,
            GuessOutcome {
                results,
                status,
                answer,
            },
        ))
    }

    pub fn status(&self) -> GameStatus {
        match self.guesses.last() {
            Some(record) if record.is_correct() => GameStatus::Won,
            _ if self.guesses.len() >= self.max_guesses as usize => GameStatus::Lost,
            _ => GameStatus::InProgress,
        }
    }

    /// The guesses made so far, oldest first.
    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn max_guesses(&self) -> u8 {
        self.max_guesses
    }

    pub fn remaining_guesses(&self) -> usize {
        if self.status().is_over() {
            return 0;
        }
        self.max_guesses as usize - self.guesses.len()
    }

    pub fn word_length(&self) -> usize {
        self.answer.chars().count()
    }

    /// The answer, but only once the game has been lost.
    pub fn revealed_answer(&self) -> Option<&str> {
        match self.status() {
            GameStatus::Lost => Some(&*self.answer),
            _ => None,
        }
    }

    /// The most informative result seen so far for each guessed letter, for colouring a keyboard.
    pub fn letter_states(&self) -> BTreeMap<char, LetterResult> {
        let mut states: BTreeMap<char, LetterResult> = BTreeMap::new();
        for record in &self.guesses {
            for (letter, result) in record.guess.chars().zip(record.results.iter()) {
                states
                    .entry(letter)
                    .and_modify(|best| {
                        if result.rank() > best.rank() {
                            *best = *result;
                        }
                    })
                    .or_insert(*result);
            }
        }
        states
    }

    /// Verifies the invariants of a state that came from outside this process.
    pub(crate) fn check_consistency(&self) -> Result<(), DecodeError> {
        if self.answer.is_empty() {
            return Err(DecodeError::InconsistentState("the answer is empty"));
        }
        if !self.answer.chars().all(|letter| letter.is_ascii_lowercase()) {
            return Err(DecodeError::InconsistentState(
                "the answer contains unsupported characters",
            ));
        }
        if self.max_guesses == 0 {
            return Err(DecodeError::InconsistentState("no guesses are allowed"));
        }
        if self.guesses.len() > self.max_guesses as usize {
            return Err(DecodeError::InconsistentState("too many guesses"));
        }
        let won_at = self.guesses.iter().position(GuessRecord::is_correct);
        if matches!(won_at, Some(index) if index + 1 != self.guesses.len()) {
            return Err(DecodeError::InconsistentState("guesses continue after a win"));
        }
        for record in &self.guesses {
            match get_result_for_guess(&self.answer, &record.guess) {
                Ok(results) if results == record.results => {}
                _ => {
                    return Err(DecodeError::InconsistentState(
                        "a guess does not match its results",
                    ))
                }
            }
        }
        Ok(())
    }
}

/// Everything the view layer may show about a game. The answer is only present once the game is
/// lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub guesses: Vec<GuessRecord>,
    pub status: GameStatus,
    pub word_length: usize,
    pub max_guesses: u8,
    pub remaining_guesses: usize,
    pub letter_states: BTreeMap<char, LetterResult>,
    pub answer: Option<Box<str>>,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        GameView {
            guesses: state.guesses().to_vec(),
            status: state.status(),
            word_length: state.word_length(),
            max_guesses: state.max_guesses(),
            remaining_guesses: state.remaining_guesses(),
            letter_states: state.letter_states(),
            answer: state.revealed_answer().map(Box::from),
        }
    }
}

/// The result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The token to hand back on the next request.
    pub token: String,
    pub results: Vec<LetterResult>,
    pub status: GameStatus,
    /// The answer, provided only if this guess lost the game.
    pub answer: Option<Box<str>>,
    pub view: GameView,
}

/// Runs games whose state lives entirely in client-held tokens.
///
/// A `Sverdle` holds only read-only data, so one instance can serve any number of concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Sverdle {
    dictionary: Arc<Dictionary>,
    codec: TokenCodec,
    max_guesses: u8,
}

impl Sverdle {
    pub fn new(dictionary: Arc<Dictionary>, codec: TokenCodec, max_guesses: u8) -> Sverdle {
        Sverdle {
            dictionary,
            codec,
            max_guesses,
        }
    }

    /// Loads the word lists and key described by the config.
    pub fn from_config(config: &GameConfig) -> Result<Sverdle, SverdleError> {
        let dictionary = Dictionary::load(config)?;
        let codec = match &config.secret {
            Some(secret) => TokenCodec::from_secret(secret),
            None => {
                warn!("No secret configured; game tokens will not survive a restart.");
                TokenCodec::generate()
            }
        };
        Ok(Sverdle::new(
            Arc::new(dictionary),
            codec,
            config.max_guesses,
        ))
    }

    /// Starts a new game, returning its view and token.
    pub fn start_new_game(&self) -> Result<(GameView, String), SverdleError> {
        let answer = self.dictionary.pick_answer();
        let state = GameState::new(&answer, self.max_guesses)?;
        debug!("Started a new game with {} guesses.", self.max_guesses);
        let token = self.codec.encode(&state)?;
        Ok((GameView::from(&state), token))
    }

    /// Discards the current game, if any, and starts a new one.
    pub fn restart(&self) -> Result<(GameView, String), SverdleError> {
        self.start_new_game()
    }

    /// Restores the game in the token, or starts a new game if there is no usable token.
    pub fn resume(&self, token: Option<&str>) -> Result<(GameView, String), SverdleError> {
        let token = match token {
            Some(token) => token,
            None => return self.start_new_game(),
        };
        match self.decode(token) {
            Ok(state) => Ok((GameView::from(&state), token.to_string())),
            Err(e) => {
                debug!("Starting a new game: {}", e);
                self.start_new_game()
            }
        }
    }

    /// Applies a guess to the game in the token.
    ///
    /// On [`SverdleError::InvalidGuess`] and [`SverdleError::GameAlreadyOver`] the caller should
    /// keep the token it has. On [`SverdleError::Decode`] it should start a new game.
    pub fn submit_guess(&self, token: &str, guess: &str) -> Result<Submission, SverdleError> {
        let state = self.decode(token)?;
        let (next, outcome) = state.submit_guess(&self.dictionary, guess)?;
        let token = self.codec.encode(&next)?;
        Ok(Submission {
            token,
            results: outcome.results,
            status: outcome.status,
            answer: outcome.answer,
            view: GameView::from(&next),
        })
    }

    /// Reads the game in the token without changing it.
    pub fn view(&self, token: &str) -> Result<GameView, SverdleError> {
        Ok(GameView::from(&self.decode(token)?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn decode(&self, token: &str) -> Result<GameState, DecodeError> {
        let state = self.codec.decode(token)?;
        let expected = self.dictionary.word_length();
        let actual = state.word_length();
        if actual != expected {
            return Err(DecodeError::WordLength { expected, actual });
        }
        Ok(state)
    }
}
