//! A Wordle-style game that keeps no state on the server.
//!
//! Each game lives in an opaque token that the caller stores (in a cookie, say) and hands back
//! with the next guess. Tokens are encrypted and authenticated, so players can't read the answer
//! or forge a win.
//!
//! ```
//! use sverdle::{GameConfig, GameStatus, Sverdle, WordListSource};
//!
//! let config = GameConfig {
//!     answers: WordListSource::Words(vec!["crane".to_string()]),
//!     secret: Some("correct horse battery staple".to_string()),
//!     ..GameConfig::default()
//! };
//! let game = Sverdle::from_config(&config).unwrap();
//!
//! let (_, token) = game.start_new_game().unwrap();
//! let submission = game.submit_guess(&token, "CRANE").unwrap();
//! assert_eq!(submission.status, GameStatus::Won);
//! ```

mod config;
mod data;
mod dictionary;
mod engine;
mod results;
mod token;

pub use config::*;
pub use data::normalize;
pub use data::WordBank;
pub use dictionary::Dictionary;
pub use engine::*;
pub use results::*;
pub use token::TokenCodec;
