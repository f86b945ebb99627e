#[macro_use]
extern crate assert_matches;

use sverdle::*;

use chrono::NaiveDate;
use std::io::Cursor;
use std::result::Result;
use std::sync::Arc;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::from(*thing))
                .collect::<Vec<Arc<_>>>()
        );
    };
}

fn words(words: &[&str]) -> WordListSource {
    WordListSource::Words(words.iter().map(|word| word.to_string()).collect())
}

#[test]
fn word_bank_from_reader_succeeds() -> Result<(), SverdleError> {
    let mut cursor = Cursor::new(String::from("\n\nworda\n wordb\n"));

    let word_bank = WordBank::from_reader(&mut cursor)?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["worda", "wordb"]);
    assert_eq!(word_bank.word_length(), 5);
    Ok(())
}

#[test]
fn word_bank_from_iterator_succeeds() -> Result<(), SverdleError> {
    let word_bank = WordBank::from_iterator(vec!["", "worda", "Wordb "])?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["worda", "wordb"]);
    assert_eq!(word_bank.word_length(), 5);
    Ok(())
}

#[test]
fn word_bank_from_reader_mismatched_word_length_fails() {
    let mut cursor = Cursor::new(String::from("\nlongword\n   short\n"));

    assert_matches!(
        WordBank::from_reader(&mut cursor),
        Err(SverdleError::WordLength(8))
    );
}

#[test]
fn dictionary_load_defaults() -> Result<(), SverdleError> {
    let dictionary = Dictionary::load(&GameConfig::default())?;

    assert_eq!(dictionary.word_length(), 5);
    assert!(dictionary.num_answers() > 0);
    assert!(dictionary.num_accepted_guesses() > dictionary.num_answers());
    assert!(dictionary.is_accepted_guess("crane"));
    assert!(dictionary.is_accepted_guess("adieu"));
    Ok(())
}

#[test]
fn is_accepted_guess_trims_and_ignores_case() -> Result<(), SverdleError> {
    let dictionary = Dictionary::load(&GameConfig::default())?;

    assert!(dictionary.is_accepted_guess("  CrAnE\n"));
    assert!(!dictionary.is_accepted_guess("cran"));
    assert!(!dictionary.is_accepted_guess("cranes"));
    assert!(!dictionary.is_accepted_guess("qzxvw"));
    assert!(!dictionary.is_accepted_guess(""));
    Ok(())
}

#[test]
fn check_guess_explains_rejections() -> Result<(), SverdleError> {
    let dictionary = Dictionary::load(&GameConfig::default())?;

    assert_eq!(dictionary.check_guess(" Crane "), Ok("crane".to_string()));
    assert_matches!(
        dictionary.check_guess("cat"),
        Err(SverdleError::InvalidGuess {
            reason: GuessRejection::WrongLength {
                expected: 5,
                actual: 3
            },
            ..
        })
    );
    assert_matches!(
        dictionary.check_guess("qzxvw"),
        Err(SverdleError::InvalidGuess {
            reason: GuessRejection::NotInWordList,
            ..
        })
    );
    Ok(())
}

#[test]
fn every_answer_is_accepted() -> Result<(), SverdleError> {
    let config = GameConfig {
        answers: words(&["zebra", "quart"]),
        accepted_guesses: words(&["adieu"]),
        ..GameConfig::default()
    };

    let dictionary = Dictionary::load(&config)?;

    assert!(dictionary.is_accepted_guess("zebra"));
    assert!(dictionary.is_accepted_guess("quart"));
    assert!(dictionary.is_accepted_guess("adieu"));
    assert_eq!(dictionary.num_accepted_guesses(), 3);
    Ok(())
}

#[test]
fn random_answers_come_from_the_answer_list() -> Result<(), SverdleError> {
    let config = GameConfig {
        answers: words(&["zebra", "quart", "crane"]),
        ..GameConfig::default()
    };
    let dictionary = Dictionary::load(&config)?;

    for _ in 0..50 {
        let answer = dictionary.pick_answer();
        assert!(dictionary.is_answer(&answer));
        assert_eq!(answer.len(), 5);
    }
    Ok(())
}

#[test]
fn daily_answers_are_shared() -> Result<(), SverdleError> {
    let config = GameConfig {
        answer_selection: AnswerSelection::Daily { seed: 42 },
        ..GameConfig::default()
    };
    let first_server = Dictionary::load(&config)?;
    let second_server = Dictionary::load(&config)?;
    let date = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();

    assert_eq!(
        first_server.pick_answer_on(date),
        second_server.pick_answer_on(date)
    );
    let answer = first_server.pick_answer_on(date);
    assert_matches!(&answer, Some(word) if first_server.is_answer(word));
    Ok(())
}

#[test]
fn random_selection_has_no_daily_answer() -> Result<(), SverdleError> {
    let dictionary = Dictionary::load(&GameConfig::default())?;
    let date = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();

    assert_eq!(dictionary.pick_answer_on(date), None);
    Ok(())
}

#[test]
fn empty_answer_list_is_a_configuration_error() {
    let config = GameConfig {
        answers: words(&[]),
        ..GameConfig::default()
    };

    assert_matches!(
        Dictionary::load(&config),
        Err(SverdleError::Configuration(_))
    );
}

#[test]
fn empty_accepted_list_is_a_configuration_error() -> Result<(), SverdleError> {
    let config = GameConfig {
        accepted_guesses: words(&[]),
        ..GameConfig::default()
    };

    assert_matches!(
        Dictionary::load(&config),
        Err(SverdleError::Configuration(message)) if message.contains("accepted guess list")
    );
    assert_matches!(
        Dictionary::new(
            WordBank::from_iterator(vec!["crane"])?,
            WordBank::from_iterator(Vec::<&str>::new())?,
            AnswerSelection::Random,
        ),
        Err(SverdleError::Configuration(_))
    );
    Ok(())
}

#[test]
fn mixed_lengths_are_a_configuration_error() {
    let config = GameConfig {
        answers: words(&["crane", "cranes"]),
        ..GameConfig::default()
    };

    assert_matches!(
        Dictionary::load(&config),
        Err(SverdleError::Configuration(_))
    );
}

#[test]
fn word_length_must_match_the_answers() {
    let config = GameConfig {
        word_length: 6,
        ..GameConfig::default()
    };

    assert_matches!(
        Dictionary::load(&config),
        Err(SverdleError::Configuration(_))
    );
}

#[test]
fn accepted_guesses_must_match_the_answers() {
    let config = GameConfig {
        word_length: 4,
        answers: words(&["goal", "bead"]),
        ..GameConfig::default()
    };

    assert_matches!(
        Dictionary::load(&config),
        Err(SverdleError::Configuration(_))
    );
}

#[test]
fn other_word_lengths_are_supported() -> Result<(), SverdleError> {
    let config = GameConfig {
        word_length: 4,
        answers: words(&["goal", "bead"]),
        accepted_guesses: words(&["abba", "abcb"]),
        ..GameConfig::default()
    };

    let dictionary = Dictionary::load(&config)?;

    assert_eq!(dictionary.word_length(), 4);
    assert!(dictionary.is_accepted_guess("abba"));
    assert!(!dictionary.is_accepted_guess("crane"));
    Ok(())
}
