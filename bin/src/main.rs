use clap::{Parser, Subcommand};
use log::debug;
use std::io;
use std::io::Write;
use std::process;
use sverdle::*;

/// Play Sverdle from the command line. Every command is stateless: the game lives entirely in
/// the token that each command prints, exactly as it would in a browser cookie.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a RON file with the game config. Defaults are used for anything it leaves out.
    #[clap(short = 'c', long)]
    config: Option<String>,

    /// Passphrase for encrypting game tokens. Overrides the config file. Tokens printed by one
    /// run can only be read by a later run with the same secret.
    #[clap(short = 's', long)]
    secret: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game and print its token.
    New,
    /// Submit one guess against the game in the given token.
    Guess { token: String, word: String },
    /// Play a full game interactively.
    Play,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let game = match load_game(&args) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let result = match args.command {
        Command::New => print_new_game(&game),
        Command::Guess { token, word } => guess_once(&game, &token, &word),
        Command::Play => play_interactive_game(&game),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_game(args: &Args) -> Result<Sverdle, SverdleError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(secret) = &args.secret {
        config.secret = Some(secret.clone());
    }
    let game = Sverdle::from_config(&config)?;
    debug!(
        "Playing with {} answers, chosen by {:?}.",
        game.dictionary().num_answers(),
        game.dictionary().selection()
    );
    Ok(game)
}

fn print_new_game(game: &Sverdle) -> Result<(), SverdleError> {
    let (view, token) = game.start_new_game()?;
    println!(
        "New game: guess the {}-letter word in {} tries.",
        view.word_length, view.max_guesses
    );
    println!("token: {}", token);
    Ok(())
}

fn guess_once(game: &Sverdle, token: &str, word: &str) -> Result<(), SverdleError> {
    match game.submit_guess(token, word) {
        Ok(submission) => {
            print_board(&submission.view);
            print_status(&submission.view);
            println!("token: {}", submission.token);
        }
        Err(e @ SverdleError::InvalidGuess { .. }) | Err(e @ SverdleError::GameAlreadyOver(_)) => {
            // The token still holds a valid game, so show where it stands.
            if let Ok(view) = game.view(token) {
                print_board(&view);
                print_status(&view);
            }
            println!("{}", e);
            println!("token: {}", token);
        }
        Err(SverdleError::Decode(e)) => {
            println!("Couldn't read that game ({}). Starting a new one.", e);
            print_new_game(game)?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn play_interactive_game(game: &Sverdle) -> Result<(), SverdleError> {
    let (mut view, mut token) = game.start_new_game()?;
    println!(
        "Guess the {}-letter word in {} tries.\n\n\
         After each guess, every letter is marked:\n\n\
           * 'x' = this letter is in the word and in the right location\n\
           * 'c' = this letter is in the word, but not in this location\n\
           * '_' = this letter is not in the word (or not that many times)\n\n\
         Type 'restart' for a new word, or 'exit' to quit.",
        view.word_length, view.max_guesses
    );

    loop {
        if view.status.is_over() {
            print_status(&view);
            println!("Type 'restart' to play again, or 'exit' to quit.");
        } else {
            print!("Guess {} of {}: ", view.guesses.len() + 1, view.max_guesses);
        }
        io::stdout().flush()?;

        let mut buffer = String::new();
        if io::stdin().read_line(&mut buffer)? == 0 {
            return Ok(());
        }
        match buffer.trim() {
            "exit" => return Ok(()),
            "restart" => {
                (view, token) = game.restart()?;
                println!("New word chosen.");
                continue;
            }
            "" => continue,
            _ => {}
        }

        match game.submit_guess(&token, &buffer) {
            Ok(submission) => {
                token = submission.token;
                view = submission.view;
                print_board(&view);
                print_keyboard(&view);
            }
            Err(e @ SverdleError::InvalidGuess { .. })
            | Err(e @ SverdleError::GameAlreadyOver(_)) => {
                print_board(&view);
                println!("{}", e);
            }
            Err(SverdleError::Decode(e)) => {
                println!("Lost track of the game ({}). Starting a new one.", e);
                (view, token) = game.resume(None)?;
            }
            Err(e) => return Err(e),
        }
    }
}

fn print_board(view: &GameView) {
    for record in &view.guesses {
        let letters: String = record.guess.chars().flat_map(|c| [c, ' ']).collect();
        let pattern: String = record.pattern().chars().flat_map(|c| [c, ' ']).collect();
        println!("\t{}\n\t{}", letters.trim_end(), pattern.trim_end());
    }
}

fn print_keyboard(view: &GameView) {
    let mut line = String::new();
    for (letter, result) in &view.letter_states {
        if *result != LetterResult::Absent {
            line.push_str(&format!("{}:{} ", letter, result.code()));
        }
    }
    let absent: String = view
        .letter_states
        .iter()
        .filter(|(_, result)| **result == LetterResult::Absent)
        .map(|(letter, _)| *letter)
        .collect();
    println!("Found: {}| Ruled out: {}", line, absent);
}

fn print_status(view: &GameView) {
    match view.status {
        GameStatus::InProgress => println!("{} guesses left.", view.remaining_guesses),
        GameStatus::Won => println!("You got it in {}!", view.guesses.len()),
        GameStatus::Lost => println!(
            "Out of guesses. The word was '{}'.",
            view.answer.as_deref().unwrap_or("?")
        ),
    }
}
