#![feature(test)]

extern crate test;

use sverdle::*;
use test::Bencher;

#[bench]
fn bench_encode_new_game(b: &mut Bencher) -> Result<(), SverdleError> {
    let codec = TokenCodec::from_secret("bench");
    let state = GameState::new("crane", 6)?;

    b.iter(|| codec.encode(&state));
    Ok(())
}

#[bench]
fn bench_submit_guess_round_trip(b: &mut Bencher) -> Result<(), SverdleError> {
    let game = Sverdle::from_config(&GameConfig {
        secret: Some("bench".to_string()),
        ..GameConfig::default()
    })?;
    let (_, token) = game.start_new_game()?;

    b.iter(|| game.submit_guess(&token, "trace"));
    Ok(())
}
