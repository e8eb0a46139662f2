//! Round simulation driver: random players against the house until the
//! table empties or the round cap is hit.

use std::time::{SystemTime, UNIX_EPOCH};

use pontoon::{EventSink, Game, GameEvent, GameOptions, RandomStrategy};

/// Rounds to play before giving up on ever bankrupting the table.
const MAX_ROUNDS: usize = 10_000;

/// Prints the round-level event stream to stdout.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShoeRefreshed { decks, cards } => {
                println!("-- fresh shoe: {decks} decks, {cards} cards");
            }
            GameEvent::PlayerExcluded { player, stash } => {
                println!("-- {player} leaves the table with {stash:.1}");
            }
            GameEvent::HandBusted { player, total, .. } => {
                println!("   {player} busts at {total}");
            }
            GameEvent::RoundEnded { ending } => {
                println!("   round over: {ending:?}");
            }
            _ => {}
        }
    }
}

fn main() {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let options = GameOptions::default();
    let strategy = Box::new(RandomStrategy::new(seed));
    let mut game = match Game::new(options, strategy, Box::new(ConsoleSink), seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("setup failed: {err}");
            return;
        }
    };

    let mut rounds = 0;
    while !game.players().is_empty() && rounds < MAX_ROUNDS {
        if game.shoe().is_exhausted() {
            if let Err(err) = game.refresh_shoe() {
                eprintln!("shoe refresh failed: {err}");
                return;
            }
        }

        match game.play_round() {
            Ok(_) => rounds += 1,
            Err(err) => {
                eprintln!("round failed: {err}");
                return;
            }
        }
    }

    println!("\n{rounds} rounds played");
    for player in game.players() {
        println!("{} finishes with {:.1}", player.name(), player.stash());
    }
}
