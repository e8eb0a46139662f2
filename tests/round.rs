//! Round engine integration tests.

use pontoon::{
    Card, ConfigurationError, Game, GameError, GameEvent, GameOptions, Hand, HandStatus,
    MemorySink, Move, Rank, RoundEnding, ScriptedStrategy, Shoe, Suit,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Builds a shoe dealing `draws` front to back.
fn stacked_shoe(draws: &[(Rank, Suit)]) -> Shoe {
    let mut cards: Vec<Card> = draws
        .iter()
        .map(|&(rank, suit)| Card::new(suit, rank))
        .collect();
    cards.reverse();
    Shoe::from_cards(cards)
}

fn solo_options() -> GameOptions {
    GameOptions::default().with_players(1).with_starting_stash(100.0)
}

/// Creates a game with a scripted strategy and a stacked shoe, with the
/// construction-time shoe events dropped from the sink.
fn scripted_game(
    options: GameOptions,
    strategy: ScriptedStrategy,
    draws: &[(Rank, Suit)],
) -> (Game, MemorySink) {
    let sink = MemorySink::new();
    let mut game = Game::new(options, Box::new(strategy), Box::new(sink.clone()), 1)
        .expect("valid options");
    game.set_shoe(stacked_shoe(draws));
    sink.clear();
    (game, sink)
}

#[test]
fn hand_totals_and_one_shot_ace_downgrades() {
    let mut hand = Hand::new();
    hand.push_card(card(Suit::Hearts, Rank::Ace));
    hand.push_card(card(Suit::Spades, Rank::Ace));

    assert_eq!(hand.total_value(), 22);
    assert!(hand.is_soft());

    assert!(hand.try_downgrade_ace());
    assert_eq!(hand.total_value(), 12);
    assert!(hand.is_soft());

    assert!(hand.try_downgrade_ace());
    assert_eq!(hand.total_value(), 2);
    assert!(!hand.is_soft());

    // No ace left at 11: the hand must be treated as it lies.
    assert!(!hand.try_downgrade_ace());
    assert_eq!(hand.total_value(), 2);
}

#[test]
fn soft_hand_escapes_bust_once() {
    let mut hand = Hand::new();
    hand.push_card(card(Suit::Clubs, Rank::King));
    hand.push_card(card(Suit::Diamonds, Rank::Six));
    hand.push_card(card(Suit::Hearts, Rank::Ace));

    assert_eq!(hand.total_value(), 27);
    assert!(hand.try_downgrade_ace());
    assert_eq!(hand.total_value(), 17);
    assert!(!hand.try_downgrade_ace());
}

#[test]
fn natural_and_pair_queries() {
    let mut natural = Hand::new();
    natural.push_card(card(Suit::Hearts, Rank::Ace));
    natural.push_card(card(Suit::Spades, Rank::King));
    assert!(natural.is_natural());
    assert!(!natural.is_pair());

    let mut pair = Hand::new();
    pair.push_card(card(Suit::Hearts, Rank::Eight));
    pair.push_card(card(Suit::Clubs, Rank::Eight));
    assert!(pair.is_pair());
    assert!(!pair.is_natural());
}

#[test]
fn card_conservation_across_a_shoe() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut shoe = Shoe::new(1);
    shoe.shuffle(&mut rng);
    shoe.insert_cut_card(10).unwrap();

    let mut dealt = Vec::new();
    loop {
        match shoe.deal(true) {
            Ok(card) => dealt.push((card.rank, card.suit)),
            Err(ConfigurationError::EmptyShoe) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    assert_eq!(dealt.len(), 52);
    assert!(shoe.is_exhausted());
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let copies = dealt.iter().filter(|&&c| c == (rank, suit)).count();
            assert_eq!(copies, 1, "{rank}{suit} dealt {copies} times");
        }
    }
}

#[test]
fn cut_card_is_dealt_transparently() {
    let mut shoe = Shoe::from_cards(vec![
        card(Suit::Hearts, Rank::Two),
        card(Suit::Hearts, Rank::Three),
        card(Suit::Hearts, Rank::Four),
    ]);
    shoe.insert_cut_card(2).unwrap();

    assert_eq!(shoe.deal(true).unwrap().rank, Rank::Four);
    assert_eq!(shoe.deal(true).unwrap().rank, Rank::Three);
    assert!(!shoe.is_exhausted());

    // The blank is next: the flag flips and the real card below it comes
    // back instead.
    let card = shoe.deal(true).unwrap();
    assert_eq!(card.rank, Rank::Two);
    assert!(shoe.is_exhausted());
}

#[test]
fn cut_rotates_the_front_to_the_back() {
    let ranks = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six];
    let mut shoe = Shoe::from_cards(
        ranks
            .iter()
            .map(|&rank| card(Suit::Spades, rank))
            .collect(),
    );

    // floor(0.5 * 4) = 2: [2,3,4,5,6] becomes [4,5,6,2,3].
    shoe.cut(0.5);
    assert_eq!(shoe.deal(true).unwrap().rank, Rank::Three);
    assert_eq!(shoe.deal(true).unwrap().rank, Rank::Two);
    assert_eq!(shoe.deal(true).unwrap().rank, Rank::Six);
}

#[test]
fn cut_card_offset_is_validated() {
    let mut shoe = Shoe::new(1);
    assert_eq!(
        shoe.insert_cut_card(0),
        Err(ConfigurationError::CutOffsetOutOfRange { offset: 0, len: 52 })
    );
    assert_eq!(
        shoe.insert_cut_card(52),
        Err(ConfigurationError::CutOffsetOutOfRange {
            offset: 52,
            len: 52
        })
    );
    assert!(shoe.insert_cut_card(51).is_ok());
}

#[test]
fn player_natural_wins_at_two_and_a_half() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        // Poison: insurance must not be queried without a house ace.
        .with_insurances([true]);
    let (mut game, sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Ace, Suit::Hearts),  // player
            (Rank::King, Suit::Clubs),  // house up
            (Rank::King, Suit::Diamonds), // player
            (Rank::Nine, Suit::Spades), // house hole
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::AllNaturals);
    assert_eq!(result.players[0].hands[0].status, HandStatus::NaturalWin);
    assert_eq!(result.players[0].hands[0].payout, 25.0);
    assert_eq!(result.players[0].insurance, 0.0);
    assert_eq!(game.players()[0].stash(), 115.0);

    let events = sink.events();
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::InsurancePlaced { .. })),
        "insurance window ran without a house ace"
    );
    assert!(matches!(events.first(), Some(GameEvent::BetPlaced { .. })));
    assert!(matches!(events.last(), Some(GameEvent::RoundEnded { .. })));
}

#[test]
fn house_natural_pays_insurance_regardless_of_hand() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_insurances([true])
        .with_insurance_amounts([5.0]);
    let (mut game, sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Nine, Suit::Hearts),  // player
            (Rank::Ace, Suit::Spades),   // house up: insurance window
            (Rank::Seven, Suit::Diamonds), // player
            (Rank::King, Suit::Clubs),   // house hole: natural
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::HouseNatural);
    assert_eq!(result.house_status, HandStatus::Natural);
    assert_eq!(result.players[0].insurance, 5.0);
    assert_eq!(result.players[0].insurance_payout, 10.0);
    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
    // 100 - 10 (bet) - 5 (stake) + 10 (insurance payout).
    assert_eq!(game.players()[0].stash(), 95.0);

    let events = sink.events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::InsurancePlaced { stake, .. } if *stake == 5.0
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::InsurancePaid { payout, .. } if *payout == 10.0
    )));
}

#[test]
fn natural_tie_refunds_the_bet() {
    let strategy = ScriptedStrategy::new().with_bets([10.0]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Ace, Suit::Hearts),  // player
            (Rank::Ace, Suit::Spades),  // house up
            (Rank::King, Suit::Diamonds), // player
            (Rank::King, Suit::Clubs),  // house hole: natural
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::HouseNatural);
    assert_eq!(result.players[0].hands[0].status, HandStatus::NaturalTie);
    assert_eq!(game.players()[0].stash(), 100.0);
}

#[test]
fn double_down_takes_exactly_one_card_and_locks() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_doubles([true])
        // Poison: a doubled hand must never be asked to hit or stand.
        .with_moves([Move::Hit]);
    let (mut game, sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Five, Suit::Hearts),  // player
            (Rank::Two, Suit::Clubs),    // house up
            (Rank::Four, Suit::Diamonds), // player: 9, eligible
            (Rank::Seven, Suit::Spades), // house hole: 9
            (Rank::Nine, Suit::Hearts),  // double-down card: 18
            (Rank::Eight, Suit::Clubs),  // house draw: 17
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::Showdown);
    assert_eq!(result.players[0].bet, 20.0);
    assert_eq!(result.players[0].hands[0].total, 18);
    assert_eq!(result.players[0].hands[0].status, HandStatus::RegularWin);
    assert_eq!(result.players[0].hands[0].payout, 40.0);
    // 100 - 10 - 10 (double) + 40.
    assert_eq!(game.players()[0].stash(), 120.0);

    let player_cards = sink
        .events()
        .iter()
        .filter(|event| {
            matches!(event, GameEvent::CardDealt { recipient, .. } if recipient == "player1")
        })
        .count();
    assert_eq!(player_cards, 3);
}

#[test]
fn double_down_requires_an_eligible_total() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        // Poison: must not be consumed for a total of 12.
        .with_doubles([true])
        .with_moves([Move::Stand]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Five, Suit::Hearts),   // player
            (Rank::Ten, Suit::Clubs),     // house up
            (Rank::Seven, Suit::Diamonds), // player: 12
            (Rank::Ten, Suit::Spades),    // house hole: 20
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.players[0].bet, 10.0);
    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
    assert_eq!(game.players()[0].stash(), 90.0);
}

#[test]
fn split_deals_one_card_to_each_hand() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_splits([true])
        .with_moves([Move::Stand, Move::Stand]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Eight, Suit::Hearts),  // player
            (Rank::Five, Suit::Clubs),    // house up
            (Rank::Eight, Suit::Diamonds), // player: pair
            (Rank::Nine, Suit::Spades),   // house hole: 14
            (Rank::Two, Suit::Hearts),    // first split hand: 10
            (Rank::Three, Suit::Clubs),   // second split hand: 11
            (Rank::Ten, Suit::Hearts),    // house draw: 24, bust
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::Showdown);
    assert_eq!(result.house_status, HandStatus::Loss);
    assert_eq!(result.players[0].hands.len(), 2);
    for hand in &result.players[0].hands {
        assert_eq!(hand.status, HandStatus::RegularWin);
        assert_eq!(hand.payout, 20.0);
    }
    // 100 - 10 - 10 (second bet) + 40.
    assert_eq!(game.players()[0].stash(), 120.0);
}

#[test]
fn split_aces_take_one_hit_each_and_stop() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_splits([true])
        // Poison: split aces must not be asked to hit or stand.
        .with_moves([Move::Hit]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Ace, Suit::Hearts),  // player
            (Rank::Nine, Suit::Clubs),  // house up
            (Rank::Ace, Suit::Diamonds), // player: ace pair
            (Rank::Nine, Suit::Spades), // house hole: 18
            (Rank::King, Suit::Hearts), // first split hand: 21
            (Rank::Five, Suit::Clubs),  // second split hand: 16
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.players[0].hands.len(), 2);
    assert_eq!(result.players[0].hands[0].total, 21);
    assert_eq!(result.players[0].hands[0].status, HandStatus::RegularWin);
    assert_eq!(result.players[0].hands[1].total, 16);
    assert_eq!(result.players[0].hands[1].status, HandStatus::Loss);
    // 100 - 20 (two bets) + 20 (first hand).
    assert_eq!(game.players()[0].stash(), 100.0);
}

#[test]
fn declined_ace_split_downgrades_before_play() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_splits([false])
        .with_moves([Move::Stand]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Ace, Suit::Hearts),  // player
            (Rank::Ten, Suit::Clubs),   // house up
            (Rank::Ace, Suit::Diamonds), // player: ace pair, declined
            (Rank::Eight, Suit::Spades), // house hole: 18
        ],
    );

    let result = game.play_round().unwrap();

    // The pair plays as 12, not as a standing 22.
    assert_eq!(result.players[0].hands[0].total, 12);
    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
}

#[test]
fn all_bust_skips_the_house_turn() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_moves([Move::Hit]);
    let (mut game, sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Ten, Suit::Hearts),  // player
            (Rank::Seven, Suit::Clubs), // house up
            (Rank::Nine, Suit::Diamonds), // player: 19
            (Rank::Eight, Suit::Spades), // house hole
            (Rank::King, Suit::Hearts), // hit: 29, bust
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.ending, RoundEnding::AllBust);
    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
    assert_eq!(game.players()[0].stash(), 90.0);

    let events = sink.events();
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::HandBusted { player, total: 29, .. } if player == "player1"
    )));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, GameEvent::HandRevealed { .. })),
        "house revealed its hand in an all-bust round"
    );
}

#[test]
fn hit_into_a_soft_hand_downgrades_instead_of_busting() {
    let strategy = ScriptedStrategy::new()
        .with_bets([10.0])
        .with_moves([Move::Hit, Move::Stand]);
    let (mut game, sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::King, Suit::Hearts), // player
            (Rank::Ten, Suit::Clubs),   // house up
            (Rank::Six, Suit::Diamonds), // player: 16
            (Rank::Nine, Suit::Spades), // house hole: 19
            (Rank::Ace, Suit::Hearts),  // hit: 27 soft, downgrades to 17
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.players[0].hands[0].total, 17);
    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
    assert!(
        !sink
            .events()
            .iter()
            .any(|event| matches!(event, GameEvent::HandBusted { .. })),
        "a downgradable hand was busted"
    );
}

#[test]
fn bankrupt_players_leave_the_roster_cleanly() {
    let options = GameOptions::default().with_players(2).with_starting_stash(3.0);
    let strategy = ScriptedStrategy::new()
        .with_bets([2.0, 2.0])
        .with_moves([Move::Stand, Move::Stand]);
    let (mut game, sink) = scripted_game(
        options,
        strategy,
        &[
            (Rank::Five, Suit::Hearts),  // player1
            (Rank::King, Suit::Clubs),   // player2
            (Rank::Six, Suit::Diamonds), // house up
            (Rank::Seven, Suit::Hearts), // player1: 12
            (Rank::Nine, Suit::Clubs),   // player2: 19
            (Rank::Ten, Suit::Spades),   // house hole: 16
            (Rank::Two, Suit::Hearts),   // house draw: 18
        ],
    );

    let result = game.play_round().unwrap();

    assert_eq!(result.players[0].hands[0].status, HandStatus::Loss);
    assert_eq!(result.players[1].hands[0].status, HandStatus::RegularWin);

    // player1 is down to 1, below the minimum bet of 2.
    let names: Vec<&str> = game.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["player2"]);
    assert_eq!(game.players()[0].stash(), 5.0);

    assert!(sink.events().iter().any(|event| matches!(
        event,
        GameEvent::PlayerExcluded { player, .. } if player == "player1"
    )));
}

#[test]
fn out_of_range_bet_aborts_the_round() {
    let strategy = ScriptedStrategy::new().with_bets([1000.0]);
    let (mut game, _sink) = scripted_game(
        solo_options(),
        strategy,
        &[
            (Rank::Five, Suit::Hearts),
            (Rank::Ten, Suit::Clubs),
            (Rank::Seven, Suit::Diamonds),
            (Rank::Ten, Suit::Spades),
        ],
    );

    match game.play_round() {
        Err(GameError::Configuration(ConfigurationError::BetOutOfRange {
            player,
            amount,
            ..
        })) => {
            assert_eq!(player, "player1");
            assert_eq!(amount, 1000.0);
        }
        other => panic!("expected a bet range error, got {other:?}"),
    }
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_decks(8)
        .with_players(6)
        .with_starting_stash(250.0)
        .with_min_bet(5.0)
        .with_max_bet(100.0)
        .with_cut_card_offsets(40..50)
        .with_double_down_totals(9..=10)
        .with_house_stand_threshold(16)
        .with_natural_bonus(1.2);

    assert_eq!(options.decks, 8);
    assert_eq!(options.players, 6);
    assert_eq!(options.starting_stash, 250.0);
    assert_eq!(options.min_bet, 5.0);
    assert_eq!(options.max_bet, 100.0);
    assert_eq!(options.cut_card_offsets, 40..50);
    assert_eq!(options.double_down_totals, 9..=10);
    assert_eq!(options.house_stand_threshold, 16);
    assert_eq!(options.natural_bonus, 1.2);
}

#[test]
fn events_serialize_as_structured_records() {
    let event = GameEvent::BetPlaced {
        player: "player1".to_string(),
        amount: 10.0,
    };

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["BetPlaced"]["player"], "player1");
    assert_eq!(value["BetPlaced"]["amount"], 10.0);
}

#[test]
fn random_session_runs_to_shoe_exhaustion() {
    let sink = MemorySink::new();
    let options = GameOptions::default().with_players(3).with_starting_stash(500.0);
    let mut game = Game::new(
        options,
        Box::new(pontoon::RandomStrategy::new(11)),
        Box::new(sink.clone()),
        11,
    )
    .expect("valid options");

    let results = game.play_shoe_session().expect("session completes");

    assert!(!results.is_empty());
    assert!(game.shoe().is_exhausted() || game.players().is_empty());
    assert!(sink.events().iter().any(|event| matches!(
        event,
        GameEvent::RoundEnded { .. }
    )));
}
