use holdem_toss::cards::{Card, Evaluator, Hand, Rank, Suit};
use holdem_toss::game::GameState;
use holdem_toss::mccfr::Trainer;
use holdem_toss::persist::TrainingConfig;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_a_seven_card_hand,
        dealing_a_game_state,
        playing_out_a_full_hand,
        training_one_mccfr_iteration,
}

fn seven_card_hand() -> Hand {
    let cards = [
        Card::new(Rank::Ace, Suit::Spade),
        Card::new(Rank::King, Suit::Spade),
        Card::new(Rank::Queen, Suit::Spade),
        Card::new(Rank::Jack, Suit::Spade),
        Card::new(Rank::Ten, Suit::Spade),
        Card::new(Rank::Two, Suit::Heart),
        Card::new(Rank::Three, Suit::Heart),
    ];
    Hand::from(cards.to_vec())
}

fn evaluating_a_seven_card_hand(c: &mut criterion::Criterion) {
    let hand = seven_card_hand();
    c.bench_function("evaluate a 7-card hand", |b| {
        b.iter(|| Evaluator::from(hand).find_ranking())
    });
}

fn dealing_a_game_state(c: &mut criterion::Criterion) {
    c.bench_function("deal a fresh GameState", |b| {
        b.iter(|| GameState::new(7))
    });
}

fn playing_out_a_full_hand(c: &mut criterion::Criterion) {
    use holdem_toss::game::BettingAction;
    c.bench_function("play a full hand to showdown by checking/calling", |b| {
        b.iter(|| {
            let mut state = GameState::new(11);
            while !state.is_terminal() {
                let action = if state.legal_actions().contains(&BettingAction::Discard0) {
                    BettingAction::Discard0
                } else {
                    BettingAction::CheckCall
                };
                state = state.apply_action(action);
            }
            state
        })
    });
}

fn training_one_mccfr_iteration(c: &mut criterion::Criterion) {
    c.bench_function("run one external-sampling MCCFR iteration", |b| {
        b.iter(|| {
            let config = TrainingConfig {
                iterations: 1,
                checkpoint_interval: 1,
                checkpoint_path: std::env::temp_dir()
                    .join("holdem-toss-bench.chk")
                    .to_string_lossy()
                    .into_owned(),
                ..TrainingConfig::default()
            };
            let mut trainer = Trainer::new(config);
            trainer.train().expect("one training iteration should not fail")
        })
    });
}
