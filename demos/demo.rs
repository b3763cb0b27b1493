//! End-to-end tour of the engine.
//!
//! Run with: `RUST_LOG=debug cargo run --example demo`
//!
//! 1. **Evaluation**: ranks a few hands, including a wheel and a royal flush.
//! 2. **Equity**: AKs vs 77 preflop by Monte Carlo, AA vs KK on a flop
//!    exactly, and a range matchup split across rayon batches.
//! 3. **Simulation**: one hand per skill level with its street summaries,
//!    then session statistics over 200 hands.

use holdem_core::engine::equity::equity_parallel;
use holdem_core::engine::simulator::HERO_SEAT;
use holdem_core::{
    equity, equity_exact, evaluate, parse_cards, simulate_with, EngineConfig, Range,
    SessionStats, SkillLevel,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = EngineConfig::default();

    println!("── Evaluation ──────────────────────────────────────────────");
    for hand in ["AsKsQsJsTs", "Ah 2c 3d 4s 5h 9c Kd", "Td Th 4c 4s 4d 2h", "Kc Qd 8h 6s 3c"] {
        let rank = evaluate(&parse_cards(hand)?)?;
        println!("  {hand:<22} {rank}");
    }

    println!("── Equity ──────────────────────────────────────────────────");
    let r = equity(&"AsKs".parse()?, &"7h7d".parse()?, &[], config.default_iterations, 42)?;
    println!(
        "  AsKs vs 7h7d       win {:.2}%  tie {:.2}%  loss {:.2}%  ({} samples)",
        r.win * 100.0, r.tie * 100.0, r.loss * 100.0, r.iterations
    );

    let flop = parse_cards("Kd 7c 2s")?;
    let r = equity_exact("AsAh".parse()?, "KsKh".parse()?, &flop)?;
    println!("  AsAh vs KsKh on Kd7c2s (exact)   equity {:.2}%", r.equity() * 100.0);

    let r = equity_parallel(
        &Range::parse("TT+, AQs+")?,
        &Range::parse("AKo, 99")?,
        &[],
        config.default_iterations,
        7,
        config.equity_batches,
    )?;
    println!("  TT+,AQs+ vs AKo,99 (parallel)    equity {:.2}%", r.equity() * 100.0);

    println!("── Simulation ──────────────────────────────────────────────");
    for (seed, skill) in [(1, SkillLevel::Easy), (2, SkillLevel::Medium), (3, SkillLevel::Hard)] {
        let mut setup = config.simulation(seed);
        setup.opponent_skill = skill;
        let rec = simulate_with(setup)?;
        println!(
            "  vs {skill:<6} hero {}  opponent {}  board [{}]",
            rec.hole_cards[0],
            rec.hole_cards[1],
            holdem_core::engine::helpers::board_str(&rec.board)
        );
        for street in &rec.streets {
            let actions: Vec<String> = street.actions.iter().map(|a| format!("s{} {}", a.seat, a.kind)).collect();
            println!(
                "    {:<8} pot {:>4} -> {:>4}  {}",
                street.street.to_string(), street.pot_before, street.pot_after, actions.join(", ")
            );
        }
        for hand in &rec.showdown {
            println!("    seat {} shows {} ({})", hand.seat, hand.hole, hand.rank);
        }
        println!("    winners {:?}  final stacks {:?}", rec.winners, rec.final_stacks);
    }

    let records = (0..200)
        .map(|seed| simulate_with(config.simulation(seed)))
        .collect::<Result<Vec<_>, _>>()?;
    let stats = SessionStats::from_records(&records, HERO_SEAT);
    println!(
        "  200 hands: hero {} / opponent {} / split {}  win rate {:.1}%  showdown rate {:.1}%  avg pot {:.0}  net {:+}",
        stats.hero_wins,
        stats.opponent_wins,
        stats.split_pots,
        stats.win_rate * 100.0,
        stats.showdown_rate * 100.0,
        stats.average_pot,
        stats.hero_net
    );
    Ok(())
}
