use serde::{Deserialize, Serialize};

use crate::engine::simulator::HandRecord;

/// Aggregate results of a session from one seat's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_hands: u32,
    pub hero_wins: u32,
    pub opponent_wins: u32,
    pub split_pots: u32,
    pub showdowns: u32,
    /// Sum of the hero's net chips over the session.
    pub hero_net: i64,
    pub average_pot: f64,
    pub win_rate: f64,
    pub showdown_rate: f64,
}

impl SessionStats {
    /// Tally `records` with `hero_seat` as the hero. A hand counts as a split
    /// when more than one seat is paid.
    pub fn from_records(records: &[HandRecord], hero_seat: usize) -> Self {
        let mut stats = SessionStats::default();
        let mut pot_total = 0u64;
        for rec in records {
            stats.total_hands += 1;
            pot_total += rec.final_pot as u64;
            stats.hero_net += rec.net(hero_seat);
            if rec.went_to_showdown() {
                stats.showdowns += 1;
            }
            match rec.winners.as_slice() {
                [seat] if *seat == hero_seat => stats.hero_wins += 1,
                [_]                          => stats.opponent_wins += 1,
                _                            => stats.split_pots += 1,
            }
        }
        if stats.total_hands > 0 {
            let n = stats.total_hands as f64;
            stats.average_pot = pot_total as f64 / n;
            stats.win_rate = stats.hero_wins as f64 / n;
            stats.showdown_rate = stats.showdowns as f64 / n;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ai::SkillLevel;
    use crate::engine::simulator::{simulate_hand, Blinds, HERO_SEAT};

    #[test]
    fn empty_session() {
        let stats = SessionStats::from_records(&[], HERO_SEAT);
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn tallies_add_up() {
        let records: Vec<HandRecord> = (0..40)
            .map(|seed| simulate_hand(SkillLevel::Easy, &[1000, 1000], Blinds::default(), seed).unwrap())
            .collect();
        let stats = SessionStats::from_records(&records, HERO_SEAT);
        assert_eq!(stats.total_hands, 40);
        assert_eq!(stats.hero_wins + stats.opponent_wins + stats.split_pots, 40);
        assert!(stats.showdowns <= 40);
        assert!(stats.average_pot >= 30.0);
        assert!((0.0..=1.0).contains(&stats.win_rate));

        let net: i64 = records.iter().map(|r| r.net(HERO_SEAT)).sum();
        assert_eq!(stats.hero_net, net);
        let villain = SessionStats::from_records(&records, 1);
        assert_eq!(villain.hero_wins, stats.opponent_wins);
        assert_eq!(villain.hero_net, -stats.hero_net);
    }
}
