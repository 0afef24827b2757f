use serde::Serialize;

use crate::elo;
use crate::scoreline::ScorelineProbs;

// An away side more than this many Elo points above the home side is treated
// as a cup-upset risk for home-leaning calls.
pub const CUP_UPSET_ELO_MARGIN: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct CouncilVote {
    pub elo_vote: bool,
    pub poisson_vote: bool,
    pub context_vote: bool,
}

impl CouncilVote {
    pub fn consensus(self) -> u8 {
        self.elo_vote as u8 + self.poisson_vote as u8 + self.context_vote as u8
    }
}

// The Poisson vote compares the adjusted rates directly, not the enumerated
// scoreline distribution.
pub fn cast_votes(
    elo_home: f64,
    elo_away: f64,
    lambda_home: f64,
    lambda_away: f64,
    is_cup: bool,
) -> CouncilVote {
    CouncilVote {
        elo_vote: elo::expected_score(elo_home, elo_away) > 0.5,
        poisson_vote: lambda_home > lambda_away,
        context_vote: !(elo_away > elo_home + CUP_UPSET_ELO_MARGIN && is_cup),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

pub fn confidence_tier(consensus: u8) -> Confidence {
    match consensus {
        3 => Confidence::High,
        2 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoubleChanceCall {
    HomeOrDraw,
    DrawOrAway,
    HomeOrAway,
}

impl DoubleChanceCall {
    pub fn label(self) -> &'static str {
        match self {
            DoubleChanceCall::HomeOrDraw => "1X",
            DoubleChanceCall::DrawOrAway => "X2",
            DoubleChanceCall::HomeOrAway => "12",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DoubleChanceMarket {
    pub call: DoubleChanceCall,
    // Percent, from the scoreline distribution.
    pub prob: f64,
    pub fair_odds: f64,
}

pub fn select_double_chance(
    consensus: u8,
    probs: ScorelineProbs,
    odds_home: f64,
    odds_draw: f64,
    odds_away: f64,
) -> DoubleChanceMarket {
    if consensus >= 2 {
        DoubleChanceMarket {
            call: DoubleChanceCall::HomeOrDraw,
            prob: (probs.home_win + probs.draw) * 100.0,
            fair_odds: combine_odds(odds_home, odds_draw),
        }
    } else if consensus <= 1 {
        DoubleChanceMarket {
            call: DoubleChanceCall::DrawOrAway,
            prob: (probs.draw + probs.away_win) * 100.0,
            fair_odds: combine_odds(odds_draw, odds_away),
        }
    } else {
        // Dead arm: three boolean votes always land in one of the two
        // branches above.
        DoubleChanceMarket {
            call: DoubleChanceCall::HomeOrAway,
            prob: (probs.home_win + probs.away_win) * 100.0,
            fair_odds: combine_odds(odds_home, odds_away),
        }
    }
}

// Harmonic combination of two decimal prices into one double-chance price.
fn combine_odds(a: f64, b: f64) -> f64 {
    1.0 / (1.0 / a + 1.0 / b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consensus_counts_true_votes() {
        let vote = CouncilVote {
            elo_vote: true,
            poisson_vote: false,
            context_vote: true,
        };
        assert_eq!(vote.consensus(), 2);
    }

    #[test]
    fn cup_upset_flips_context_vote() {
        let vote = cast_votes(1500.0, 1650.0, 1.25, 0.95, true);
        assert!(!vote.context_vote);

        // Same gap outside a cup keeps the vote.
        let vote = cast_votes(1500.0, 1650.0, 1.25, 0.95, false);
        assert!(vote.context_vote);

        // A gap of exactly 100 points is not an upset.
        let vote = cast_votes(1500.0, 1600.0, 1.25, 0.95, true);
        assert!(vote.context_vote);
    }

    #[test]
    fn confidence_is_total_over_consensus() {
        assert_eq!(confidence_tier(3), Confidence::High);
        assert_eq!(confidence_tier(2), Confidence::Medium);
        assert_eq!(confidence_tier(1), Confidence::Low);
        assert_eq!(confidence_tier(0), Confidence::Low);
    }

    #[test]
    fn majority_selects_home_or_draw() {
        let probs = ScorelineProbs {
            home_win: 0.5,
            draw: 0.25,
            away_win: 0.2,
        };
        let market = select_double_chance(2, probs, 1.86, 4.12, 4.27);
        assert_eq!(market.call, DoubleChanceCall::HomeOrDraw);
        assert!((market.prob - 75.0).abs() < 1e-9);

        let expected = 1.0 / (1.0 / 1.86 + 1.0 / 4.12);
        assert!((market.fair_odds - expected).abs() < 1e-12);
    }

    #[test]
    fn split_council_selects_draw_or_away() {
        let probs = ScorelineProbs {
            home_win: 0.3,
            draw: 0.3,
            away_win: 0.35,
        };
        let market = select_double_chance(1, probs, 2.50, 3.30, 2.80);
        assert_eq!(market.call, DoubleChanceCall::DrawOrAway);
        assert!((market.prob - 65.0).abs() < 1e-9);

        let expected = 1.0 / (1.0 / 3.30 + 1.0 / 2.80);
        assert!((market.fair_odds - expected).abs() < 1e-12);
    }
}
