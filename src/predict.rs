use serde::{Deserialize, Serialize};

use crate::council::{self, Confidence, DoubleChanceCall};
use crate::gap_rating::{self, ShotCounts, TotalsCall};
use crate::kelly;
use crate::scoreline;

// Fixed home-advantage multipliers applied to the raw expected-goals inputs.
pub const HOME_XG_BOOST: f64 = 1.25;
pub const AWAY_XG_DAMP: f64 = 0.95;

// BTTS has no quoted price among the inputs; a flat market price is assumed.
const BTTS_ASSUMED_ODDS: f64 = 1.90;
const BTTS_YES_THRESHOLD: f64 = 0.52;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchInputs {
    pub elo_home: f64,
    pub elo_away: f64,
    pub xg_home: f64,
    pub xg_away: f64,
    pub shots_home: u32,
    pub sot_home: u32,
    pub corners_home: u32,
    pub shots_away: u32,
    pub sot_away: u32,
    pub corners_away: u32,
    pub odds_home: f64,
    pub odds_draw: f64,
    pub odds_away: f64,
    pub is_cup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BttsCall {
    Yes,
    No,
}

impl BttsCall {
    pub fn label(self) -> &'static str {
        match self {
            BttsCall::Yes => "YES",
            BttsCall::No => "NO",
        }
    }
}

// All probabilities are percentages; stakes are percent of bankroll.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PredictionResult {
    pub dc_call: DoubleChanceCall,
    pub dc_prob: f64,
    pub dc_fair_odds: f64,
    pub dc_stake: f64,
    pub btts_call: BttsCall,
    pub btts_prob: f64,
    pub btts_stake: f64,
    pub totals_call: TotalsCall,
    pub totals_prob: f64,
    pub gap: f64,
    pub confidence: Confidence,
    pub consensus: u8,
}

pub fn compute_prediction(inputs: &MatchInputs) -> PredictionResult {
    let lambda_home = inputs.xg_home * HOME_XG_BOOST;
    let lambda_away = inputs.xg_away * AWAY_XG_DAMP;

    let probs = scoreline::outcome_probs(lambda_home, lambda_away);
    let btts_prob = scoreline::btts_prob(lambda_home, lambda_away);

    let vote = council::cast_votes(
        inputs.elo_home,
        inputs.elo_away,
        lambda_home,
        lambda_away,
        inputs.is_cup,
    );
    let consensus = vote.consensus();

    let market = council::select_double_chance(
        consensus,
        probs,
        inputs.odds_home,
        inputs.odds_draw,
        inputs.odds_away,
    );

    let gap = gap_rating::gap_score(
        ShotCounts {
            shots: inputs.shots_home,
            on_target: inputs.sot_home,
            corners: inputs.corners_home,
        },
        ShotCounts {
            shots: inputs.shots_away,
            on_target: inputs.sot_away,
            corners: inputs.corners_away,
        },
    );
    let (totals_call, totals_prob) = gap_rating::classify(gap);

    let btts_call = if btts_prob > BTTS_YES_THRESHOLD {
        BttsCall::Yes
    } else {
        BttsCall::No
    };

    PredictionResult {
        dc_call: market.call,
        dc_prob: market.prob,
        dc_fair_odds: market.fair_odds,
        dc_stake: kelly::stake_pct(market.prob / 100.0, market.fair_odds),
        btts_call,
        btts_prob: btts_prob * 100.0,
        btts_stake: kelly::stake_pct(btts_prob, BTTS_ASSUMED_ODDS),
        totals_call,
        totals_prob,
        gap,
        confidence: council::confidence_tier(consensus),
        consensus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> MatchInputs {
        MatchInputs {
            elo_home: 1680.0,
            elo_away: 1620.0,
            xg_home: 1.65,
            xg_away: 1.15,
            shots_home: 14,
            sot_home: 5,
            corners_home: 11,
            shots_away: 12,
            sot_away: 4,
            corners_away: 8,
            odds_home: 1.86,
            odds_draw: 4.12,
            odds_away: 4.27,
            is_cup: true,
        }
    }

    #[test]
    fn unanimous_council_backs_home_double_chance() {
        let result = compute_prediction(&sample_inputs());
        assert_eq!(result.consensus, 3);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.dc_call, DoubleChanceCall::HomeOrDraw);
        assert!(result.dc_prob > 0.0);
        assert!(result.dc_prob < 100.0);
    }

    #[test]
    fn outgunned_home_side_drops_to_away_lean() {
        let mut inputs = sample_inputs();
        inputs.elo_home = 1500.0;
        inputs.elo_away = 1650.0;
        inputs.xg_home = 0.9;
        inputs.xg_away = 1.6;

        let result = compute_prediction(&inputs);
        assert_eq!(result.consensus, 0);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.dc_call, DoubleChanceCall::DrawOrAway);
    }

    #[test]
    fn btts_threshold_drives_call() {
        let result = compute_prediction(&sample_inputs());
        assert_eq!(result.btts_call, BttsCall::Yes);

        let mut inputs = sample_inputs();
        inputs.xg_home = 0.4;
        inputs.xg_away = 0.4;
        let result = compute_prediction(&inputs);
        assert_eq!(result.btts_call, BttsCall::No);
    }

    #[test]
    fn stakes_are_never_negative() {
        let mut inputs = sample_inputs();
        for xg in [0.0, 0.5, 1.5, 3.0] {
            inputs.xg_home = xg;
            inputs.xg_away = 3.0 - xg;
            let result = compute_prediction(&inputs);
            assert!(result.dc_stake >= 0.0);
            assert!(result.btts_stake >= 0.0);
        }
    }
}
