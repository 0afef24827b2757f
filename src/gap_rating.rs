use serde::Serialize;

// Fixed calibration weights for the shot-volume score.
const SHOT_WEIGHT: f64 = 0.11;
const SOT_WEIGHT: f64 = 0.25;
const CORNER_WEIGHT: f64 = 0.03;
const GAP_BASELINE: f64 = 2.7;
const GAP_SCALE: f64 = 0.32;

const OVER_THRESHOLD: f64 = 1.5;
const UNDER_THRESHOLD: f64 = -1.5;

// Reported probabilities are fixed per band, not derived from a distribution.
const OVER_PROB: f64 = 62.0;
const UNDER_PROB: f64 = 68.0;
const NO_CALL_PROB: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TotalsCall {
    Over,
    Under,
    NoPrediction,
}

impl TotalsCall {
    pub fn label(self) -> &'static str {
        match self {
            TotalsCall::Over => "Over 2.5",
            TotalsCall::Under => "Under 2.5",
            TotalsCall::NoPrediction => "No Prediction",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShotCounts {
    pub shots: u32,
    pub on_target: u32,
    pub corners: u32,
}

pub fn shot_xg(counts: ShotCounts) -> f64 {
    counts.shots as f64 * SHOT_WEIGHT
        + counts.on_target as f64 * SOT_WEIGHT
        + counts.corners as f64 * CORNER_WEIGHT
}

pub fn gap_score(home: ShotCounts, away: ShotCounts) -> f64 {
    (shot_xg(home) + shot_xg(away) - GAP_BASELINE) / GAP_SCALE
}

// Both thresholds are strict: a gap sitting exactly on a band edge stays a
// no-call.
pub fn classify(gap: f64) -> (TotalsCall, f64) {
    if gap > OVER_THRESHOLD {
        (TotalsCall::Over, OVER_PROB)
    } else if gap < UNDER_THRESHOLD {
        (TotalsCall::Under, UNDER_PROB)
    } else {
        (TotalsCall::NoPrediction, NO_CALL_PROB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_match_calls_over() {
        let home = ShotCounts {
            shots: 14,
            on_target: 5,
            corners: 11,
        };
        let away = ShotCounts {
            shots: 12,
            on_target: 4,
            corners: 8,
        };
        let gap = gap_score(home, away);
        assert!((gap - 9.3125).abs() < 1e-9);

        let (call, prob) = classify(gap);
        assert_eq!(call, TotalsCall::Over);
        assert_eq!(prob, 62.0);
    }

    #[test]
    fn quiet_match_calls_under() {
        let home = ShotCounts {
            shots: 5,
            on_target: 1,
            corners: 2,
        };
        let away = ShotCounts {
            shots: 4,
            on_target: 1,
            corners: 1,
        };
        let (call, prob) = classify(gap_score(home, away));
        assert_eq!(call, TotalsCall::Under);
        assert_eq!(prob, 68.0);
    }

    #[test]
    fn band_edges_stay_no_call() {
        assert_eq!(classify(1.5).0, TotalsCall::NoPrediction);
        assert_eq!(classify(-1.5).0, TotalsCall::NoPrediction);
        assert_eq!(classify(0.0).1, 50.0);
    }
}
