use once_cell::sync::Lazy;

// Goal counts are enumerated over 0..MAX_GOALS per side (100 joint cells).
pub const MAX_GOALS: usize = 10;

static FACTORIAL: Lazy<[f64; MAX_GOALS]> = Lazy::new(|| {
    let mut table = [1.0_f64; MAX_GOALS];
    for k in 1..MAX_GOALS {
        table[k] = table[k - 1] * k as f64;
    }
    table
});

#[derive(Debug, Clone, Copy)]
pub struct ScorelineProbs {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

// Independent Poisson per side; no Dixon-Coles low-score correction is
// applied. Mass beyond the goal cap is dropped, not renormalized, so the
// three sums stay strictly below 1.
pub fn outcome_probs(lambda_home: f64, lambda_away: f64) -> ScorelineProbs {
    let mut home_win = 0.0_f64;
    let mut draw = 0.0_f64;
    let mut away_win = 0.0_f64;

    for i in 0..MAX_GOALS {
        for j in 0..MAX_GOALS {
            let p = poisson_pmf(i, lambda_home) * poisson_pmf(j, lambda_away);
            if i > j {
                home_win += p;
            } else if i == j {
                draw += p;
            } else {
                away_win += p;
            }
        }
    }

    ScorelineProbs {
        home_win,
        draw,
        away_win,
    }
}

// P(both sides score at least once), assuming the two goal counts are
// independent.
pub fn btts_prob(lambda_home: f64, lambda_away: f64) -> f64 {
    let p_home_scores = 1.0 - (-lambda_home).exp();
    let p_away_scores = 1.0 - (-lambda_away).exp();
    p_home_scores * p_away_scores
}

fn poisson_pmf(goals: usize, lambda: f64) -> f64 {
    (-lambda).exp() * lambda.powi(goals as i32) / FACTORIAL[goals]
}
