// Standard logistic Elo expected score: the probability-like signal that the
// home side wins, from the rating difference alone.
pub fn expected_score(r_home: f64, r_away: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf(-(r_home - r_away) / 400.0))
}
