use std::fs;
use std::path::PathBuf;

use spartan_terminal::predict::{compute_prediction, MatchInputs};

#[derive(Debug, serde::Deserialize)]
struct PredictCase {
    #[serde(default)]
    home: Option<String>,
    #[serde(default)]
    away: Option<String>,
    inputs: MatchInputs,
}

fn main() -> anyhow::Result<()> {
    let mut path: Option<PathBuf> = None;
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            as_json = true;
        } else {
            path = Some(PathBuf::from(arg));
        }
    }
    let path = path.unwrap_or_else(|| PathBuf::from("tests/fixtures/spartan_case.json"));

    let raw = fs::read_to_string(&path)?;
    let case: PredictCase = serde_json::from_str(&raw)?;

    // This binary is intentionally simple: it loads one case and prints the
    // model output. No network, no state.
    let result = compute_prediction(&case.inputs);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} vs {}",
        case.home.as_deref().unwrap_or("Home"),
        case.away.as_deref().unwrap_or("Away")
    );
    println!(
        "Confidence: {} ({}/3 votes)",
        result.confidence.label(),
        result.consensus
    );
    println!(
        "Double chance: {} @ {:.1}% (fair odds {:.2}, Kelly {:.2}%)",
        result.dc_call.label(),
        result.dc_prob,
        result.dc_fair_odds,
        result.dc_stake
    );
    println!(
        "BTTS: {} @ {:.1}% (Kelly {:.2}%)",
        result.btts_call.label(),
        result.btts_prob,
        result.btts_stake
    );
    println!(
        "Over/Under: {} @ {:.0}%",
        result.totals_call.label(),
        result.totals_prob
    );
    println!("Gap rating: {:.2}", result.gap);

    Ok(())
}
