use std::collections::VecDeque;
use std::env;

use crate::council::Confidence;
use crate::predict::{compute_prediction, MatchInputs, PredictionResult};

pub const DEFAULT_HOME_TEAM: &str = "Arsenal";
pub const DEFAULT_AWAY_TEAM: &str = "Chelsea";

const MAX_TEAM_NAME_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    HomeTeam,
    AwayTeam,
    EloHome,
    EloAway,
    XgHome,
    XgAway,
    ShotsHome,
    SotHome,
    CornersHome,
    ShotsAway,
    SotAway,
    CornersAway,
    OddsHome,
    OddsDraw,
    OddsAway,
    CupMatch,
}

pub const FORM_FIELDS: &[FormField] = &[
    FormField::HomeTeam,
    FormField::AwayTeam,
    FormField::EloHome,
    FormField::EloAway,
    FormField::XgHome,
    FormField::XgAway,
    FormField::ShotsHome,
    FormField::SotHome,
    FormField::CornersHome,
    FormField::ShotsAway,
    FormField::SotAway,
    FormField::CornersAway,
    FormField::OddsHome,
    FormField::OddsDraw,
    FormField::OddsAway,
    FormField::CupMatch,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::HomeTeam => "Home Team",
            FormField::AwayTeam => "Away Team",
            FormField::EloHome => "Home Elo",
            FormField::EloAway => "Away Elo",
            FormField::XgHome => "Home xG",
            FormField::XgAway => "Away xG",
            FormField::ShotsHome => "H Shots",
            FormField::SotHome => "H SoT",
            FormField::CornersHome => "H Corners",
            FormField::ShotsAway => "A Shots",
            FormField::SotAway => "A SoT",
            FormField::CornersAway => "A Corners",
            FormField::OddsHome => "Odds 1",
            FormField::OddsDraw => "Odds X",
            FormField::OddsAway => "Odds 2",
            FormField::CupMatch => "Cup Match",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::HomeTeam | FormField::AwayTeam)
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, FormField::CupMatch)
    }
}

#[derive(Debug, Clone)]
pub struct MatchForm {
    pub home_team: String,
    pub away_team: String,
    pub inputs: MatchInputs,
}

impl MatchForm {
    pub fn new() -> Self {
        Self {
            home_team: env_or_default("SPARTAN_HOME_TEAM", DEFAULT_HOME_TEAM),
            away_team: env_or_default("SPARTAN_AWAY_TEAM", DEFAULT_AWAY_TEAM),
            inputs: MatchInputs {
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
            },
        }
    }

    // Numeric fields step within their input domain; the core itself never
    // validates ranges, so the clamping lives here.
    pub fn adjust(&mut self, field: FormField, steps: i32) {
        let inputs = &mut self.inputs;
        match field {
            FormField::EloHome => {
                inputs.elo_home = step_f64(inputs.elo_home, steps, 10.0, 1400.0, 2000.0)
            }
            FormField::EloAway => {
                inputs.elo_away = step_f64(inputs.elo_away, steps, 10.0, 1400.0, 2000.0)
            }
            FormField::XgHome => inputs.xg_home = step_f64(inputs.xg_home, steps, 0.05, 0.0, 3.0),
            FormField::XgAway => inputs.xg_away = step_f64(inputs.xg_away, steps, 0.05, 0.0, 3.0),
            FormField::ShotsHome => inputs.shots_home = step_u32(inputs.shots_home, steps, 30),
            FormField::SotHome => inputs.sot_home = step_u32(inputs.sot_home, steps, 15),
            FormField::CornersHome => {
                inputs.corners_home = step_u32(inputs.corners_home, steps, 20)
            }
            FormField::ShotsAway => inputs.shots_away = step_u32(inputs.shots_away, steps, 30),
            FormField::SotAway => inputs.sot_away = step_u32(inputs.sot_away, steps, 15),
            FormField::CornersAway => {
                inputs.corners_away = step_u32(inputs.corners_away, steps, 20)
            }
            FormField::OddsHome => {
                inputs.odds_home = step_f64(inputs.odds_home, steps, 0.01, 1.01, 20.0)
            }
            FormField::OddsDraw => {
                inputs.odds_draw = step_f64(inputs.odds_draw, steps, 0.01, 1.01, 20.0)
            }
            FormField::OddsAway => {
                inputs.odds_away = step_f64(inputs.odds_away, steps, 0.01, 1.01, 20.0)
            }
            FormField::CupMatch => {
                if steps != 0 {
                    inputs.is_cup = !inputs.is_cup;
                }
            }
            FormField::HomeTeam | FormField::AwayTeam => {}
        }
    }

    pub fn value_text(&self, field: FormField) -> String {
        let inputs = &self.inputs;
        match field {
            FormField::HomeTeam => self.home_team.clone(),
            FormField::AwayTeam => self.away_team.clone(),
            FormField::EloHome => format!("{:.0}", inputs.elo_home),
            FormField::EloAway => format!("{:.0}", inputs.elo_away),
            FormField::XgHome => format!("{:.2}", inputs.xg_home),
            FormField::XgAway => format!("{:.2}", inputs.xg_away),
            FormField::ShotsHome => inputs.shots_home.to_string(),
            FormField::SotHome => inputs.sot_home.to_string(),
            FormField::CornersHome => inputs.corners_home.to_string(),
            FormField::ShotsAway => inputs.shots_away.to_string(),
            FormField::SotAway => inputs.sot_away.to_string(),
            FormField::CornersAway => inputs.corners_away.to_string(),
            FormField::OddsHome => format!("{:.2}", inputs.odds_home),
            FormField::OddsDraw => format!("{:.2}", inputs.odds_draw),
            FormField::OddsAway => format!("{:.2}", inputs.odds_away),
            FormField::CupMatch => if inputs.is_cup { "Yes" } else { "No" }.to_string(),
        }
    }
}

impl Default for MatchForm {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AppState {
    pub form: MatchForm,
    pub selected: usize,
    pub editing_text: bool,
    pub result: Option<PredictionResult>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: MatchForm::new(),
            selected: 0,
            editing_text: false,
            result: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn selected_field(&self) -> FormField {
        FORM_FIELDS[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FORM_FIELDS.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }

    pub fn input_char(&mut self, c: char) {
        let buffer = match self.selected_field() {
            FormField::HomeTeam => &mut self.form.home_team,
            FormField::AwayTeam => &mut self.form.away_team,
            _ => return,
        };
        if buffer.len() < MAX_TEAM_NAME_LEN
            && (c.is_alphanumeric() || c == ' ' || c == '.' || c == '-')
        {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let buffer = match self.selected_field() {
            FormField::HomeTeam => &mut self.form.home_team,
            FormField::AwayTeam => &mut self.form.away_team,
            _ => return,
        };
        buffer.pop();
    }

    pub fn generate(&mut self) {
        let result = compute_prediction(&self.form.inputs);
        self.push_log(format!(
            "[INFO] {} vs {}: {} {:.1}% | votes {}/3",
            self.form.home_team,
            self.form.away_team,
            result.dc_call.label(),
            result.dc_prob,
            result.consensus
        ));
        match result.confidence {
            Confidence::Low => self.push_log(
                "[WARN] LOW CONFIDENCE: council split. Consider avoiding or reducing stake.",
            ),
            Confidence::Medium => {
                self.push_log("[WARN] MEDIUM CONFIDENCE: away favorite or cup volatility detected.")
            }
            Confidence::High => {}
        }
        self.result = Some(result);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn step_f64(value: f64, steps: i32, step: f64, min: f64, max: f64) -> f64 {
    let next = value + steps as f64 * step;
    // Snap to two decimals so repeated stepping does not accumulate drift.
    let snapped = (next * 100.0).round() / 100.0;
    snapped.clamp(min, max)
}

fn step_u32(value: u32, steps: i32, max: u32) -> u32 {
    (value as i64 + steps as i64).clamp(0, max as i64) as u32
}
