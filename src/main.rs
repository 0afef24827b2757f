use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use spartan_terminal::council::Confidence;
use spartan_terminal::state::{AppState, FormField, FORM_FIELDS};

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new() -> Self {
        let tick_ms = std::env::var("SPARTAN_TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50);
        Self {
            state: AppState::new(),
            should_quit: false,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.editing_text {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.state.editing_text = false,
                KeyCode::Backspace => self.state.backspace(),
                KeyCode::Char(c) => self.state.input_char(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('h') | KeyCode::Left => self.adjust(-1),
            KeyCode::Char('l') | KeyCode::Right => self.adjust(1),
            KeyCode::Char('H') => self.adjust(-10),
            KeyCode::Char('L') => self.adjust(10),
            KeyCode::Char('e') | KeyCode::Enter => self.edit_or_toggle(),
            KeyCode::Char(' ') => {
                if self.state.selected_field().is_toggle() {
                    self.state.form.adjust(FormField::CupMatch, 1);
                }
            }
            KeyCode::Char('g') => self.state.generate(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn adjust(&mut self, steps: i32) {
        let field = self.state.selected_field();
        if field.is_text() {
            return;
        }
        self.state.form.adjust(field, steps);
    }

    fn edit_or_toggle(&mut self) {
        let field = self.state.selected_field();
        if field.is_text() {
            self.state.editing_text = true;
        } else if field.is_toggle() {
            self.state.form.adjust(field, 1);
        } else {
            self.state.generate();
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(1)])
        .split(chunks[1]);

    render_form(frame, body[0], &app.state);
    render_results(frame, body[1], &app.state);

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "  /^\\  SPARTAN MODEL v5.2 | {} vs {}",
        state.form.home_team, state.form.away_team
    );
    let line2 = " |=o=| Dixon-Coles • Elo • Gap Ratings • Kelly Stakes".to_string();
    let line3 = "  \\_/".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.editing_text {
        "Type team name | Enter/Esc Done | Backspace Delete".to_string()
    } else {
        "j/k/↑/↓ Move | h/l/←/→ Adjust | H/L Big step | e Edit name | Space Cup | g Generate | ? Help | q Quit"
            .to_string()
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::with_capacity(FORM_FIELDS.len());
    for (idx, field) in FORM_FIELDS.iter().enumerate() {
        let selected = idx == state.selected;
        let mut value = state.form.value_text(*field);
        if selected && state.editing_text {
            value.push('_');
        }
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!("{:<10} {}", field.label(), value),
            style,
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("Match Setup");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(result) = &state.result else {
        let hint = Paragraph::new("No prediction yet. Press g to generate one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Prediction"));
        frame.render_widget(hint, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(1),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(sections[0]);

    let conf_lines = vec![
        Line::styled(
            result.confidence.label(),
            Style::default()
                .fg(confidence_color(result.confidence))
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("Council votes {}/3", result.consensus)),
    ];
    frame.render_widget(
        Paragraph::new(conf_lines).block(Block::default().borders(Borders::ALL).title("Confidence")),
        cols[0],
    );

    let dc_lines = vec![
        Line::styled(
            result.dc_call.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("Probability {:.1}%", result.dc_prob)),
        Line::raw(format!("Fair odds   {:.2}", result.dc_fair_odds)),
        Line::raw(format!("Kelly       {:.2}%", result.dc_stake)),
    ];
    frame.render_widget(
        Paragraph::new(dc_lines)
            .block(Block::default().borders(Borders::ALL).title("Double Chance")),
        cols[1],
    );

    let btts_lines = vec![
        Line::styled(
            result.btts_call.label(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("Probability {:.1}%", result.btts_prob)),
        Line::raw(format!("Kelly       {:.2}%", result.btts_stake)),
    ];
    frame.render_widget(
        Paragraph::new(btts_lines).block(Block::default().borders(Borders::ALL).title("BTTS")),
        cols[2],
    );

    let totals_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[1]);

    let totals_lines = vec![
        Line::styled(
            result.totals_call.label(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("Probability {:.0}%", result.totals_prob)),
    ];
    frame.render_widget(
        Paragraph::new(totals_lines)
            .block(Block::default().borders(Borders::ALL).title("Over/Under 2.5")),
        totals_cols[0],
    );

    let gap_lines = vec![
        Line::styled(
            format!("{:.2}", result.gap),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "LSE method: >1.5 = Over, <-1.5 = Under",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(
        Paragraph::new(gap_lines).block(Block::default().borders(Borders::ALL).title("Gap Rating")),
        totals_cols[1],
    );

    render_console(frame, sections[2], state);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let take = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(take)
        .rev()
        .map(|entry| {
            let style = if entry.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::styled(entry.clone(), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Console")),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(58);
    let height = area.height.min(13);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);

    let text = "j/k or ↑/↓   Move between fields\n\
                h/l or ←/→   Step the selected value\n\
                H/L          Step by ten\n\
                e or Enter   Edit a team name / toggle the cup flag\n\
                Space        Toggle the cup flag\n\
                g            Generate a prediction\n\
                ?            Toggle this help\n\
                q            Quit";
    frame.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help")),
        popup,
    );
}

fn confidence_color(confidence: Confidence) -> Color {
    match confidence {
        Confidence::High => Color::Green,
        Confidence::Medium => Color::Yellow,
        Confidence::Low => Color::Red,
    }
}
