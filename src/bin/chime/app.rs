//! Soundboard application - engine wiring and the TUI event loop.
//!
//! The terminal host delivers user gestures to the engine, pumps the melody
//! timer, and treats the first key press as the user interaction that allows
//! auto-started music.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};

use chime::engine::ToneEngine;
use chime::prefs::FileStore;
use chime::synthesis::DeviceBackend;
use chime::timer::DeadlineTimer;

/// Number of recent triggers kept in the on-screen log.
const LOG_CAPACITY: usize = 8;

fn prefs_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".chime-prefs"),
        None => PathBuf::from(".chime-prefs"),
    }
}

pub struct Soundboard {
    engine: ToneEngine<DeviceBackend, FileStore, DeadlineTimer>,
    log: Vec<String>,
    interacted: bool,
    should_quit: bool,
}

impl Soundboard {
    pub fn new() -> Self {
        let prefs = FileStore::open(prefs_path());
        let engine = ToneEngine::new(DeviceBackend::new(), prefs, DeadlineTimer::new());
        Self {
            engine,
            log: Vec::new(),
            interacted: false,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Pump the melody sequencer; 16ms input polling keeps step timing
            // well within audibility for 500ms notes.
            self.engine.poll();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        if !self.interacted {
            self.interacted = true;
            self.engine.try_auto_start();
        }

        match key {
            KeyCode::Char('c') => {
                self.engine.play_click();
                self.log_event("click");
            }
            KeyCode::Char('p') => {
                self.engine.play_pop();
                self.log_event("pop");
            }
            KeyCode::Char('y') => {
                self.engine.play_yay();
                self.log_event("yay");
            }
            KeyCode::Char('n') => {
                self.engine.play_no();
                self.log_event("no");
            }
            KeyCode::Char('s') => {
                self.engine.play_sad();
                self.log_event("sad");
            }
            KeyCode::Char('m') => {
                let muted = self.engine.toggle_mute();
                self.log_event(if muted { "muted" } else { "unmuted" });
            }
            KeyCode::Char(' ') => {
                if self.engine.is_playing() {
                    self.engine.stop_music();
                    self.log_event("music stopped");
                } else {
                    self.engine.start_music();
                    self.log_event("music started");
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn log_event(&mut self, what: &str) {
        self.log.push(what.to_string());
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(0..excess);
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(4),    // Trigger log
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        self.render_status(frame, chunks[0]);
        self.render_log(frame, chunks[1]);

        let help = Paragraph::new(
            " [C]lick [P]op [Y]ay [N]o [S]ad  [Space] Music  [M]ute  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }

    fn render_status(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let block = Block::default().title(" chime ").borders(Borders::ALL);

        let music = if self.engine.is_playing() {
            Span::styled("♪ Playing", Style::default().fg(Color::Green))
        } else {
            Span::styled("  Stopped", Style::default().fg(Color::Yellow))
        };
        let mute = if self.engine.is_muted() {
            Span::styled("  MUTED", Style::default().fg(Color::Red))
        } else {
            Span::raw("")
        };
        let next_note = self
            .engine
            .melody()
            .step(self.engine.current_note_index())
            .note
            .name();

        let line = Line::from(vec![
            music,
            mute,
            Span::raw("  "),
            Span::styled(
                format!("Next note: {next_note}"),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "Step {}/{}",
                    self.engine.current_note_index() + 1,
                    self.engine.melody().len()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_log(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let block = Block::default().title(" Triggers ").borders(Borders::ALL);
        let lines: Vec<Line> = self
            .log
            .iter()
            .rev()
            .map(|entry| Line::from(Span::raw(format!(" {entry}"))))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
