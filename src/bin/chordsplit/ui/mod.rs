//! TUI module for chordsplit
//!
//! Drains the engine's visualization relay each frame and edits the shared
//! parameters from the keyboard.

mod header;
mod keyboard;
mod meter;
pub mod state;

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use chordsplit::{
    chord::ledger::RetriggerMode,
    relay::{RelayReceiver, VisualEvent},
    EngineParams, EngineStatus,
};

pub use state::{DisplayState, UiInfo};

use header::render_header;
use keyboard::render_keyboard;
use meter::render_meter;

/// UI application state
pub struct UiApp {
    relay: RelayReceiver<VisualEvent>,
    params: Arc<EngineParams>,
    status: Arc<EngineStatus>,
    midi_out: Arc<AtomicU64>,
    info: UiInfo,
    display: DisplayState,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        relay: RelayReceiver<VisualEvent>,
        params: Arc<EngineParams>,
        status: Arc<EngineStatus>,
        midi_out: Arc<AtomicU64>,
        info: UiInfo,
    ) -> Self {
        Self {
            relay,
            params,
            status,
            midi_out,
            info,
            display: DisplayState::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let mut last_frame = Instant::now();
        while !self.should_quit {
            let now = Instant::now();
            self.display.tick(now.duration_since(last_frame).as_secs_f32());
            last_frame = now;

            for event in self.relay.drain() {
                self.display.apply(event);
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
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
        let params = &self.params;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') => params.set_chord_mode(!params.chord_mode()),
            KeyCode::Char('a') => params.set_arp_enabled(!params.arp_enabled()),
            KeyCode::Char('r') => params.set_retrigger(match params.retrigger() {
                RetriggerMode::Smart => RetriggerMode::Full,
                RetriggerMode::Full => RetriggerMode::Smart,
            }),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                params.set_arp_rate(params.arp_rate().faster())
            }
            KeyCode::Char('-') => params.set_arp_rate(params.arp_rate().slower()),
            KeyCode::Char('s') => params.set_arp_seed(rand::random::<u32>() as u64),
            KeyCode::Char('[') => {
                params.set_low_note(params.range().low().saturating_sub(1))
            }
            KeyCode::Char(']') => params.set_low_note(params.range().low().saturating_add(1)),
            KeyCode::Char('{') => {
                params.set_high_note(params.range().high().saturating_sub(1))
            }
            KeyCode::Char('}') => {
                params.set_high_note(params.range().high().saturating_add(1))
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: header, keyboard, band meter, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Parameters + chord
                Constraint::Length(5), // Keyboard strip
                Constraint::Min(7),    // Arp bands
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_header(
            frame,
            chunks[0],
            &self.info,
            &self.params,
            &self.status,
            self.midi_out.load(Ordering::Relaxed),
        );
        render_keyboard(frame, chunks[1], &self.display, self.params.range());
        render_meter(frame, chunks[2], self.display.bands());

        let help = Paragraph::new(
            " [Q] Quit  [C] Chord mode  [A] Arp  [R] Retrigger  [+/-] Rate  [S] Seed  [[/]] Low  [{/}] High",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
