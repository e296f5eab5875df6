//! Keyboard strip - one column per note, sounding notes lit and fading

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use chordsplit::chord::{
    is_modifier_note, is_trigger_note, names::note_label, range::RangeBounds,
};

use super::DisplayState;

const BLACK_KEYS: [bool; 12] = [
    false, true, false, true, false, false, true, false, true, false, true, false,
];

fn glyph(level: f32, held: bool) -> char {
    if held {
        '█'
    } else if level > 0.5 {
        '▓'
    } else if level > 0.2 {
        '▒'
    } else if level > 0.05 {
        '░'
    } else {
        ' '
    }
}

/// First note shown so that the range stays centred in `width` columns.
fn first_visible(range: RangeBounds, width: u16) -> u8 {
    let width = width.min(128) as i32;
    let centre = (range.low() as i32 + range.high() as i32) / 2;
    (centre - width / 2).clamp(0, (128 - width).max(0)) as u8
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, state: &DisplayState, range: RangeBounds) {
    let title = format!(
        " Keyboard ({} sounding, {} resets) ",
        state.held_count(),
        state.resets
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 3 || inner.width < 12 {
        return;
    }

    let first = first_visible(range, inner.width);
    let last = (first as u16 + inner.width - 1).min(127) as u8;

    let mut notes = Vec::new();
    let mut zones = Vec::new();
    let mut labels = String::new();

    for note in first..=last {
        let level = state.level(note);
        let held = state.is_held(note);
        let color = if held {
            Color::Green
        } else if level > 0.05 {
            Color::DarkGray
        } else if BLACK_KEYS[(note % 12) as usize] {
            Color::Black
        } else {
            Color::Gray
        };
        let ch = if held || level > 0.05 {
            glyph(level, held)
        } else if BLACK_KEYS[(note % 12) as usize] {
            '▄'
        } else {
            '─'
        };
        notes.push(Span::styled(ch.to_string(), Style::default().fg(color)));

        let (mark, color) = if note == range.low() {
            ('[', Color::Yellow)
        } else if note == range.high() {
            (']', Color::Yellow)
        } else if is_modifier_note(note) {
            ('m', Color::Magenta)
        } else if is_trigger_note(note) {
            ('t', Color::Cyan)
        } else if range.contains(note) {
            ('·', Color::Yellow)
        } else {
            (' ', Color::Reset)
        };
        zones.push(Span::styled(mark.to_string(), Style::default().fg(color)));

        if note % 12 == 0 && labels.len() <= (note - first) as usize {
            labels.push_str(&" ".repeat((note - first) as usize - labels.len()));
            labels.push_str(&note_label(note));
        }
    }

    let lines = vec![
        Line::from(notes),
        Line::from(zones),
        Line::from(Span::styled(labels, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
