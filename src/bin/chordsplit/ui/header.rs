//! Header widget - engine parameters and the chord being played

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use chordsplit::{
    chord::names::{chord_name, note_label},
    EngineParams, EngineStatus,
};

use super::UiInfo;

fn on_off(on: bool) -> (&'static str, Color) {
    if on {
        ("on ", Color::Green)
    } else {
        ("off", Color::DarkGray)
    }
}

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    info: &UiInfo,
    params: &EngineParams,
    status: &EngineStatus,
    midi_out: u64,
) {
    let block = Block::default().title(" chordsplit ").borders(Borders::ALL);
    let snap = params.snapshot();

    let chord = match status.active_root() {
        Some(root) => chord_name(root, status.modifiers()),
        None => "-".to_string(),
    };

    let (chord_mode, chord_color) = on_off(snap.chord_mode);
    let (arp, arp_color) = on_off(snap.arp_enabled);

    let params_line = Line::from(vec![
        Span::styled(format!(" BPM: {:.0}  ", info.bpm), Style::default().fg(Color::Cyan)),
        Span::raw("Chord "),
        Span::styled(format!("{chord_mode}  "), Style::default().fg(chord_color)),
        Span::raw("Arp "),
        Span::styled(format!("{arp} "), Style::default().fg(arp_color)),
        Span::styled(
            format!("{} seed {}  ", snap.arp_rate.name(), snap.arp_seed),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Range {}..{}  ", snap.range.low(), snap.range.high()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("Retrigger {}", snap.retrigger.name()),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let arp_note = status
        .arp_note()
        .map(note_label)
        .unwrap_or_else(|| "-".to_string());
    let chord_line = Line::from(vec![
        Span::raw(" Chord: "),
        Span::styled(
            format!("{chord:<10}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("Arp note: {arp_note:<5} ")),
        Span::styled(
            format!(
                "{:.1}kHz/{}  MIDI out: {}  dropped: {}",
                info.sample_rate / 1000.0,
                info.block_size,
                midi_out,
                status.dropped_events()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(vec![params_line, chord_line]).block(block);
    frame.render_widget(paragraph, area);
}
