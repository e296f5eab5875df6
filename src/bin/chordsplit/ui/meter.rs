//! Band meter - arpeggiator step activity per pool band

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BAND_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Red,
];

pub fn render_meter(frame: &mut Frame, area: Rect, bands: &[f32]) {
    let block = Block::default().title(" Arp bands ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 8 {
        return;
    }

    let bar_width = inner.width.saturating_sub(4) as f32;
    let lines: Vec<Line> = bands
        .iter()
        .enumerate()
        .take(inner.height as usize)
        .map(|(i, level)| {
            let filled = (level.clamp(0.0, 1.0) * bar_width).round() as usize;
            let color = BAND_COLORS[i % BAND_COLORS.len()];
            Line::from(vec![
                Span::styled(format!(" {} ", i), Style::default().fg(Color::DarkGray)),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
