use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge},
};

use crate::domain::countdown::CountdownReading;

const BAR: Color = Color::Rgb(86, 167, 255);
const DONE: Color = Color::Rgb(92, 184, 92);

pub fn render(frame: &mut Frame, area: Rect, reading: Option<&CountdownReading>) {
    let (label, ratio, color) = match reading {
        Some(reading) => (
            reading.text.clone(),
            (reading.progress_pct / 100.0).clamp(0.0, 1.0),
            if reading.finished { DONE } else { BAR },
        ),
        None => ("--".to_string(), 0.0, BAR),
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .label(label)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}
