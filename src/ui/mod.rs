pub mod canvas;
pub mod particles;
pub mod surface;
pub mod widgets;

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::state::AppState, ui::surface::Region};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < 30 || area.height < 12 {
        let warning = Paragraph::new("Terminal too small. Resize to at least 30x12.")
            .block(Block::default().borders(Borders::ALL).title("split-sky"));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let now = Instant::now();
    for (region, chunk) in [(Region::Upper, chunks[0]), (Region::Lower, chunks[2])] {
        let panel = widgets::sky::SkyPanel {
            canvas: state.canvas.region(region),
            phase: state.half(region).phase(),
            now,
        };
        frame.render_widget(panel, chunk);
    }

    widgets::countdown::render(frame, chunks[1], state.canvas.countdown());
    widgets::status::render(frame, chunks[3], state);
}
