use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{scheduler::SchedulerState, state::AppState};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let scheduler = state.scheduler.state();
    let badge_color = match scheduler {
        SchedulerState::Running => Color::Green,
        SchedulerState::Halted => Color::Yellow,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", scheduler.label()),
            Style::default()
                .fg(Color::Black)
                .bg(badge_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" h halt · r resume · q quit "),
    ];
    if let Some(latest) = state.console.latest() {
        spans.push(Span::styled(
            format!("│ {latest}"),
            Style::default().fg(Color::Gray),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}
