#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    domain::phase::{Gradient, Phase, Rgb},
    ui::{
        canvas::{MountedSun, RegionCanvas},
        particles::Particle,
    },
};

const SUN_GLYPH: &str = "☀";
const SUN_COLOR: Color = Color::Rgb(255, 214, 92);
const UNSET_GRADIENT: Gradient = Gradient {
    top: Rgb(0, 0, 0),
    bottom: Rgb(24, 24, 24),
};

/// One half of the screen: gradient, decorations and the place's clock.
pub struct SkyPanel<'a> {
    pub canvas: &'a RegionCanvas,
    pub phase: Option<Phase>,
    pub now: Instant,
}

impl Widget for SkyPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let gradient = self.canvas.gradient.unwrap_or(UNSET_GRADIENT);
        paint_gradient_background(area, buf, gradient);

        if let Some(stars) = &self.canvas.stars {
            let [r, g, b] = stars.color();
            paint_particles(area, buf, &stars.particles, Color::Rgb(r, g, b));
        }
        if let Some(sun) = &self.canvas.sun {
            paint_sun(area, buf, sun, self.now);
        }

        let text = text_color(gradient);
        let lines = vec![
            Line::from(Span::styled(
                self.canvas.label.to_uppercase(),
                Style::default().fg(text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.canvas.clock.clone(),
                Style::default().fg(text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.phase.map_or("waiting for sun times", Phase::label),
                Style::default().fg(text),
            )),
        ];
        let text_area = centered_rows(area, lines.len() as u16);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}

fn centered_rows(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - rows) / 2,
        width: area.width,
        height: rows,
    }
}

fn paint_gradient_background(area: Rect, buf: &mut Buffer, gradient: Gradient) {
    let top = rgb_to_f32(gradient.top);
    let bottom = rgb_to_f32(gradient.bottom);
    for y in area.top()..area.bottom() {
        let t = gradient_ratio(area, y);
        let color = lerp_color(top, bottom, t);
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

fn gradient_ratio(area: Rect, y: u16) -> f32 {
    if area.height <= 1 {
        0.0
    } else {
        (y - area.top()) as f32 / (area.height - 1) as f32
    }
}

fn paint_particles(area: Rect, buf: &mut Buffer, particles: &[Particle], color: Color) {
    for particle in particles.iter().filter(|p| p.lit) {
        if let Some((x, y)) = particle_position(area, particle)
            && let Some(cell) = buf.cell_mut((x, y))
        {
            cell.set_symbol(&particle.glyph.to_string()).set_fg(color);
        }
    }
}

fn particle_position(area: Rect, particle: &Particle) -> Option<(u16, u16)> {
    let x = area.x + ((particle.x.clamp(0.0, 1.0)) * area.width as f32) as u16;
    let y = area.y + ((particle.y.clamp(0.0, 1.0)) * area.height as f32) as u16;
    if x < area.right() && y < area.bottom() {
        Some((x, y))
    } else {
        None
    }
}

fn paint_sun(area: Rect, buf: &mut Buffer, sun: &MountedSun, now: Instant) {
    if let Some((x, y)) = sun_position(area, sun.position(now))
        && let Some(cell) = buf.cell_mut((x, y))
    {
        cell.set_symbol(SUN_GLYPH).set_fg(SUN_COLOR);
    }
}

/// Point on a half-sine arc from the bottom-left to the bottom-right corner.
fn sun_position(area: Rect, fraction: f64) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let x = area.x + (fraction * f64::from(area.width - 1)).round() as u16;
    let lift = (std::f64::consts::PI * fraction).sin() * f64::from(area.height - 1);
    let y = area.bottom() - 1 - lift.round() as u16;
    Some((x, y))
}

fn text_color(gradient: Gradient) -> Color {
    let Rgb(r, g, b) = gradient.top;
    let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    if luma > 150.0 {
        Color::Rgb(12, 28, 48)
    } else {
        Color::Rgb(236, 242, 250)
    }
}

fn rgb_to_f32(c: Rgb) -> (f32, f32, f32) {
    (c.0 as f32, c.1 as f32, c.2 as f32)
}

fn lerp_color(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> Color {
    let r = (a.0 + (b.0 - a.0) * t).clamp(0.0, 255.0) as u8;
    let g = (a.1 + (b.1 - a.1) * t).clamp(0.0, 255.0) as u8;
    let b_val = (a.2 + (b.2 - a.2) * t).clamp(0.0, 255.0) as u8;
    Color::Rgb(r, g, b_val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_from_top_to_bottom_color() {
        let area = Rect::new(0, 0, 4, 5);
        let mut buf = Buffer::empty(area);
        paint_gradient_background(area, &mut buf, Phase::Dawn.gradient());
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0x63, 0xad, 0xf7));
        assert_eq!(buf[(3, 4)].bg, Color::Rgb(0xff, 0xb5, 0x39));
    }

    #[test]
    fn gradient_ratio_height_one_returns_zero() {
        let area = Rect::new(0, 0, 80, 1);
        assert!((gradient_ratio(area, 0) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sun_rises_left_peaks_middle_sets_right() {
        let area = Rect::new(0, 10, 21, 9);
        assert_eq!(sun_position(area, 0.0), Some((0, 18)));
        assert_eq!(sun_position(area, 0.5), Some((10, 10)));
        assert_eq!(sun_position(area, 1.0), Some((20, 18)));
    }

    #[test]
    fn sun_in_empty_area_is_not_drawn() {
        assert_eq!(sun_position(Rect::new(0, 0, 0, 5), 0.5), None);
    }

    #[test]
    fn unlit_stars_are_not_painted() {
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        let particles = [
            Particle {
                x: 0.1,
                y: 0.1,
                vx: 0.0,
                glyph: '*',
                lit: true,
            },
            Particle {
                x: 0.5,
                y: 0.5,
                vx: 0.0,
                glyph: '*',
                lit: false,
            },
        ];
        paint_particles(area, &mut buf, &particles, Color::White);
        assert_eq!(buf[(1, 1)].symbol(), "*");
        assert_eq!(buf[(5, 5)].symbol(), " ");
    }

    #[test]
    fn text_contrasts_with_sky() {
        assert_eq!(
            text_color(Phase::Day.gradient()),
            Color::Rgb(12, 28, 48)
        );
        assert_eq!(
            text_color(Phase::Night.gradient()),
            Color::Rgb(236, 242, 250)
        );
    }

    #[test]
    fn lerp_color_interpolates_correctly() {
        let result = lerp_color((0.0, 0.0, 0.0), (100.0, 100.0, 100.0), 0.5);
        assert!(matches!(result, Color::Rgb(50, 50, 50)));
    }
}
