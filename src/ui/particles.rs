use std::time::Duration;

use rand::Rng;

use crate::ui::surface::ParticleConfig;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub glyph: char,
    pub lit: bool,
}

/// Slowly drifting, twinkling star field for one region.
#[derive(Debug)]
pub struct StarField {
    config: ParticleConfig,
    pub particles: Vec<Particle>,
    accumulator: f32,
}

impl StarField {
    pub fn new(config: &ParticleConfig) -> Self {
        let mut rng = rand::rng();
        let particles = (0..config.count)
            .map(|_| spawn_star(config, &mut rng))
            .collect();
        Self {
            config: config.clone(),
            particles,
            accumulator: 0.0,
        }
    }

    pub fn color(&self) -> [u8; 3] {
        self.config.color
    }

    pub fn update(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32().clamp(0.0, 0.25);
        self.accumulator += dt;

        let step = dt * 60.0;
        for p in &mut self.particles {
            p.x += p.vx * step;
            if p.x > 1.0 {
                p.x -= 1.0;
            } else if p.x < 0.0 {
                p.x += 1.0;
            }
        }

        if self.accumulator >= 0.1 {
            self.accumulator = 0.0;
            let mut rng = rand::rng();
            let chance = self.config.twinkle_chance.clamp(0.0, 1.0);
            for p in &mut self.particles {
                if rng.random_bool(chance) {
                    p.lit = !p.lit;
                }
            }
        }
    }
}

fn spawn_star(config: &ParticleConfig, rng: &mut impl Rng) -> Particle {
    let glyph = if config.glyphs.is_empty() {
        '·'
    } else {
        config.glyphs[rng.random_range(0..config.glyphs.len())]
    };
    let drift = config.drift.abs();
    Particle {
        x: rng.random_range(0.0..1.0),
        y: rng.random_range(0.0..1.0),
        vx: if drift > 0.0 {
            rng.random_range(-drift..=drift)
        } else {
            0.0
        },
        glyph,
        lit: rng.random_bool(0.8),
    }
}
