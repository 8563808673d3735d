use serde::Deserialize;

use crate::domain::{countdown::CountdownReading, phase::Gradient};

/// Path of the star-field configuration shipped with the crate.
pub const PARTICLES_ASSET: &str = "assets/particles.json";

const BUNDLED_PARTICLES: &str = include_str!("../../assets/particles.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Upper,
    Lower,
}

impl Region {
    pub const ALL: [Self; 2] = [Self::Upper, Self::Lower];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Upper => 0,
            Self::Lower => 1,
        }
    }
}

/// Sun animation: one full arc per `cycle_secs`, already `offset_secs` into it
/// when mounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunArc {
    pub cycle_secs: f64,
    pub offset_secs: f64,
}

impl SunArc {
    /// Fraction of the arc travelled `since_mount_secs` after mounting.
    #[must_use]
    pub fn position(&self, since_mount_secs: f64) -> f64 {
        if self.cycle_secs <= 0.0 {
            return 0.0;
        }
        ((self.offset_secs + since_mount_secs) / self.cycle_secs).rem_euclid(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticleConfig {
    pub count: usize,
    pub glyphs: Vec<char>,
    pub color: [u8; 3],
    pub drift: f32,
    pub twinkle_chance: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            glyphs: vec!['·', '•'],
            color: [255, 255, 255],
            drift: 0.0,
            twinkle_chance: 0.02,
        }
    }
}

impl ParticleConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_PARTICLES)
    }
}

/// Write-only rendering target for the two halves. Nothing here is read back
/// to decide state.
pub trait SkySurface {
    fn set_label(&mut self, region: Region, city: &str);
    fn set_gradient(&mut self, region: Region, gradient: Gradient);
    fn mount_sun(&mut self, region: Region, arc: SunArc);
    fn unmount_sun(&mut self, region: Region);
    fn mount_particles(&mut self, region: Region, config: &ParticleConfig);
    fn unmount_particles(&mut self, region: Region);
    fn show_local_time(&mut self, region: Region, clock: &str);
    fn show_countdown(&mut self, reading: &CountdownReading);
}
