use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    domain::{
        location::{ContractError, Location},
        phase::Phase,
    },
    ui::surface::{ParticleConfig, Region, SkySurface, SunArc},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Applied { from: Option<Phase>, to: Phase },
}

/// One screen region bound to one place. Decoration flags are tracked here
/// and only written out to the surface.
#[derive(Debug)]
pub struct Half {
    region: Region,
    location: Location,
    particles: Arc<ParticleConfig>,
    phase: Option<Phase>,
    sun_mounted: bool,
    particles_mounted: bool,
}

impl Half {
    pub fn new(
        region: Region,
        location: Location,
        particles: Arc<ParticleConfig>,
        surface: &mut dyn SkySurface,
    ) -> Self {
        surface.set_label(region, &location.city);
        Self {
            region,
            location,
            particles,
            phase: None,
            sun_mounted: false,
            particles_mounted: false,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut Location {
        &mut self.location
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn sun_mounted(&self) -> bool {
        self.sun_mounted
    }

    pub fn particles_mounted(&self) -> bool {
        self.particles_mounted
    }

    pub fn show_local_time(&self, now: DateTime<Utc>, surface: &mut dyn SkySurface) {
        surface.show_local_time(self.region, &self.location.local_clock(now));
    }

    /// Applies `phase` unless it is already applied. A sun that cannot be
    /// positioned fails the whole transition before anything is written, so
    /// the next tick retries it.
    pub fn apply_phase(
        &mut self,
        phase: Phase,
        now: DateTime<Utc>,
        surface: &mut dyn SkySurface,
    ) -> Result<Transition, ContractError> {
        if self.phase == Some(phase) {
            return Ok(Transition::Unchanged);
        }

        let sun_arc = if phase == Phase::Day && !self.sun_mounted {
            Some(self.sun_arc(now)?)
        } else {
            None
        };

        let from = self.phase;
        surface.set_gradient(self.region, phase.gradient());
        self.phase = Some(phase);

        if phase == Phase::Night && !self.particles_mounted {
            surface.mount_particles(self.region, &self.particles);
            self.particles_mounted = true;
        }
        if phase != Phase::Night && self.particles_mounted {
            surface.unmount_particles(self.region);
            self.particles_mounted = false;
        }

        if let Some(arc) = sun_arc {
            surface.mount_sun(self.region, arc);
            self.sun_mounted = true;
        }
        if phase != Phase::Day && self.sun_mounted {
            surface.unmount_sun(self.region);
            self.sun_mounted = false;
        }

        Ok(Transition::Applied { from, to: phase })
    }

    fn sun_arc(&self, now: DateTime<Utc>) -> Result<SunArc, ContractError> {
        let percent = self.location.daytime_progression(now)?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(ContractError::ProgressionOutOfRange(percent));
        }
        let cycle_secs = self
            .location
            .boundaries()
            .map(|b| f64::from(b.day_length_secs))
            .ok_or_else(|| ContractError::BoundariesUnset(self.location.city.clone()))?;
        Ok(SunArc {
            cycle_secs,
            offset_secs: cycle_secs * percent / 100.0,
        })
    }
}
