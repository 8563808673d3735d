use std::time::{Duration, Instant};

use crate::{
    domain::{countdown::CountdownReading, phase::Gradient},
    ui::{
        particles::StarField,
        surface::{ParticleConfig, Region, SkySurface, SunArc},
    },
};

#[derive(Debug, Clone, Copy)]
pub struct MountedSun {
    pub arc: SunArc,
    pub mounted_at: Instant,
}

impl MountedSun {
    pub fn position(&self, now: Instant) -> f64 {
        self.arc
            .position(now.saturating_duration_since(self.mounted_at).as_secs_f64())
    }
}

#[derive(Debug, Default)]
pub struct RegionCanvas {
    pub label: String,
    pub gradient: Option<Gradient>,
    pub sun: Option<MountedSun>,
    pub stars: Option<StarField>,
    pub clock: String,
}

/// Terminal-backed surface; `ui::render` draws whatever was last written here.
#[derive(Debug)]
pub struct SkyCanvas {
    regions: [RegionCanvas; 2],
    countdown: Option<CountdownReading>,
    animate: bool,
}

impl SkyCanvas {
    pub fn new(animate: bool) -> Self {
        Self {
            regions: [RegionCanvas::default(), RegionCanvas::default()],
            countdown: None,
            animate,
        }
    }

    pub fn region(&self, region: Region) -> &RegionCanvas {
        &self.regions[region.index()]
    }

    pub fn countdown(&self) -> Option<&CountdownReading> {
        self.countdown.as_ref()
    }

    /// Advances star fields by one animation frame.
    pub fn advance(&mut self, dt: Duration) {
        if !self.animate {
            return;
        }
        for region in &mut self.regions {
            if let Some(stars) = region.stars.as_mut() {
                stars.update(dt);
            }
        }
    }

    fn region_mut(&mut self, region: Region) -> &mut RegionCanvas {
        &mut self.regions[region.index()]
    }
}

impl SkySurface for SkyCanvas {
    fn set_label(&mut self, region: Region, city: &str) {
        self.region_mut(region).label = city.to_string();
    }

    fn set_gradient(&mut self, region: Region, gradient: Gradient) {
        self.region_mut(region).gradient = Some(gradient);
    }

    fn mount_sun(&mut self, region: Region, arc: SunArc) {
        self.region_mut(region).sun = Some(MountedSun {
            arc,
            mounted_at: Instant::now(),
        });
    }

    fn unmount_sun(&mut self, region: Region) {
        self.region_mut(region).sun = None;
    }

    fn mount_particles(&mut self, region: Region, config: &ParticleConfig) {
        self.region_mut(region).stars = Some(StarField::new(config));
    }

    fn unmount_particles(&mut self, region: Region) {
        self.region_mut(region).stars = None;
    }

    fn show_local_time(&mut self, region: Region, clock: &str) {
        let slot = &mut self.region_mut(region).clock;
        slot.clear();
        slot.push_str(clock);
    }

    fn show_countdown(&mut self, reading: &CountdownReading) {
        self.countdown = Some(reading.clone());
    }
}
