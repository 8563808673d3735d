#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use split_sky::{
    cli::Cli,
    data::sun_times::SUN_TIMES_URL,
    domain::{countdown::CountdownReading, location::SunBoundaries, phase::Gradient},
    ui::surface::{ParticleConfig, Region, SkySurface, SunArc},
};

pub fn quiet_cli() -> Cli {
    Cli {
        sun_url: SUN_TIMES_URL.to_string(),
        log_file: None,
        no_animation: true,
        fps: 20,
        one_shot: false,
    }
}

pub fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, minute, 0)
        .single()
        .expect("valid fixture instant")
}

pub fn boundaries_on(day: u32) -> SunBoundaries {
    SunBoundaries {
        twilight_begin: utc(day, 4, 0),
        sunrise: utc(day, 4, 30),
        sunset: utc(day, 19, 0),
        twilight_end: utc(day, 19, 30),
        day_length_secs: 52_200,
    }
}

pub fn sun_times_payload(
    twilight_begin: &str,
    sunrise: &str,
    sunset: &str,
    twilight_end: &str,
    day_length: u32,
) -> serde_json::Value {
    serde_json::json!({
        "results": {
            "sunrise": sunrise,
            "sunset": sunset,
            "solar_noon": "2026-06-21T11:15:00+00:00",
            "day_length": day_length,
            "civil_twilight_begin": twilight_begin,
            "civil_twilight_end": twilight_end,
            "nautical_twilight_begin": "2026-06-21T01:30:00+00:00",
            "nautical_twilight_end": "2026-06-21T21:00:00+00:00",
            "astronomical_twilight_begin": "1970-01-01T00:00:01+00:00",
            "astronomical_twilight_end": "1970-01-01T00:00:01+00:00"
        },
        "status": "OK",
        "tzid": "UTC"
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    Sun,
    Particles,
}

/// Counts mount operations and mirrors the decorations currently shown.
#[derive(Debug, Default)]
pub struct CountingSurface {
    pub mounts: Vec<(Region, Mount)>,
    pub unmounts: Vec<(Region, Mount)>,
    pub gradients: Vec<(Region, Gradient)>,
    pub sun_shown: [bool; 2],
    pub particles_shown: [bool; 2],
}

impl CountingSurface {
    pub fn operations(&self) -> usize {
        self.mounts.len() + self.unmounts.len() + self.gradients.len()
    }
}

impl SkySurface for CountingSurface {
    fn set_label(&mut self, _region: Region, _city: &str) {}

    fn set_gradient(&mut self, region: Region, gradient: Gradient) {
        self.gradients.push((region, gradient));
    }

    fn mount_sun(&mut self, region: Region, _arc: SunArc) {
        self.mounts.push((region, Mount::Sun));
        self.sun_shown[region.index()] = true;
    }

    fn unmount_sun(&mut self, region: Region) {
        self.unmounts.push((region, Mount::Sun));
        self.sun_shown[region.index()] = false;
    }

    fn mount_particles(&mut self, region: Region, _config: &ParticleConfig) {
        self.mounts.push((region, Mount::Particles));
        self.particles_shown[region.index()] = true;
    }

    fn unmount_particles(&mut self, region: Region) {
        self.unmounts.push((region, Mount::Particles));
        self.particles_shown[region.index()] = false;
    }

    fn show_local_time(&mut self, _region: Region, _clock: &str) {}

    fn show_countdown(&mut self, _reading: &CountdownReading) {}
}
