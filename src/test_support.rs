use chrono::{DateTime, TimeZone, Utc};

use crate::{
    cli::Cli,
    data::sun_times::SUN_TIMES_URL,
    domain::{countdown::CountdownReading, location::SunBoundaries, phase::Gradient},
    ui::surface::{ParticleConfig, Region, SkySurface, SunArc},
};

pub(crate) fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, day, hour, minute, 0)
        .single()
        .expect("valid fixture instant")
}

/// Summer-ish boundaries on 2026-06-`day`, in UTC.
pub(crate) fn boundaries_on(day: u32) -> SunBoundaries {
    SunBoundaries {
        twilight_begin: utc(day, 4, 0),
        sunrise: utc(day, 4, 30),
        sunset: utc(day, 19, 0),
        twilight_end: utc(day, 19, 30),
        day_length_secs: 52_200,
    }
}

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        sun_url: SUN_TIMES_URL.to_string(),
        log_file: None,
        no_animation: true,
        fps: 20,
        one_shot: false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Label(Region, String),
    Gradient(Region, Gradient),
    MountSun(Region, SunArc),
    UnmountSun(Region),
    MountParticles(Region),
    UnmountParticles(Region),
    Clock(Region, String),
    Countdown(String),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl SkySurface for RecordingSurface {
    fn set_label(&mut self, region: Region, city: &str) {
        self.calls.push(SurfaceCall::Label(region, city.to_string()));
    }

    fn set_gradient(&mut self, region: Region, gradient: Gradient) {
        self.calls.push(SurfaceCall::Gradient(region, gradient));
    }

    fn mount_sun(&mut self, region: Region, arc: SunArc) {
        self.calls.push(SurfaceCall::MountSun(region, arc));
    }

    fn unmount_sun(&mut self, region: Region) {
        self.calls.push(SurfaceCall::UnmountSun(region));
    }

    fn mount_particles(&mut self, region: Region, _config: &ParticleConfig) {
        self.calls.push(SurfaceCall::MountParticles(region));
    }

    fn unmount_particles(&mut self, region: Region) {
        self.calls.push(SurfaceCall::UnmountParticles(region));
    }

    fn show_local_time(&mut self, region: Region, clock: &str) {
        self.calls.push(SurfaceCall::Clock(region, clock.to_string()));
    }

    fn show_countdown(&mut self, reading: &CountdownReading) {
        self.calls.push(SurfaceCall::Countdown(reading.text.clone()));
    }
}
