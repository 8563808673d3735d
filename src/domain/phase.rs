use chrono::{DateTime, Utc};

use crate::domain::location::{Location, SunBoundaries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl Phase {
    pub const ALL: [Self; 4] = [Self::Dawn, Self::Day, Self::Dusk, Self::Night];

    #[must_use]
    pub fn gradient(self) -> Gradient {
        match self {
            Self::Dawn => DAWN,
            Self::Day => DAY,
            Self::Dusk => DUSK,
            Self::Night => NIGHT,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub top: Rgb,
    pub bottom: Rgb,
}

const DAWN: Gradient = Gradient {
    top: Rgb::from_hex(0x63_ad_f7),
    bottom: Rgb::from_hex(0xff_b5_39),
};
const DAY: Gradient = Gradient {
    top: Rgb::from_hex(0x86_d4_f7),
    bottom: Rgb::from_hex(0x55_a7_ff),
};
const DUSK: Gradient = Gradient {
    top: Rgb::from_hex(0x48_56_61),
    bottom: Rgb::from_hex(0xff_82_2b),
};
const NIGHT: Gradient = Gradient {
    top: Rgb::from_hex(0x0a_17_22),
    bottom: Rgb::from_hex(0x41_5a_84),
};

/// Lighting phase of `location` at `at`. Locations without fetched
/// boundaries are treated as night.
#[must_use]
pub fn classify(location: &Location, at: DateTime<Utc>) -> Phase {
    location
        .boundaries()
        .map_or(Phase::Night, |boundaries| classify_within(boundaries, at))
}

/// The civil-twilight window is checked first; every edge is inclusive on the
/// side closer to the day.
#[must_use]
pub fn classify_within(boundaries: &SunBoundaries, at: DateTime<Utc>) -> Phase {
    if at < boundaries.twilight_begin || at > boundaries.twilight_end {
        Phase::Night
    } else if at <= boundaries.sunrise {
        Phase::Dawn
    } else if at <= boundaries.sunset {
        Phase::Day
    } else {
        Phase::Dusk
    }
}
