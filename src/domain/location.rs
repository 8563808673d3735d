use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use thiserror::Error;

/// Raised when sun progression is requested without usable boundaries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("sun boundaries for {0} have not been fetched yet")]
    BoundariesUnset(String),
    #[error("day length for {0} is zero")]
    ZeroDayLength(String),
    #[error("sun progression {0:.2}% is outside 0..=100")]
    ProgressionOutOfRange(f64),
}

/// Relative day passed to the sun-time service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDay {
    Yesterday,
    Today,
    Tomorrow,
}

impl FetchDay {
    /// Picks the day whose boundaries match the location's local calendar day,
    /// given the caller's UTC hour.
    #[must_use]
    pub fn decide(caller_utc_hour: u32, utc_offset_hours: i32) -> Self {
        let local_hour = i64::from(caller_utc_hour) + i64::from(utc_offset_hours);
        if local_hour >= 24 {
            Self::Tomorrow
        } else if local_hour < 0 {
            Self::Yesterday
        } else {
            Self::Today
        }
    }

    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Yesterday => "yesterday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }
}

/// Sun boundaries returned by one successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunBoundaries {
    pub twilight_begin: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub twilight_end: DateTime<Utc>,
    pub day_length_secs: u32,
}

impl SunBoundaries {
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.twilight_begin <= self.sunrise
            && self.sunrise <= self.sunset
            && self.sunset <= self.twilight_end
    }
}

/// Boundaries plus the local day they were requested for. Always replaced as
/// one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub boundaries: SunBoundaries,
    pub fetched_at: DateTime<Utc>,
    pub fetched_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: i32,
    sun: Option<SunTimes>,
}

impl Location {
    pub fn new(
        city: impl Into<String>,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            city: city.into(),
            latitude,
            longitude,
            utc_offset_hours,
            sun: None,
        }
    }

    pub fn erlangen() -> Self {
        Self::new("erlangen", 49.590_99, 11.007_83, 2)
    }

    pub fn samui() -> Self {
        Self::new("samui", 9.560_653, 100.003_414, 7)
    }

    pub fn sun_times(&self) -> Option<&SunTimes> {
        self.sun.as_ref()
    }

    pub fn boundaries(&self) -> Option<&SunBoundaries> {
        self.sun.as_ref().map(|sun| &sun.boundaries)
    }

    /// Stores freshly fetched boundaries, overwriting every field at once.
    /// `requested_at` decides which local day the boundaries belong to.
    pub fn replace_sun_times(
        &mut self,
        boundaries: SunBoundaries,
        requested_at: DateTime<Utc>,
        fetched_at: DateTime<Utc>,
    ) {
        let fetched_on = self.local_date(requested_at);
        self.sun = Some(SunTimes {
            boundaries,
            fetched_at,
            fetched_on,
        });
    }

    pub fn local_datetime(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.naive_utc() + Duration::hours(i64::from(self.utc_offset_hours))
    }

    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(at).date()
    }

    pub fn local_clock(&self, at: DateTime<Utc>) -> String {
        self.local_datetime(at).format("%H:%M:%S").to_string()
    }

    pub fn fetch_day(&self, at: DateTime<Utc>) -> FetchDay {
        FetchDay::decide(at.hour(), self.utc_offset_hours)
    }

    /// True when no fetch succeeded yet or the last one happened on an earlier
    /// local calendar day.
    pub fn needs_refresh(&self, at: DateTime<Utc>) -> bool {
        self.sun
            .as_ref()
            .is_none_or(|sun| sun.fetched_on != self.local_date(at))
    }

    /// Percentage of the day length elapsed since sunrise.
    pub fn daytime_progression(&self, at: DateTime<Utc>) -> Result<f64, ContractError> {
        let boundaries = self
            .boundaries()
            .ok_or_else(|| ContractError::BoundariesUnset(self.city.clone()))?;
        if boundaries.day_length_secs == 0 {
            return Err(ContractError::ZeroDayLength(self.city.clone()));
        }
        let elapsed_ms = (at - boundaries.sunrise).num_milliseconds() as f64;
        Ok(elapsed_ms / 1000.0 / f64::from(boundaries.day_length_secs) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 21, h, m, 0).unwrap()
    }

    fn boundaries() -> SunBoundaries {
        SunBoundaries {
            twilight_begin: utc(6, 0),
            sunrise: utc(6, 30),
            sunset: utc(18, 0),
            twilight_end: utc(18, 30),
            day_length_secs: 41_400,
        }
    }

    #[test]
    fn fetch_day_follows_local_calendar() {
        assert_eq!(FetchDay::decide(23, 11), FetchDay::Tomorrow);
        assert_eq!(FetchDay::decide(2, -11), FetchDay::Yesterday);
        assert_eq!(FetchDay::decide(12, 2), FetchDay::Today);
        assert_eq!(FetchDay::decide(21, 2), FetchDay::Today);
        assert_eq!(FetchDay::decide(22, 2), FetchDay::Tomorrow);
        assert_eq!(FetchDay::decide(0, 0), FetchDay::Today);
    }

    #[test]
    fn fetch_day_query_values() {
        assert_eq!(FetchDay::Yesterday.as_query(), "yesterday");
        assert_eq!(FetchDay::Today.as_query(), "today");
        assert_eq!(FetchDay::Tomorrow.as_query(), "tomorrow");
    }

    #[test]
    fn local_clock_applies_offset_across_midnight() {
        let samui = Location::samui();
        assert_eq!(samui.local_clock(utc(20, 5)), "03:05:00");
        assert_eq!(
            samui.local_date(utc(20, 5)),
            NaiveDate::from_ymd_opt(2026, 6, 22).unwrap()
        );
    }

    #[test]
    fn needs_refresh_until_fetched_then_on_next_local_day() {
        let mut erlangen = Location::erlangen();
        assert!(erlangen.needs_refresh(utc(8, 0)));

        erlangen.replace_sun_times(boundaries(), utc(8, 0), utc(8, 0));
        assert!(!erlangen.needs_refresh(utc(21, 59)));
        // 22:00 UTC is midnight in UTC+2
        assert!(erlangen.needs_refresh(utc(22, 0)));
    }

    #[test]
    fn replace_overwrites_the_whole_group() {
        let mut location = Location::erlangen();
        location.replace_sun_times(boundaries(), utc(8, 0), utc(8, 0));

        let mut later = boundaries();
        later.sunrise = utc(6, 31);
        later.sunset = utc(17, 59);
        later.day_length_secs = 41_280;
        location.replace_sun_times(later, utc(9, 0), utc(9, 0));

        let stored = location.sun_times().unwrap();
        assert_eq!(stored.boundaries, later);
        assert_eq!(stored.fetched_at, utc(9, 0));
    }

    #[test]
    fn progression_is_percentage_of_day_length() {
        let mut location = Location::erlangen();
        location.replace_sun_times(boundaries(), utc(6, 0), utc(6, 0));
        let halfway = boundaries().sunrise + Duration::seconds(20_700);
        let pct = location.daytime_progression(halfway).unwrap();
        assert!((pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn progression_without_boundaries_is_a_contract_error() {
        let location = Location::erlangen();
        assert_eq!(
            location.daytime_progression(utc(12, 0)),
            Err(ContractError::BoundariesUnset("erlangen".to_string()))
        );
    }

    #[test]
    fn progression_with_zero_day_length_is_rejected() {
        let mut location = Location::erlangen();
        let mut polar = boundaries();
        polar.day_length_secs = 0;
        location.replace_sun_times(polar, utc(6, 0), utc(6, 0));
        assert!(matches!(
            location.daytime_progression(utc(12, 0)),
            Err(ContractError::ZeroDayLength(_))
        ));
    }

    #[test]
    fn ordering_check() {
        assert!(boundaries().is_ordered());
        let mut broken = boundaries();
        broken.sunset = utc(5, 0);
        assert!(!broken.is_ordered());
    }
}
