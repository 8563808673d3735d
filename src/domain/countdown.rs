use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CountdownReading {
    pub text: String,
    pub progress_pct: f64,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    start: DateTime<Utc>,
    target: DateTime<Utc>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(
            Utc.with_ymd_and_hms(2018, 2, 10, 9, 30, 0)
                .single()
                .expect("valid countdown start"),
            Utc.with_ymd_and_hms(2019, 3, 1, 18, 0, 0)
                .single()
                .expect("valid countdown target"),
        )
    }
}

impl Countdown {
    #[must_use]
    pub fn new(start: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        Self { start, target }
    }

    #[must_use]
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    #[must_use]
    pub fn reading(&self, now: DateTime<Utc>) -> CountdownReading {
        let remaining_ms = (self.target - now).num_milliseconds();
        if remaining_ms <= 0 {
            return CountdownReading {
                text: "yaaay :D!".to_string(),
                progress_pct: 100.0,
                finished: true,
            };
        }

        let total_ms = (self.target - self.start).num_milliseconds().max(1);
        let progress_pct = ((total_ms - remaining_ms) as f64 / total_ms as f64 * 100.0).max(0.0);

        let secs = remaining_ms / 1000;
        let days = secs / 86_400;
        let hours = (secs % 86_400) / 3_600;
        let minutes = (secs % 3_600) / 60;
        let seconds = secs % 60;

        CountdownReading {
            text: format!("{days}d {hours}h {minutes}m {seconds}s"),
            progress_pct,
            finished: false,
        }
    }
}
