// src/math/probability/seed/key.rs

use std::fmt;

pub const DEFAULT_HORIZON_DAYS: u8 = 7;
pub const MIN_HORIZON_DAYS: u8 = 1;
pub const MAX_HORIZON_DAYS: u8 = 30;

/// Clamps a forecast horizon to 1..=30 days.
pub fn clamp_horizon(days: i64) -> u8 {
    days.clamp(i64::from(MIN_HORIZON_DAYS), i64::from(MAX_HORIZON_DAYS)) as u8
}

/// The tuple a probability field is a pure function of.
///
/// Two fields synthesized from equal keys over meshes of the same shape are
/// bitwise identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastKey {
    region: String,
    species: String,
    date: String,
    time_of_day: String,
    horizon_days: u8,
}

impl ForecastKey {
    pub fn new(
        region: impl Into<String>,
        species: impl Into<String>,
        date: impl Into<String>,
        time_of_day: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            species: species.into(),
            date: date.into(),
            time_of_day: time_of_day.into(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Sets the forecast horizon, clamped to 1..=30 days.
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = clamp_horizon(days);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time_of_day(&self) -> &str {
        &self.time_of_day
    }

    pub fn horizon_days(&self) -> u8 {
        self.horizon_days
    }

    /// Text components in seeding order
    pub(crate) fn parts(&self) -> [&str; 4] {
        [&self.region, &self.species, &self.date, &self.time_of_day]
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{} (+{}d)",
            self.region, self.species, self.date, self.time_of_day, self.horizon_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_clamp() {
        assert_eq!(clamp_horizon(0), 1);
        assert_eq!(clamp_horizon(-4), 1);
        assert_eq!(clamp_horizon(14), 14);
        assert_eq!(clamp_horizon(400), 30);
    }

    #[test]
    fn test_default_horizon() {
        let key = ForecastKey::new("東京都", "熊", "2025-09-09", "午前");
        assert_eq!(key.horizon_days(), DEFAULT_HORIZON_DAYS);
        assert_eq!(key.with_horizon_days(99).horizon_days(), 30);
    }
}
