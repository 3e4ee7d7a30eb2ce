//! Clocks

use jiff::{Timestamp, Zoned, tz::TimeZone};

/// Source of the completion time for orders.
pub trait Clock {
    /// Current time in the zone order identifiers are generated in.
    fn now(&self) -> Zoned;
}

/// Wall clock, in the system time zone unless one is configured.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    time_zone: Option<TimeZone>,
}

impl SystemClock {
    /// Clock in the system time zone
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock in a fixed time zone
    pub fn with_time_zone(time_zone: TimeZone) -> Self {
        Self {
            time_zone: Some(time_zone),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        match &self.time_zone {
            Some(time_zone) => Timestamp::now().to_zoned(time_zone.clone()),
            None => Zoned::now(),
        }
    }
}

/// Clock stopped at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock(Zoned);

impl FixedClock {
    /// Clock that always reports `at`
    pub fn new(at: Zoned) -> Self {
        FixedClock(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixed_clock_does_not_move() -> TestResult {
        let at = date(2025, 10, 19).at(9, 30, 0, 0).to_zoned(TimeZone::UTC)?;
        let clock = FixedClock::new(at.clone());

        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);

        Ok(())
    }

    #[test]
    fn system_clock_uses_configured_zone() {
        let clock = SystemClock::with_time_zone(TimeZone::UTC);

        assert_eq!(clock.now().offset(), jiff::tz::Offset::UTC);
    }
}
