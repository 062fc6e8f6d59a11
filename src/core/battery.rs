//! Simulated battery for the status bar

use std::time::Instant;

const DRAIN_SECS_PER_PERCENT: f32 = 90.0;
const CHARGE_SECS_PER_PERCENT: f32 = 20.0;
const LOW_WATERMARK: f32 = 5.0;
const FULL: f32 = 100.0;

/// A slow drain/charge cycle. The phone has no real battery to report,
/// so the status bar animates a plausible one: it drains to the low
/// watermark, "plugs in", charges back to full and unplugs again.
pub struct Battery {
    percent: f32,
    charging: bool,
    last_tick: Instant,
}

impl Battery {
    pub fn new(now: Instant) -> Self {
        Self {
            percent: FULL,
            charging: false,
            last_tick: now,
        }
    }

    /// Advance the simulation to `now`.
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if self.charging {
            self.percent += dt / CHARGE_SECS_PER_PERCENT;
            if self.percent >= FULL {
                self.percent = FULL;
                self.charging = false;
            }
        } else {
            self.percent -= dt / DRAIN_SECS_PER_PERCENT;
            if self.percent <= LOW_WATERMARK {
                self.percent = LOW_WATERMARK;
                self.charging = true;
            }
        }
    }

    /// Charge level, 5 to 100.
    pub fn percent(&self) -> u8 {
        self.percent.round() as u8
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn starts_full_and_unplugged() {
        let battery = Battery::new(Instant::now());
        assert_eq!(battery.percent(), 100);
        assert!(!battery.is_charging());
    }

    #[test]
    fn drains_one_percent_per_interval() {
        let t0 = Instant::now();
        let mut battery = Battery::new(t0);

        battery.tick(t0 + Duration::from_secs_f32(DRAIN_SECS_PER_PERCENT));
        assert_eq!(battery.percent(), 99);
    }

    #[test]
    fn ticking_without_elapsed_time_changes_nothing() {
        let t0 = Instant::now();
        let mut battery = Battery::new(t0);
        battery.tick(t0);
        assert_eq!(battery.percent(), 100);
    }

    #[test]
    fn plugs_in_at_the_low_watermark() {
        let t0 = Instant::now();
        let mut battery = Battery::new(t0);

        battery.tick(t0 + Duration::from_secs_f32(DRAIN_SECS_PER_PERCENT * 200.0));
        assert_eq!(battery.percent(), 5);
        assert!(battery.is_charging());
    }

    #[test]
    fn charges_back_to_full_and_unplugs() {
        let t0 = Instant::now();
        let mut battery = Battery::new(t0);

        let drained = t0 + Duration::from_secs_f32(DRAIN_SECS_PER_PERCENT * 200.0);
        battery.tick(drained);
        assert!(battery.is_charging());

        battery.tick(drained + Duration::from_secs_f32(CHARGE_SECS_PER_PERCENT * 100.0));
        assert_eq!(battery.percent(), 100);
        assert!(!battery.is_charging());
    }
}
