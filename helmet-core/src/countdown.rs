//! Countdown-Controller
//!
//! Verwaltet die Restzeit einer Runde. Der Ablauf-Ton ist ein Latch:
//! er ertönt höchstens einmal pro `arm()`. Die Warnung unter 10 Sekunden
//! ist dagegen kein Latch und kommt bei jedem Tick erneut.

use rgb::RGB8;

use crate::config::{ALERT_ORANGE_SECS, ALERT_RED_SECS, ALERT_WINDOW_SECS};

/// Warnfarbe abhängig von der Restzeit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertBand {
    Amber,
    Orange,
    Red,
}

impl AlertBand {
    pub fn for_remaining(remaining_secs: i64) -> Self {
        if remaining_secs <= ALERT_RED_SECS {
            Self::Red
        } else if remaining_secs <= ALERT_ORANGE_SECS {
            Self::Orange
        } else {
            Self::Amber
        }
    }

    pub fn color(self) -> RGB8 {
        match self {
            Self::Amber => RGB8 {
                r: 255,
                g: 255,
                b: 0,
            },
            Self::Orange => RGB8 {
                r: 255,
                g: 165,
                b: 0,
            },
            Self::Red => RGB8 { r: 255, g: 0, b: 0 },
        }
    }
}

/// Ergebnis eines Countdown-Ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownTick {
    /// Kein Countdown aktiv
    Stopped,
    /// Restzeit anzeigen, ggf. mit Warnung
    Remaining {
        secs: u32,
        alert: Option<AlertBand>,
    },
    /// Zeit abgelaufen; `beep` ist nur beim ersten Ablauf pro Runde gesetzt
    Expired { beep: bool },
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    duration_secs: u32,
    start_ms: u64,
    running: bool,
    /// Ablauf-Ton schon gespielt (wird nur von `arm` zurückgesetzt)
    expiry_beeped: bool,
}

impl Countdown {
    pub const fn new() -> Self {
        Self {
            duration_secs: 0,
            start_ms: 0,
            running: false,
            expiry_beeped: false,
        }
    }

    /// (Re)startet den Countdown mit `secs` Sekunden
    pub fn arm(&mut self, now_ms: u64, secs: u32) {
        self.duration_secs = secs;
        self.start_ms = now_ms;
        self.running = true;
        self.expiry_beeped = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn expiry_beeped(&self) -> bool {
        self.expiry_beeped
    }

    /// Restzeit in Sekunden (kann negativ werden)
    pub fn remaining_secs(&self, now_ms: u64) -> i64 {
        let elapsed_secs = (now_ms.saturating_sub(self.start_ms) / 1000) as i64;
        self.duration_secs as i64 - elapsed_secs
    }

    pub fn tick(&mut self, now_ms: u64) -> CountdownTick {
        if !self.running {
            return CountdownTick::Stopped;
        }

        let remaining = self.remaining_secs(now_ms);
        if remaining > 0 {
            let alert = (remaining <= ALERT_WINDOW_SECS && !self.expiry_beeped)
                .then(|| AlertBand::for_remaining(remaining));
            return CountdownTick::Remaining {
                secs: remaining as u32,
                alert,
            };
        }

        self.running = false;
        let beep = !self.expiry_beeped;
        self.expiry_beeped = true;
        CountdownTick::Expired { beep }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_by_default() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(5000), CountdownTick::Stopped);
    }

    #[test]
    fn test_remaining_without_alert() {
        let mut countdown = Countdown::new();
        countdown.arm(1000, 30);
        assert_eq!(
            countdown.tick(6500),
            CountdownTick::Remaining {
                secs: 25,
                alert: None
            }
        );
    }

    #[test]
    fn test_alert_bands() {
        let mut countdown = Countdown::new();
        countdown.arm(0, 30);

        let band_at = |countdown: &mut Countdown, secs_left: u64| match countdown
            .tick((30 - secs_left) * 1000)
        {
            CountdownTick::Remaining { alert, .. } => alert,
            other => panic!("unexpected {:?}", other),
        };

        assert_eq!(band_at(&mut countdown, 11), None);
        assert_eq!(band_at(&mut countdown, 10), Some(AlertBand::Amber));
        assert_eq!(band_at(&mut countdown, 7), Some(AlertBand::Amber));
        assert_eq!(band_at(&mut countdown, 6), Some(AlertBand::Orange));
        assert_eq!(band_at(&mut countdown, 4), Some(AlertBand::Orange));
        assert_eq!(band_at(&mut countdown, 3), Some(AlertBand::Red));
        assert_eq!(band_at(&mut countdown, 1), Some(AlertBand::Red));
    }

    #[test]
    fn test_alert_repeats_every_tick() {
        let mut countdown = Countdown::new();
        countdown.arm(0, 5);
        for now in [1000, 1001, 1002] {
            assert!(matches!(
                countdown.tick(now),
                CountdownTick::Remaining { alert: Some(_), .. }
            ));
        }
    }

    #[test]
    fn test_expiry_beeps_once() {
        let mut countdown = Countdown::new();
        countdown.arm(0, 2);
        assert_eq!(countdown.tick(2000), CountdownTick::Expired { beep: true });
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(3000), CountdownTick::Stopped);
        assert!(countdown.expiry_beeped());
    }

    #[test]
    fn test_rearm_resets_latch() {
        let mut countdown = Countdown::new();
        countdown.arm(0, 1);
        countdown.tick(1000);
        countdown.arm(1000, 1);
        assert!(!countdown.expiry_beeped());
        assert_eq!(countdown.tick(2000), CountdownTick::Expired { beep: true });
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut countdown = Countdown::new();
        countdown.arm(500, 0);
        assert_eq!(countdown.tick(500), CountdownTick::Expired { beep: true });
    }
}
