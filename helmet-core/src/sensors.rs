//! Sensor-Entprellung
//!
//! Wandelt kontinuierliche Sensorwerte in einmalige Ereignisse pro Tick um.
//! Jede Prüfung ist eine eigene Methode, damit der Scheduler sie in fester
//! Reihenfolge aufrufen kann und spätere Prüfungen den Zustand früherer
//! Prüfungen im selben Tick sehen.

use crate::config::{
    HELMET_DISTANCE_MAX_CM, NOD_ACCEL_THRESHOLD, NOD_CHECK_INTERVAL_MS, SHOUT_MIC_THRESHOLD,
};
use crate::traits::{Accelerometer, DistanceSensor, Microphone, RotaryEncoder};

/// Helm-Latch: einmal scharf, bleibt scharf
///
/// Wird in dieser Firmware nie zurückgesetzt (einmal pro Stromzyklus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HelmetLatch {
    Waiting,
    Armed,
}

/// Bedingungen, unter denen ein Schrei überhaupt geprüft wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoutGate {
    pub game_running: bool,
    pub timer_running: bool,
    pub has_words: bool,
}

#[derive(Debug, Clone)]
pub struct SensorAggregator {
    last_position: i32,
    helmet: HelmetLatch,
    last_nod_check_ms: u64,
}

impl Default for SensorAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorAggregator {
    pub const fn new() -> Self {
        Self {
            last_position: 0,
            helmet: HelmetLatch::Waiting,
            last_nod_check_ms: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.helmet == HelmetLatch::Armed
    }

    pub fn helmet(&self) -> HelmetLatch {
        self.helmet
    }

    /// Übernimmt die aktuelle Stellung als Referenz, ohne Ereignis
    pub fn zero_rotary<E: RotaryEncoder + ?Sized>(&mut self, encoder: &mut E) {
        self.last_position = encoder.position();
    }

    /// Drehgeber: vorzeichenbehaftete Änderung seit dem letzten Tick
    pub fn poll_rotary<E: RotaryEncoder + ?Sized>(&mut self, encoder: &mut E) -> Option<i32> {
        let position = encoder.position();
        if position == self.last_position {
            return None;
        }

        let delta = position.wrapping_sub(self.last_position);
        self.last_position = position;
        Some(delta)
    }

    /// Helm aufgesetzt: feuert genau einmal und macht den Latch scharf
    pub fn poll_helmet<D: DistanceSensor + ?Sized>(&mut self, sensor: &mut D) -> bool {
        let distance = sensor.distance_cm();
        if distance == 0 || distance > HELMET_DISTANCE_MAX_CM || self.is_armed() {
            return false;
        }

        self.helmet = HelmetLatch::Armed;
        true
    }

    /// Nicken: höchstens eine Prüfung pro Sekunde, nur während einer Runde
    ///
    /// Das Zeitfenster startet bei jeder Prüfung neu, auch ohne Treffer.
    pub fn poll_nod<A: Accelerometer + ?Sized>(
        &mut self,
        now_ms: u64,
        game_running: bool,
        accel: &mut A,
    ) -> bool {
        if !game_running || now_ms.saturating_sub(self.last_nod_check_ms) <= NOD_CHECK_INTERVAL_MS
        {
            return false;
        }
        self.last_nod_check_ms = now_ms;

        match accel.acceleration() {
            Ok(sample) => sample.z.unsigned_abs() > NOD_ACCEL_THRESHOLD,
            Err(e) => {
                warn!("Sensors: accelerometer read failed: {}", e);
                false
            }
        }
    }

    /// Schrei: nur mit laufender Runde, laufendem Timer und aufgesetztem Helm
    pub fn poll_shout<M: Microphone + ?Sized>(&self, gate: ShoutGate, mic: &mut M) -> bool {
        if !(gate.game_running && gate.timer_running && gate.has_words && self.is_armed()) {
            return false;
        }

        mic.level() > SHOUT_MIC_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SensorError;
    use crate::types::Acceleration;

    struct Fixed<T>(T);

    impl RotaryEncoder for Fixed<i32> {
        fn position(&mut self) -> i32 {
            self.0
        }
    }

    impl DistanceSensor for Fixed<u32> {
        fn distance_cm(&mut self) -> u32 {
            self.0
        }
    }

    impl Microphone for Fixed<u16> {
        fn level(&mut self) -> u16 {
            self.0
        }
    }

    struct MockAccel {
        z: i16,
        reads: usize,
        fail: bool,
    }

    impl MockAccel {
        fn new(z: i16) -> Self {
            Self {
                z,
                reads: 0,
                fail: false,
            }
        }
    }

    impl Accelerometer for MockAccel {
        fn acceleration(&mut self) -> Result<Acceleration, SensorError> {
            self.reads += 1;
            if self.fail {
                return Err(SensorError::Bus);
            }
            Ok(Acceleration {
                x: 0,
                y: 0,
                z: self.z,
            })
        }
    }

    const OPEN_GATE: ShoutGate = ShoutGate {
        game_running: true,
        timer_running: true,
        has_words: true,
    };

    #[test]
    fn test_rotary_reports_signed_delta() {
        let mut sensors = SensorAggregator::new();
        assert_eq!(sensors.poll_rotary(&mut Fixed(0)), None);
        assert_eq!(sensors.poll_rotary(&mut Fixed(2)), Some(2));
        assert_eq!(sensors.poll_rotary(&mut Fixed(2)), None);
        assert_eq!(sensors.poll_rotary(&mut Fixed(1)), Some(-1));
    }

    #[test]
    fn test_helmet_fires_once() {
        let mut sensors = SensorAggregator::new();
        assert!(sensors.poll_helmet(&mut Fixed(1u32)));
        assert!(!sensors.poll_helmet(&mut Fixed(1u32)));
        assert!(sensors.is_armed());
    }

    #[test]
    fn test_helmet_distance_window() {
        let mut sensors = SensorAggregator::new();
        assert!(!sensors.poll_helmet(&mut Fixed(0u32)));
        assert!(!sensors.poll_helmet(&mut Fixed(3u32)));
        assert_eq!(sensors.helmet(), HelmetLatch::Waiting);
        assert!(sensors.poll_helmet(&mut Fixed(2u32)));
    }

    #[test]
    fn test_nod_requires_running_game() {
        let mut sensors = SensorAggregator::new();
        let mut accel = MockAccel::new(20_000);
        assert!(!sensors.poll_nod(5000, false, &mut accel));
        assert_eq!(accel.reads, 0);
    }

    #[test]
    fn test_nod_threshold_both_directions() {
        let mut sensors = SensorAggregator::new();
        assert!(sensors.poll_nod(1001, true, &mut MockAccel::new(15_001)));
        assert!(sensors.poll_nod(2002, true, &mut MockAccel::new(-15_001)));
        assert!(!sensors.poll_nod(3003, true, &mut MockAccel::new(15_000)));
        assert!(sensors.poll_nod(4004, true, &mut MockAccel::new(i16::MIN)));
    }

    #[test]
    fn test_nod_gate_advances_without_detection() {
        let mut sensors = SensorAggregator::new();
        let mut still = MockAccel::new(0);
        assert!(!sensors.poll_nod(1500, true, &mut still));
        assert_eq!(still.reads, 1);

        // 1500 + 1000 noch nicht überschritten: keine Prüfung
        let mut nod = MockAccel::new(20_000);
        assert!(!sensors.poll_nod(2400, true, &mut nod));
        assert_eq!(nod.reads, 0);
        assert!(sensors.poll_nod(2501, true, &mut nod));
    }

    #[test]
    fn test_nod_bus_error_counts_as_no_nod() {
        let mut sensors = SensorAggregator::new();
        let mut accel = MockAccel::new(20_000);
        accel.fail = true;
        assert!(!sensors.poll_nod(1001, true, &mut accel));
    }

    #[test]
    fn test_shout_requires_armed_helmet() {
        let mut sensors = SensorAggregator::new();
        assert!(!sensors.poll_shout(OPEN_GATE, &mut Fixed(4000u16)));

        sensors.poll_helmet(&mut Fixed(1u32));
        assert!(sensors.poll_shout(OPEN_GATE, &mut Fixed(4000u16)));
        assert!(!sensors.poll_shout(OPEN_GATE, &mut Fixed(3000u16)));
    }

    #[test]
    fn test_shout_requires_timer() {
        let mut sensors = SensorAggregator::new();
        sensors.poll_helmet(&mut Fixed(1u32));
        let gate = ShoutGate {
            timer_running: false,
            ..OPEN_GATE
        };
        assert!(!sensors.poll_shout(gate, &mut Fixed(4000u16)));
    }
}
