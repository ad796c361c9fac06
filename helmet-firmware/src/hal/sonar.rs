// HC-SR04 Ultraschall-Abstandssensor
//
// Blockierende Messung: 10 µs Trigger-Puls, dann Länge des Echo-Pulses.
// Ohne Echo innerhalb der maximalen Distanz wird 0 geliefert.

use embassy_time::{Duration, Instant};
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, InputConfig, InputPin, Level, Output, OutputConfig, OutputPin};
use helmet_core::DistanceSensor;

use crate::config::{SONAR_MAX_DISTANCE_CM, SONAR_US_PER_CM};

/// Maximale Wartezeit bis der Sensor den Echo-Pin hochzieht
const ECHO_START_TIMEOUT_US: u64 = 5_000;

pub struct Sonar {
    trig: Output<'static>,
    echo: Input<'static>,
    delay: Delay,
}

impl Sonar {
    pub fn new(trig: impl OutputPin + 'static, echo: impl InputPin + 'static) -> Self {
        Self {
            trig: Output::new(trig, Level::Low, OutputConfig::default()),
            echo: Input::new(echo, InputConfig::default()),
            delay: Delay::new(),
        }
    }

    fn max_echo(&self) -> Duration {
        Duration::from_micros((SONAR_MAX_DISTANCE_CM * SONAR_US_PER_CM) as u64)
    }
}

impl DistanceSensor for Sonar {
    fn distance_cm(&mut self) -> u32 {
        self.trig.set_low();
        self.delay.delay_micros(2);
        self.trig.set_high();
        self.delay.delay_micros(10);
        self.trig.set_low();

        let waiting = Instant::now();
        while self.echo.is_low() {
            if waiting.elapsed() > Duration::from_micros(ECHO_START_TIMEOUT_US) {
                return 0;
            }
        }

        let rising = Instant::now();
        let max_echo = self.max_echo();
        while self.echo.is_high() {
            if rising.elapsed() > max_echo {
                return 0;
            }
        }

        rising.elapsed().as_micros() as u32 / SONAR_US_PER_CM
    }
}
