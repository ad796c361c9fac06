// Quadratur-Drehgeber (gepollt)
//
// Jeder Aufruf von position() tastet beide Kanäle ab und zählt gültige
// Zustandswechsel. Eine Rastung = ROTARY_STEPS_PER_DETENT Wechsel.

use esp_hal::gpio::{Input, InputConfig, InputPin, Pull};
use helmet_core::RotaryEncoder;

use crate::config::ROTARY_STEPS_PER_DETENT;

/// Richtung je (alter Zustand << 2 | neuer Zustand), 0 = ungültig/kein Schritt
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

pub struct QuadratureEncoder {
    clk: Input<'static>,
    dt: Input<'static>,
    state: u8,
    steps: i32,
}

impl QuadratureEncoder {
    pub fn new(clk: impl InputPin + 'static, dt: impl InputPin + 'static) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        let mut encoder = Self {
            clk: Input::new(clk, pull_up),
            dt: Input::new(dt, pull_up),
            state: 0,
            steps: 0,
        };
        encoder.state = encoder.sample();
        encoder
    }

    fn sample(&self) -> u8 {
        (self.clk.is_high() as u8) | ((self.dt.is_high() as u8) << 1)
    }
}

impl RotaryEncoder for QuadratureEncoder {
    fn position(&mut self) -> i32 {
        let state = self.sample();
        if state != self.state {
            let index = ((self.state << 2) | state) as usize;
            self.steps += TRANSITIONS[index] as i32;
            self.state = state;
        }

        self.steps.div_euclid(ROTARY_STEPS_PER_DETENT)
    }
}
