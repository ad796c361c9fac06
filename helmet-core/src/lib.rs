//! Helmet Core - Platform-agnostic Spiel-Logik und Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Hardware-Traits, die Zustandsautomaten des
//! Wort-Rate-Spiels (Spiel, Countdown, LED-Effekte, Melodie, Sensoren)
//! und den kooperativen Scheduler, der alles pro Tick antreibt.

#![no_std]

// Muss zuerst kommen: stellt info!/warn!/error! für alle Module bereit
#[macro_use]
mod fmt;

pub mod config;
pub mod countdown;
pub mod game;
pub mod led_effects;
pub mod logic;
pub mod melody;
#[cfg(feature = "serde")]
pub mod protocol;
pub mod scheduler;
pub mod sensors;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use countdown::{AlertBand, Countdown, CountdownTick};
pub use game::{Advance, Game, WordList};
pub use led_effects::{Bounce, LedEffectEngine};
pub use logic::{hue_to_rgb, parse_hex_color, scale_brightness, word_hue};
pub use melody::MelodyPlayer;
pub use scheduler::HelmetGame;
pub use sensors::SensorAggregator;
pub use traits::{
    Accelerometer, Board, Buzzer, Clock, ControlChannel, CountdownDisplay, DistanceSensor,
    LedError, LedStrip, Microphone, RotaryEncoder, SensorError,
};
pub use types::{
    Acceleration, ControlCommand, EffectKind, LightingUpdate, LogEvent, MelodyChoice, MelodyName,
    Note, Notification, Palette, Word,
};
