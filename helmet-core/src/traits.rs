//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung. Jeder Aufruf ist synchron und kurz;
//! einzige Ausnahme ist [`Clock::hard_pause`].
//!
//! # Implementierungen
//! - **Production:** Treiber in `helmet-firmware::hal`
//! - **Testing:** MockBoard (in-memory Mock in `helmet-tests`)

use rgb::RGB8;

use crate::types::{Acceleration, ControlCommand, Notification};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Fehler-Typ für Sensor-Zugriffe über einen Bus (I2C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    Bus,
}

/// Adressierbarer LED-Strip (WS2812/Neopixel)
///
/// Pixel werden gepuffert und erst mit [`LedStrip::show`] übertragen.
/// Die Helligkeit wirkt global beim Übertragen.
pub trait LedStrip {
    fn pixel_count(&self) -> usize;

    fn set_pixel(&mut self, index: usize, color: RGB8);

    fn set_brightness(&mut self, brightness: u8);

    /// Überträgt den Puffer auf den Strip
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn show(&mut self) -> Result<(), LedError>;
}

/// Passiver Buzzer
pub trait Buzzer {
    /// Startet einen Dauerton (läuft bis `no_tone`)
    fn tone(&mut self, freq_hz: u32);

    fn no_tone(&mut self);
}

/// 4-stellige 7-Segment-Anzeige für die Restzeit
pub trait CountdownDisplay {
    /// Zeigt den Wert mit führenden Nullen
    fn show_number(&mut self, value: u32);
}

/// Drehgeber, wird einmal pro Tick abgefragt
pub trait RotaryEncoder {
    /// Aktuelle Raststellung (dekodiert intern die Quadratur-Signale)
    fn position(&mut self) -> i32;
}

/// Ultraschall-Abstandssensor
pub trait DistanceSensor {
    /// Distanz in cm, 0 wenn kein Echo empfangen wurde
    fn distance_cm(&mut self) -> u32;
}

pub trait Accelerometer {
    fn acceleration(&mut self) -> Result<Acceleration, SensorError>;
}

pub trait Microphone {
    /// Roher ADC-Pegel (12 Bit)
    fn level(&mut self) -> u16;
}

/// Bidirektionaler Kanal zum Dashboard
pub trait ControlChannel {
    /// Holt das nächste empfangene Kommando (non-blocking)
    fn poll_command(&mut self) -> Option<ControlCommand>;

    /// Fire-and-forget Broadcast an alle Listener
    fn broadcast(&mut self, notification: &Notification);
}

pub trait Clock {
    /// Monotone Zeit seit Boot
    fn now_ms(&self) -> u64;

    /// Harte, blockierende Pause: stoppt jede andere Verarbeitung
    fn hard_pause(&mut self, ms: u32);
}

/// Alles, was der Scheduler pro Tick anfasst
pub trait Board:
    LedStrip
    + Buzzer
    + CountdownDisplay
    + RotaryEncoder
    + DistanceSensor
    + Accelerometer
    + Microphone
    + ControlChannel
    + Clock
{
}

impl<T> Board for T where
    T: LedStrip
        + Buzzer
        + CountdownDisplay
        + RotaryEncoder
        + DistanceSensor
        + Accelerometer
        + Microphone
        + ControlChannel
        + Clock
{
}
